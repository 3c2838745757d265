//! Interactive menu over a [`Library`]
//!
//! The console owns every prompt and every piece of formatting; the library
//! only ever sees plain keys and an optional rating.

pub mod render;

use std::io::{BufRead, Write};

use chrono::Utc;

use crate::{
    error::{AppError, AppResult, Entity},
    services::{Library, RatingOutcome},
};

/// Menu entries, numbered as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ViewAll,
    Search,
    Borrow,
    Return,
    Statistics,
    Overdue,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::ViewAll),
            "2" => Some(MenuChoice::Search),
            "3" => Some(MenuChoice::Borrow),
            "4" => Some(MenuChoice::Return),
            "5" => Some(MenuChoice::Statistics),
            "6" => Some(MenuChoice::Overdue),
            "7" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

const MENU: &str = "\n=== LIBRARY MANAGEMENT SYSTEM ===
1. View All Books
2. Search Book
3. Borrow Book
4. Return Book
5. View Library Statistics
6. Check Overdue Books
7. Exit
";

/// User-facing text for a rejected transaction
fn failure_message(err: &AppError) -> String {
    match err {
        AppError::NotFound {
            entity: Entity::Borrower,
            ..
        } => "Borrower not found!".to_string(),
        AppError::NotFound {
            entity: Entity::Book,
            ..
        } => "Book not found!".to_string(),
        AppError::CapacityExceeded { .. } => "Borrower has reached maximum book limit!".to_string(),
        AppError::Unavailable(_) => "Book is not available!".to_string(),
        AppError::NotHeld { .. } | AppError::OverReturn(_) => {
            "This borrower didn't borrow this book!".to_string()
        }
        other => other.to_string(),
    }
}

/// Blank means no rating. Range is left to the library.
fn parse_rating(text: &str) -> AppResult<Option<f64>> {
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<f64>()
        .map(Some)
        .map_err(|_| AppError::InvalidInput(format!("'{}' is not a number", text)))
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `label` and read one line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> AppResult<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Run the menu until the user exits or input ends
    pub fn run(&mut self, library: &mut Library) -> AppResult<()> {
        loop {
            write!(self.output, "{}", MENU)?;
            let Some(line) = self.prompt("Choice: ")? else {
                return Ok(());
            };
            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(self.output, "Invalid choice: {}", line)?;
                continue;
            };
            tracing::debug!("Menu choice: {:?}", choice);

            let keep_going = match choice {
                MenuChoice::ViewAll => {
                    write!(self.output, "{}", render::catalog_table(library.books()))?;
                    true
                }
                MenuChoice::Search => self.search(library)?,
                MenuChoice::Borrow => self.borrow(library)?,
                MenuChoice::Return => self.return_book(library)?,
                MenuChoice::Statistics => {
                    write!(self.output, "{}", render::statistics(&library.statistics()))?;
                    true
                }
                MenuChoice::Overdue => {
                    write!(self.output, "{}", render::overdue(library.overdue_candidates()))?;
                    true
                }
                MenuChoice::Exit => false,
            };
            if !keep_going {
                return Ok(());
            }
        }
    }

    fn search(&mut self, library: &Library) -> AppResult<bool> {
        let Some(query) = self.prompt("Enter search query (title/author/ISBN/genre): ")? else {
            return Ok(false);
        };
        writeln!(self.output, "\n=== SEARCH RESULTS ===")?;
        let mut found = false;
        for book in library.search(&query) {
            write!(self.output, "{}", render::book_card(book))?;
            found = true;
        }
        if !found {
            writeln!(self.output, "No books found matching: {}", query)?;
        }
        Ok(true)
    }

    /// Ask for a member key and a catalog key
    fn loan_keys(&mut self) -> AppResult<Option<(String, String)>> {
        let Some(member_id) = self.prompt("Enter Borrower ID: ")? else {
            return Ok(None);
        };
        let Some(isbn) = self.prompt("Enter Book ISBN: ")? else {
            return Ok(None);
        };
        Ok(Some((member_id, isbn)))
    }

    fn borrow(&mut self, library: &mut Library) -> AppResult<bool> {
        let Some((member_id, isbn)) = self.loan_keys()? else {
            return Ok(false);
        };
        match library.borrow(&member_id, &isbn) {
            Ok(_) => {
                writeln!(self.output, "✅ Book borrowed successfully!")?;
                if let Some(borrower) = library.borrower(&member_id) {
                    write!(self.output, "{}", render::borrower_card(borrower, Utc::now()))?;
                }
            }
            Err(e) => writeln!(self.output, "{}", failure_message(&e))?,
        }
        Ok(true)
    }

    fn return_book(&mut self, library: &mut Library) -> AppResult<bool> {
        let Some((member_id, isbn)) = self.loan_keys()? else {
            return Ok(false);
        };
        let Some(answer) = self.prompt("Rate this book (1.0-5.0, blank to skip): ")? else {
            return Ok(false);
        };
        let rating = match parse_rating(&answer) {
            Ok(rating) => rating,
            Err(e) => {
                writeln!(self.output, "{}. Rating skipped.", e)?;
                None
            }
        };

        match library.return_book(&member_id, &isbn, rating) {
            Ok(receipt) => {
                if let RatingOutcome::Ignored(value) = receipt.rating {
                    writeln!(self.output, "Rating {} is outside 1.0-5.0 and was not recorded.", value)?;
                }
                writeln!(self.output, "✅ Book returned successfully!")?;
            }
            Err(e) => writeln!(self.output, "{}", failure_message(&e))?,
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::seed::sample_library;

    const HOBBIT: &str = "978-1-101-14853-0";

    fn run_script(library: &mut Library, script: &str) -> String {
        let mut console = Console::new(script.as_bytes(), Vec::new());
        console.run(library).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(MenuChoice::parse(" 3\n"), Some(MenuChoice::Borrow));
        assert_eq!(MenuChoice::parse("8"), None);
        assert_eq!(MenuChoice::parse("borrow"), None);
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating("").unwrap(), None);
        assert_eq!(parse_rating("4.5").unwrap(), Some(4.5));
        assert_eq!(parse_rating("11").unwrap(), Some(11.0));
        let err = parse_rating("great").unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::BadValue);
    }

    #[test]
    fn test_exit_and_end_of_input() {
        let mut library = sample_library();
        let output = run_script(&mut library, "7\n");
        assert_eq!(output.matches("=== LIBRARY MANAGEMENT SYSTEM ===").count(), 1);

        let output = run_script(&mut library, "");
        assert!(output.ends_with("Choice: "));
    }

    #[test]
    fn test_invalid_choice_reprompts() {
        let mut library = sample_library();
        let output = run_script(&mut library, "x\n7\n");
        assert!(output.contains("Invalid choice: x"));
        assert_eq!(output.matches("Choice: ").count(), 2);
    }

    #[test]
    fn test_search_hobbit() {
        let mut library = sample_library();
        let output = run_script(&mut library, "2\nHobbit\n7\n");
        assert!(output.contains("📚 The Hobbit"));
        assert_eq!(output.matches("📚").count(), 1);

        let output = run_script(&mut library, "2\nhobbit\n7\n");
        assert!(output.contains("No books found matching: hobbit"));
    }

    #[test]
    fn test_borrow_then_return_with_rating() {
        let mut library = sample_library();
        let script = format!("3\nB001\n{0}\n4\nB001\n{0}\n5\n7\n", HOBBIT);
        let output = run_script(&mut library, &script);
        assert!(output.contains("✅ Book borrowed successfully!"));
        assert!(output.contains("👤 Alice Johnson"));
        assert!(output.contains("✅ Book returned successfully!"));
        assert_eq!(library.transactions(), 2);
        // (0.0 * 1 + 5.0) / 2
        assert_eq!(library.book(HOBBIT).unwrap().rating(), 2.5);
    }

    #[test]
    fn test_failures_are_reported() {
        let mut library = sample_library();
        let script = format!("3\nB999\n{0}\n4\nB002\n{0}\n\n7\n", HOBBIT);
        let output = run_script(&mut library, &script);
        assert!(output.contains("Borrower not found!"));
        assert!(output.contains("This borrower didn't borrow this book!"));
        assert_eq!(library.transactions(), 0);
    }

    #[test]
    fn test_out_of_range_rating_is_reported() {
        let mut library = sample_library();
        let script = format!("3\nB001\n{0}\n4\nB001\n{0}\n9\n7\n", HOBBIT);
        let output = run_script(&mut library, &script);
        assert!(output.contains("Rating 9 is outside 1.0-5.0"));
        assert_eq!(library.book(HOBBIT).unwrap().rating(), 0.0);
    }
}
