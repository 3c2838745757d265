//! Lending coordinator: owns the catalog and the roster and runs loan transactions

use std::collections::BTreeMap;

use crate::{
    config::LendingPolicy,
    error::{AppError, AppResult},
    models::{Book, Borrower},
};

/// Valid range for ratings submitted on return
pub const RATING_RANGE: std::ops::RangeInclusive<f64> = 1.0..=5.0;

/// Successful borrow
#[derive(Debug, Clone, PartialEq)]
pub struct BorrowReceipt {
    pub member_id: String,
    pub isbn: String,
    /// Copies left on the shelf after this loan
    pub available_copies: u32,
    /// Transaction counter after this loan
    pub transaction: u64,
}

/// What happened to the rating supplied with a return
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatingOutcome {
    NotProvided,
    /// Folded into the book's running average, which now has this value
    Applied(f64),
    /// Outside 1.0..=5.0, dropped without touching the average
    Ignored(f64),
}

/// Successful return
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnReceipt {
    pub member_id: String,
    pub isbn: String,
    pub available_copies: u32,
    pub rating: RatingOutcome,
    pub transaction: u64,
}

/// In-memory library. Both collections iterate in key order.
#[derive(Debug, Clone, Default)]
pub struct Library {
    books: BTreeMap<String, Book>,
    borrowers: BTreeMap<String, Borrower>,
    transactions: u64,
    policy: LendingPolicy,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: LendingPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> &LendingPolicy {
        &self.policy
    }

    /// Insert or replace a book by catalog key. Returns the replaced record, if any.
    pub fn add_book(&mut self, book: Book) -> Option<Book> {
        tracing::debug!("Catalog upsert: {} ({})", book.isbn(), book.title());
        self.books.insert(book.isbn().to_string(), book)
    }

    /// Insert or replace a borrower by member key. Returns the replaced record, if any.
    pub fn add_borrower(&mut self, borrower: Borrower) -> Option<Borrower> {
        tracing::debug!("Roster upsert: {} ({})", borrower.id(), borrower.name());
        self.borrowers.insert(borrower.id().to_string(), borrower)
    }

    pub fn book(&self, isbn: &str) -> Option<&Book> {
        self.books.get(isbn)
    }

    pub fn borrower(&self, member_id: &str) -> Option<&Borrower> {
        self.borrowers.get(member_id)
    }

    /// Number of successful borrow and return transactions so far
    pub fn transactions(&self) -> u64 {
        self.transactions
    }

    /// Lend one copy of `isbn` to `member_id`.
    ///
    /// Preconditions are checked in order (member exists, book exists,
    /// member under limit, copy on shelf) and the first failure is returned
    /// with nothing mutated.
    pub fn borrow(&mut self, member_id: &str, isbn: &str) -> AppResult<BorrowReceipt> {
        let result = self.try_borrow(member_id, isbn);
        match &result {
            Ok(receipt) => tracing::info!(
                "Borrow #{}: {} took {} ({} left)",
                receipt.transaction,
                member_id,
                isbn,
                receipt.available_copies
            ),
            Err(e) => tracing::warn!("Borrow rejected for {} / {}: {}", member_id, isbn, e),
        }
        result
    }

    fn try_borrow(&mut self, member_id: &str, isbn: &str) -> AppResult<BorrowReceipt> {
        let borrower = self
            .borrowers
            .get_mut(member_id)
            .ok_or_else(|| AppError::borrower_not_found(member_id))?;
        let book = self
            .books
            .get_mut(isbn)
            .ok_or_else(|| AppError::book_not_found(isbn))?;

        if !borrower.can_borrow() {
            return Err(AppError::CapacityExceeded {
                member: member_id.to_string(),
                limit: borrower.max_books(),
            });
        }

        // can_borrow() held above, so the borrower side cannot fail once the copy is taken
        book.borrow()?;
        borrower.borrow(isbn)?;
        self.transactions += 1;

        Ok(BorrowReceipt {
            member_id: member_id.to_string(),
            isbn: isbn.to_string(),
            available_copies: book.available_copies(),
            transaction: self.transactions,
        })
    }

    /// Take back one copy of `isbn` from `member_id`, optionally rating it.
    ///
    /// Both the borrower's loan and the book's shelf count are validated
    /// before either is touched. A rating outside 1.0..=5.0 is ignored and
    /// reported in the receipt, never as an error.
    pub fn return_book(
        &mut self,
        member_id: &str,
        isbn: &str,
        rating: Option<f64>,
    ) -> AppResult<ReturnReceipt> {
        let result = self.try_return(member_id, isbn, rating);
        match &result {
            Ok(receipt) => {
                tracing::info!(
                    "Return #{}: {} brought back {} ({} on shelf)",
                    receipt.transaction,
                    member_id,
                    isbn,
                    receipt.available_copies
                );
                if let RatingOutcome::Ignored(value) = receipt.rating {
                    tracing::debug!("Rating {} for {} out of range, ignored", value, isbn);
                }
            }
            Err(e) => tracing::warn!("Return rejected for {} / {}: {}", member_id, isbn, e),
        }
        result
    }

    fn try_return(
        &mut self,
        member_id: &str,
        isbn: &str,
        rating: Option<f64>,
    ) -> AppResult<ReturnReceipt> {
        let borrower = self
            .borrowers
            .get_mut(member_id)
            .ok_or_else(|| AppError::borrower_not_found(member_id))?;
        let book = self
            .books
            .get_mut(isbn)
            .ok_or_else(|| AppError::book_not_found(isbn))?;

        if !borrower.holds(isbn) || !book.can_return() {
            return Err(AppError::NotHeld {
                member: member_id.to_string(),
                isbn: isbn.to_string(),
            });
        }

        borrower.return_copy(isbn)?;
        book.return_copy()?;
        self.transactions += 1;

        let rating = match rating {
            None => RatingOutcome::NotProvided,
            Some(value) if RATING_RANGE.contains(&value) => {
                book.add_rating(value);
                RatingOutcome::Applied(book.rating())
            }
            Some(value) => RatingOutcome::Ignored(value),
        };

        Ok(ReturnReceipt {
            member_id: member_id.to_string(),
            isbn: isbn.to_string(),
            available_copies: book.available_copies(),
            rating,
            transaction: self.transactions,
        })
    }

    /// Books whose title, author, catalog key or genre contains `query` (case-sensitive)
    pub fn search<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a Book> + 'a {
        self.books.values().filter(move |book| {
            book.title().contains(query)
                || book.author().contains(query)
                || book.isbn().contains(query)
                || book.genre().contains(query)
        })
    }

    /// Every book in ascending catalog-key order
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    /// Every borrower in ascending member-key order
    pub fn borrowers(&self) -> impl Iterator<Item = &Borrower> {
        self.borrowers.values()
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn borrower_count(&self) -> usize {
        self.borrowers.len()
    }

    /// Borrowers holding more than `overdue_threshold` items.
    ///
    /// Loan count stands in for due dates, which are not tracked.
    pub fn overdue_candidates(&self) -> impl Iterator<Item = &Borrower> {
        let threshold = self.policy.overdue_threshold;
        self.borrowers
            .values()
            .filter(move |borrower| borrower.books_borrowed() > threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn library() -> Library {
        let mut library = Library::new();
        library.add_book(Book::new("111", "Dune", "Frank Herbert", "SciFi", 1965, 2));
        library.add_book(Book::new("222", "Emma", "Jane Austen", "Classic", 1815, 1));
        library.add_borrower(Borrower::new("B001", "Alice", "alice@email.com"));
        library.add_borrower(Borrower::new("B002", "Bob", "bob@email.com"));
        library
    }

    #[test]
    fn test_upsert_overwrites() {
        let mut library = library();
        let replaced = library.add_book(Book::new("111", "Dune Messiah", "Frank Herbert", "SciFi", 1969, 4));
        assert_eq!(replaced.map(|b| b.title().to_string()), Some("Dune".to_string()));
        assert_eq!(library.book_count(), 2);
        assert_eq!(library.book("111").map(Book::total_copies), Some(4));
    }

    #[test]
    fn test_borrow_success() {
        let mut library = library();
        let receipt = library.borrow("B001", "111").unwrap();
        assert_eq!(receipt.available_copies, 1);
        assert_eq!(receipt.transaction, 1);
        assert!(library.borrower("B001").unwrap().holds("111"));
        assert_eq!(library.book("111").unwrap().times_borrowed(), 1);
    }

    #[test]
    fn test_borrow_precondition_order() {
        let mut library = library();
        // unknown member is reported before unknown book
        let err = library.borrow("B999", "999").unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoSuchBorrower);
        let err = library.borrow("B001", "999").unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoSuchItem);

        library.borrow("B001", "222").unwrap();
        let err = library.borrow("B002", "222").unwrap_err();
        assert_eq!(err.code(), ErrorCode::ItemNotAvailable);
        assert_eq!(library.borrower("B002").unwrap().books_borrowed(), 0);
        assert_eq!(library.transactions(), 1);
    }

    #[test]
    fn test_capacity_checked_before_availability() {
        let mut library = Library::new();
        library.add_book(Book::new("111", "Dune", "Frank Herbert", "SciFi", 1965, 10));
        library.add_book(Book::new("222", "Emma", "Jane Austen", "Classic", 1815, 1));
        library.add_borrower(Borrower::with_max_books("B001", "Alice", "a@x", 1));
        library.add_borrower(Borrower::new("B002", "Bob", "b@x"));
        library.borrow("B002", "222").unwrap();
        library.borrow("B001", "111").unwrap();

        let err = library.borrow("B001", "222").unwrap_err();
        assert_eq!(err.code(), ErrorCode::MaxBorrowsReached);
    }

    #[test]
    fn test_return_with_rating() {
        let mut library = library();
        library.borrow("B001", "111").unwrap();
        let receipt = library.return_book("B001", "111", Some(4.0)).unwrap();
        assert_eq!(receipt.available_copies, 2);
        assert_eq!(receipt.transaction, 2);
        // times_borrowed = 1 -> (0.0 * 1 + 4.0) / 2
        assert_eq!(receipt.rating, RatingOutcome::Applied(2.0));
    }

    #[test]
    fn test_out_of_range_rating_ignored() {
        let mut library = library();
        library.borrow("B001", "111").unwrap();
        let receipt = library.return_book("B001", "111", Some(7.5)).unwrap();
        assert_eq!(receipt.rating, RatingOutcome::Ignored(7.5));
        assert_eq!(library.book("111").unwrap().rating(), 0.0);

        library.borrow("B001", "111").unwrap();
        let receipt = library.return_book("B001", "111", None).unwrap();
        assert_eq!(receipt.rating, RatingOutcome::NotProvided);
    }

    #[test]
    fn test_return_not_held_mutates_nothing() {
        let mut library = library();
        library.borrow("B001", "111").unwrap();
        let err = library.return_book("B002", "111", Some(5.0)).unwrap_err();
        assert!(matches!(err, AppError::NotHeld { .. }));
        assert_eq!(library.book("111").unwrap().available_copies(), 1);
        assert_eq!(library.borrower("B001").unwrap().books_borrowed(), 1);
        assert_eq!(library.transactions(), 1);
    }

    #[test]
    fn test_return_after_book_replaced_keeps_loan() {
        let mut library = library();
        library.borrow("B001", "111").unwrap();
        // fresh record: all copies on the shelf again
        library.add_book(Book::new("111", "Dune", "Frank Herbert", "SciFi", 1965, 2));

        let err = library.return_book("B001", "111", None).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotHeld);
        assert!(library.borrower("B001").unwrap().holds("111"));
        assert_eq!(library.book("111").unwrap().available_copies(), 2);
    }

    #[test]
    fn test_search() {
        let library = library();
        let titles: Vec<_> = library.search("Jane").map(Book::title).collect();
        assert_eq!(titles, ["Emma"]);
        assert_eq!(library.search("SciFi").count(), 1);
        assert_eq!(library.search("").count(), 2);
        assert_eq!(library.search("dune").count(), 0);
    }

    #[test]
    fn test_listing_is_key_ordered() {
        let mut library = Library::new();
        library.add_book(Book::new("b", "Second", "X", "G", 2000, 1));
        library.add_book(Book::new("a", "First", "X", "G", 2000, 1));
        let keys: Vec<_> = library.books().map(Book::isbn).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn test_overdue_candidates() {
        let mut library = Library::new();
        library.add_book(Book::new("111", "Dune", "Frank Herbert", "SciFi", 1965, 10));
        library.add_borrower(Borrower::new("B001", "Alice", "a@x"));
        library.add_borrower(Borrower::new("B002", "Bob", "b@x"));
        for _ in 0..4 {
            library.borrow("B001", "111").unwrap();
        }
        for _ in 0..3 {
            library.borrow("B002", "111").unwrap();
        }
        let flagged: Vec<_> = library.overdue_candidates().map(Borrower::id).collect();
        assert_eq!(flagged, ["B001"]);
    }
}
