//! Text rendering for the console menu

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::{
    models::{AvailabilityBand, Book, Borrower, BorrowerStanding},
    services::LibraryStats,
};

/// Truncate to `width` characters, marking the cut with a trailing dot
fn clip(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let mut clipped: String = text.chars().take(width - 1).collect();
        clipped.push('.');
        clipped
    } else {
        text.to_string()
    }
}

fn availability_label(band: AvailabilityBand) -> String {
    match band {
        AvailabilityBand::Unavailable => format!("❌ {}", band),
        AvailabilityBand::Limited => format!("⚠️  {}", band),
        AvailabilityBand::Available => format!("✅ {}", band),
    }
}

/// Detail card for one book
pub fn book_card(book: &Book) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", "=".repeat(60));
    let _ = writeln!(out, "📚 {}", book.title());
    let _ = writeln!(out, "{}", "-".repeat(60));
    let _ = writeln!(out, "{:<15}{}", "ISBN:", book.isbn());
    let _ = writeln!(out, "{:<15}{}", "Author:", book.author());
    let _ = writeln!(out, "{:<15}{}", "Genre:", book.genre());
    let _ = writeln!(out, "{:<15}{}", "Year:", book.publication_year());
    let _ = writeln!(
        out,
        "{:<15}{}/{}",
        "Copies:",
        book.available_copies(),
        book.total_copies()
    );
    let _ = writeln!(out, "{:<15}{:.1}/5.0", "Rating:", book.rating());
    let _ = writeln!(out, "{:<15}{}", "Times Borrowed:", book.times_borrowed());
    let _ = writeln!(out, "Status: {}", availability_label(book.availability()));
    let _ = writeln!(out, "{}", "=".repeat(60));
    out
}

/// Catalog table, one row per book
pub fn catalog_table<'a>(books: impl IntoIterator<Item = &'a Book>) -> String {
    let mut rows = String::new();
    let mut count = 0;
    for book in books {
        count += 1;
        let _ = writeln!(
            rows,
            "{:<15}{:<30}{:<20}{:>3}/{:<4}{:>7.1}",
            clip(book.isbn(), 14),
            clip(book.title(), 28),
            clip(book.author(), 18),
            book.available_copies(),
            book.total_copies(),
            book.rating()
        );
    }

    let mut out = String::new();
    let _ = writeln!(out, "\n=== LIBRARY CATALOG ({} books) ===", count);
    let _ = writeln!(
        out,
        "{:<15}{:<30}{:<20}{:<10}{:<8}",
        "ISBN", "Title", "Author", "Available", "Rating"
    );
    let _ = writeln!(out, "{}", "-".repeat(93));
    out.push_str(&rows);
    out
}

/// Detail card for one borrower
pub fn borrower_card(borrower: &Borrower, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", "=".repeat(50));
    let _ = writeln!(out, "👤 {}", borrower.name());
    let _ = writeln!(out, "{}", "-".repeat(50));
    let _ = writeln!(out, "{:<15}{}", "Borrower ID:", borrower.id());
    let _ = writeln!(out, "{:<15}{}", "Email:", borrower.email());
    let _ = writeln!(
        out,
        "{:<15}{}/{}",
        "Books Borrowed:",
        borrower.books_borrowed(),
        borrower.max_books()
    );
    let _ = writeln!(out, "{:<15}{} days", "Member for:", borrower.membership_days(now));
    let status = match borrower.standing() {
        BorrowerStanding::Blocked => "❌ Cannot borrow more books".to_string(),
        BorrowerStanding::LowCapacity(n) => format!("⚠️  Only {} book(s) left", n),
        BorrowerStanding::Normal(n) => format!("✅ Can borrow {} more book(s)", n),
    };
    let _ = writeln!(out, "Status: {}", status);
    let _ = writeln!(out, "{}", "=".repeat(50));
    out
}

pub fn statistics(stats: &LibraryStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n=== LIBRARY STATISTICS ===");
    let _ = writeln!(out, "Total Books: {}", stats.total_books);
    let _ = writeln!(out, "Total Borrowers: {}", stats.total_borrowers);
    let _ = writeln!(out, "Total Transactions: {}", stats.total_transactions);

    let Some(popular) = &stats.most_popular else {
        return out;
    };
    let _ = writeln!(
        out,
        "\nMost Popular Book: {} ({} borrows)",
        popular.title, popular.times_borrowed
    );
    let _ = writeln!(out, "\nGenre Distribution:");
    for share in &stats.genres {
        let _ = writeln!(
            out,
            "- {}: {} books ({:.1}%)",
            share.genre, share.count, share.percentage
        );
    }
    let _ = writeln!(out, "\nAvailability Rate: {:.1}%", stats.availability_rate);
    out
}

/// Overdue heuristic listing
pub fn overdue<'a>(borrowers: impl IntoIterator<Item = &'a Borrower>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n=== OVERDUE BOOKS SIMULATION ===");
    let _ = writeln!(out, "Note: loan counts stand in for due dates, which are not tracked.\n");
    let mut flagged = 0;
    for borrower in borrowers {
        flagged += 1;
        let _ = writeln!(
            out,
            "{} has {} books (might have overdue)",
            borrower.name(),
            borrower.books_borrowed()
        );
    }
    if flagged == 0 {
        let _ = writeln!(out, "✅ No potential overdue books detected.");
    }
    out
}
