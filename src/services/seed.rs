//! Sample catalog and roster used by the console

use crate::{
    config::LendingPolicy,
    models::{Book, Borrower},
    services::library::Library,
};

/// Load the sample books and members into `library`
pub fn load_sample_data(library: &mut Library) {
    let books = [
        ("978-3-16-148410-0", "The Great Gatsby", "F. Scott Fitzgerald", "Classic", 1925, 5),
        ("978-0-7432-7356-5", "To Kill a Mockingbird", "Harper Lee", "Fiction", 1960, 3),
        ("978-0-14-028333-4", "1984", "George Orwell", "Dystopian", 1949, 4),
        (
            "978-0-679-74539-9",
            "Harry Potter and the Philosopher's Stone",
            "J.K. Rowling",
            "Fantasy",
            1997,
            8,
        ),
        ("978-1-101-14853-0", "The Hobbit", "J.R.R. Tolkien", "Fantasy", 1937, 3),
        ("978-0-307-47443-8", "The Da Vinci Code", "Dan Brown", "Mystery", 2003, 6),
    ];
    for (isbn, title, author, genre, year, copies) in books {
        library.add_book(Book::new(isbn, title, author, genre, year, copies));
    }

    let max_loans = library.policy().max_loans;
    let members = [
        ("B001", "Alice Johnson", "alice@email.com"),
        ("B002", "Bob Smith", "bob@email.com"),
        ("B003", "Charlie Brown", "charlie@email.com"),
    ];
    for (id, name, email) in members {
        library.add_borrower(Borrower::with_max_books(id, name, email, max_loans));
    }

    tracing::info!(
        "Loaded sample data: {} books, {} borrowers",
        library.book_count(),
        library.borrower_count()
    );
}

/// A library with the default policy and the sample data loaded
pub fn sample_library() -> Library {
    sample_library_with(LendingPolicy::default())
}

pub fn sample_library_with(policy: LendingPolicy) -> Library {
    let mut library = Library::with_policy(policy);
    load_sample_data(&mut library);
    library
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_counts() {
        let library = sample_library();
        assert_eq!(library.book_count(), 6);
        assert_eq!(library.borrower_count(), 3);
        assert_eq!(library.transactions(), 0);
    }

    #[test]
    fn test_policy_applies_to_members() {
        let library = sample_library_with(LendingPolicy {
            max_loans: 2,
            overdue_threshold: 1,
        });
        assert!(library.borrowers().all(|b| b.max_books() == 2));
    }
}
