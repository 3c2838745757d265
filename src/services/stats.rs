//! Statistics service

use std::collections::BTreeMap;

use crate::services::library::Library;

/// Most borrowed title in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct PopularBook {
    pub isbn: String,
    pub title: String,
    pub times_borrowed: u32,
}

/// Genre share of the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct GenreShare {
    pub genre: String,
    pub count: usize,
    /// Percentage of all catalog records
    pub percentage: f64,
}

/// Aggregate report over the current library state
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryStats {
    pub total_books: usize,
    pub total_borrowers: usize,
    pub total_transactions: u64,
    /// `None` only for an empty catalog
    pub most_popular: Option<PopularBook>,
    /// Ordered by genre name
    pub genres: Vec<GenreShare>,
    /// Percentage of records with at least one copy on the shelf
    pub availability_rate: f64,
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

impl Library {
    /// Compute the statistics report. Read-only.
    pub fn statistics(&self) -> LibraryStats {
        let total_books = self.book_count();

        // First book in key order wins ties, including the all-zero case
        let mut most_popular = None;
        for book in self.books() {
            let beats = most_popular
                .as_ref()
                .map_or(true, |current: &PopularBook| book.times_borrowed() > current.times_borrowed);
            if beats {
                most_popular = Some(PopularBook {
                    isbn: book.isbn().to_string(),
                    title: book.title().to_string(),
                    times_borrowed: book.times_borrowed(),
                });
            }
        }

        let mut genre_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for book in self.books() {
            *genre_counts.entry(book.genre()).or_default() += 1;
        }
        let genres = genre_counts
            .into_iter()
            .map(|(genre, count)| GenreShare {
                genre: genre.to_string(),
                count,
                percentage: percentage(count, total_books),
            })
            .collect();

        let available = self.books().filter(|book| book.is_available()).count();

        LibraryStats {
            total_books,
            total_borrowers: self.borrower_count(),
            total_transactions: self.transactions(),
            most_popular,
            genres,
            availability_rate: percentage(available, total_books),
        }
    }
}
