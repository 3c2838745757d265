//! Book (catalog record) model

use super::enums::AvailabilityBand;
use crate::error::{AppError, AppResult};

/// One title in the catalog along with its copy availability
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    isbn: String,
    title: String,
    author: String,
    genre: String,
    publication_year: i32,
    total_copies: u32,
    available_copies: u32,
    rating: f64,
    times_borrowed: u32,
}

impl Book {
    /// Create a catalog record with every copy on the shelf
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        publication_year: i32,
        copies: u32,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            publication_year,
            total_copies: copies,
            available_copies: copies,
            rating: 0.0,
            times_borrowed: 0,
        }
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn publication_year(&self) -> i32 {
        self.publication_year
    }

    pub fn total_copies(&self) -> u32 {
        self.total_copies
    }

    pub fn available_copies(&self) -> u32 {
        self.available_copies
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn times_borrowed(&self) -> u32 {
        self.times_borrowed
    }

    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }

    pub fn availability(&self) -> AvailabilityBand {
        AvailabilityBand::classify(self.available_copies, self.total_copies)
    }

    /// Whether a lent copy can be taken back without exceeding the total
    pub fn can_return(&self) -> bool {
        self.available_copies < self.total_copies
    }

    /// Take one copy off the shelf
    pub fn borrow(&mut self) -> AppResult<()> {
        if !self.is_available() {
            return Err(AppError::Unavailable(self.isbn.clone()));
        }
        self.available_copies -= 1;
        self.times_borrowed += 1;
        Ok(())
    }

    /// Put one copy back on the shelf. Refuses to go past `total_copies`.
    pub fn return_copy(&mut self) -> AppResult<()> {
        if !self.can_return() {
            return Err(AppError::OverReturn(self.isbn.clone()));
        }
        self.available_copies += 1;
        Ok(())
    }

    /// Fold a rating into the running average.
    ///
    /// The denominator advances with `times_borrowed`, not with the number of
    /// ratings received, so unrated returns still weigh on the mean. No range
    /// check happens here; callers filter to 1.0..=5.0.
    pub fn add_rating(&mut self, value: f64) {
        let weight = f64::from(self.times_borrowed);
        self.rating = (self.rating * weight + value) / (weight + 1.0);
    }
}
