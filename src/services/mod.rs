//! Business logic services

pub mod library;
pub mod seed;
pub mod stats;

pub use library::{BorrowReceipt, Library, RatingOutcome, ReturnReceipt};
pub use stats::{GenreShare, LibraryStats, PopularBook};
