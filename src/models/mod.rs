//! Data models for Lending Desk

pub mod book;
pub mod borrower;
pub mod enums;

// Re-export commonly used types
pub use book::Book;
pub use borrower::Borrower;
pub use enums::{AvailabilityBand, BorrowerStanding};
