//! Lending Desk
//!
//! An in-memory library catalog and checkout workflow: books, borrowers,
//! and borrow/return transactions that keep both sides consistent.

pub mod config;
pub mod console;
pub mod error;
pub mod models;
pub mod services;

pub use config::{AppConfig, LendingPolicy};
pub use error::{AppError, AppResult, ErrorCode};
pub use models::{Book, Borrower};
pub use services::Library;
