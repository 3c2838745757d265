//! Error types for Lending Desk

use thiserror::Error;

/// Failure reason codes reported alongside every rejected transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NoSuchBorrower = 4,
    NoSuchItem = 5,
    ItemNotAvailable = 7,
    MaxBorrowsReached = 11,
    NotHeld = 13,
    BadValue = 18,
}

/// Kind of entity a lookup failed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Book,
    Borrower,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::Book => write!(f, "Book"),
            Entity::Borrower => write!(f, "Borrower"),
        }
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: Entity, key: String },

    #[error("Borrower {member} has reached the maximum of {limit} loans")]
    CapacityExceeded { member: String, limit: u32 },

    #[error("No copies of {0} are available")]
    Unavailable(String),

    #[error("Borrower {member} does not hold {isbn}")]
    NotHeld { member: String, isbn: String },

    #[error("Every copy of {0} is already on the shelf")]
    OverReturn(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn book_not_found(isbn: &str) -> Self {
        AppError::NotFound {
            entity: Entity::Book,
            key: isbn.to_string(),
        }
    }

    pub fn borrower_not_found(member: &str) -> Self {
        AppError::NotFound {
            entity: Entity::Borrower,
            key: member.to_string(),
        }
    }

    /// Reason code for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound {
                entity: Entity::Book,
                ..
            } => ErrorCode::NoSuchItem,
            AppError::NotFound {
                entity: Entity::Borrower,
                ..
            } => ErrorCode::NoSuchBorrower,
            AppError::CapacityExceeded { .. } => ErrorCode::MaxBorrowsReached,
            AppError::Unavailable(_) => ErrorCode::ItemNotAvailable,
            AppError::NotHeld { .. } | AppError::OverReturn(_) => ErrorCode::NotHeld,
            AppError::InvalidInput(_) => ErrorCode::BadValue,
            AppError::Config(_) | AppError::Io(_) => ErrorCode::Failure,
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
