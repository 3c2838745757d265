//! Borrower (library member) model

use chrono::{DateTime, Utc};

use super::enums::BorrowerStanding;
use crate::error::{AppError, AppResult};

/// Loan limit given to every new member
pub const DEFAULT_MAX_BOOKS: u32 = 5;

/// A library member and the catalog keys currently on loan to them
#[derive(Debug, Clone, PartialEq)]
pub struct Borrower {
    id: String,
    name: String,
    email: String,
    max_books: u32,
    /// Catalog keys in borrow order; its length is the active loan count
    borrowed_books: Vec<String>,
    membership_date: DateTime<Utc>,
}

impl Borrower {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::with_max_books(id, name, email, DEFAULT_MAX_BOOKS)
    }

    /// Create a member with a non-default loan limit
    pub fn with_max_books(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        max_books: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            max_books,
            borrowed_books: Vec::new(),
            membership_date: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn max_books(&self) -> u32 {
        self.max_books
    }

    pub fn books_borrowed(&self) -> u32 {
        self.borrowed_books.len() as u32
    }

    pub fn borrowed_books(&self) -> &[String] {
        &self.borrowed_books
    }

    pub fn membership_date(&self) -> DateTime<Utc> {
        self.membership_date
    }

    /// Whole days of membership as of `now`
    pub fn membership_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.membership_date).num_days()
    }

    pub fn can_borrow(&self) -> bool {
        self.books_borrowed() < self.max_books
    }

    pub fn holds(&self, isbn: &str) -> bool {
        self.borrowed_books.iter().any(|held| held == isbn)
    }

    pub fn remaining_capacity(&self) -> u32 {
        self.max_books.saturating_sub(self.books_borrowed())
    }

    pub fn standing(&self) -> BorrowerStanding {
        BorrowerStanding::classify(self.books_borrowed(), self.max_books)
    }

    /// Register a loan of `isbn`
    pub fn borrow(&mut self, isbn: &str) -> AppResult<()> {
        if !self.can_borrow() {
            return Err(AppError::CapacityExceeded {
                member: self.id.clone(),
                limit: self.max_books,
            });
        }
        self.borrowed_books.push(isbn.to_string());
        Ok(())
    }

    /// Release the first loan of `isbn`
    pub fn return_copy(&mut self, isbn: &str) -> AppResult<()> {
        let position = self
            .borrowed_books
            .iter()
            .position(|held| held == isbn)
            .ok_or_else(|| AppError::NotHeld {
                member: self.id.clone(),
                isbn: isbn.to_string(),
            })?;
        self.borrowed_books.remove(position);
        Ok(())
    }
}
