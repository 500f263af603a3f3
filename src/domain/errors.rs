//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.
//! The HTTP layer maps them onto status codes; nothing here knows about Axum.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// No record of this kind carries the id
    NotFound { entity: &'static str, id: i32 },
    /// Input rejected before any state was touched
    Validation(String),
    /// Every copy of the book is on loan
    BookUnavailable(i32),
    /// The loan was already closed
    AlreadyReturned(i32),
    /// Member already holds the configured maximum of books
    BorrowLimitReached { member_id: i32, limit: i32 },
    /// Record is still referenced by an active loan
    InUse(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        DomainError::NotFound { entity, id }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound { entity, id } => write!(f, "{} {} not found", entity, id),
            DomainError::Validation(msg) => write!(f, "Validation error: {}", msg),
            DomainError::BookUnavailable(id) => {
                write!(f, "Book {} has no copies available", id)
            }
            DomainError::AlreadyReturned(id) => {
                write!(f, "Transaction {} is already returned", id)
            }
            DomainError::BorrowLimitReached { member_id, limit } => write!(
                f,
                "Member {} has reached the borrowing limit of {} books",
                member_id, limit
            ),
            DomainError::InUse(msg) => write!(f, "Still in use: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            DomainError::not_found("Book", 7).to_string(),
            "Book 7 not found"
        );
        assert_eq!(
            DomainError::validation("Title is required").to_string(),
            "Validation error: Title is required"
        );
        assert_eq!(
            DomainError::BorrowLimitReached {
                member_id: 2,
                limit: 5
            }
            .to_string(),
            "Member 2 has reached the borrowing limit of 5 books"
        );
    }
}
