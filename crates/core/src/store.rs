//! Errors surfaced by persistence capabilities.
//!
//! Lookups, the transaction store, and repositories in `finbud-db` all
//! report failures through [`StoreError`]. Absence of a row is never an
//! error for a lookup; it is `Ok(None)` or a shorter `Vec`.

use thiserror::Error;

/// Persistence-layer failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A referenced row does not exist (foreign-key violation).
    #[error("Not found: {0}")]
    NotFound(String),

    /// A uniqueness constraint was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(String),
}

impl StoreError {
    /// Create a database error from any displayable source.
    #[must_use]
    pub fn database(err: impl std::fmt::Display) -> Self {
        Self::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        assert_eq!(
            StoreError::NotFound("budget date".into()).to_string(),
            "Not found: budget date"
        );
        assert_eq!(
            StoreError::database("connection reset").to_string(),
            "Database error: connection reset"
        );
    }
}
