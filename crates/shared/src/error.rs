//! Error shape handed across the crate boundary.
//!
//! Every domain error in `finbud-core` already knows its API error code and
//! HTTP status. Converting one into [`AppError`] keeps both, together with
//! the rendered message and whether the failure left a balance change
//! without a matching transaction record.

use thiserror::Error;

/// A domain error flattened for a delivery layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct AppError {
    status: u16,
    code: &'static str,
    message: String,
    reconcile: bool,
}

impl AppError {
    /// Creates an error with an HTTP status, an API error code and a message.
    #[must_use]
    pub fn new(status: u16, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            reconcile: false,
        }
    }

    /// Marks the error as having moved a balance without recording it.
    #[must_use]
    pub fn requiring_reconciliation(mut self) -> Self {
        self.reconcile = true;
        self
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        self.code
    }

    /// Human-readable message of the underlying domain error.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// True if a balance changed but no transaction row was written.
    #[must_use]
    pub const fn needs_reconciliation(&self) -> bool {
        self.reconcile
    }

    /// True for 4xx statuses: the caller can fix the request and retry.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_display_carries_code_and_message() {
        let err = AppError::new(400, "VALIDATION_ERROR", "Invalid category");
        assert_eq!(err.to_string(), "VALIDATION_ERROR: Invalid category");
        assert_eq!(err.message(), "Invalid category");
        assert!(!err.needs_reconciliation());
    }

    #[test]
    fn test_reconciliation_flag() {
        let err = AppError::new(500, "INTERNAL_ERROR", "insert failed").requiring_reconciliation();
        assert!(err.needs_reconciliation());
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }

    #[rstest]
    #[case(400, true)]
    #[case(422, true)]
    #[case(499, true)]
    #[case(500, false)]
    fn test_client_error_range(#[case] status: u16, #[case] expected: bool) {
        assert_eq!(AppError::new(status, "X", "").is_client_error(), expected);
    }
}
