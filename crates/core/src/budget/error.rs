//! Budget error types.

use finbud_shared::AppError;
use finbud_shared::types::Money;
use thiserror::Error;

use crate::store::StoreError;

/// Budget-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// Budget name is empty.
    #[error("Budget name cannot be empty")]
    EmptyName,

    /// Budget has no months.
    #[error("Budget must cover at least one month")]
    NoMonths,

    /// Month out of range.
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    /// The same month/year appears twice.
    #[error("Duplicate budget month {month}/{year}")]
    DuplicateMonth {
        /// Month.
        month: u32,
        /// Year.
        year: i32,
    },

    /// Amount cannot be negative.
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Money),

    /// A referenced category does not exist.
    #[error("Category not found")]
    CategoryNotFound,

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl BudgetError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NoMonths => "VALIDATION_ERROR",
            Self::InvalidMonth(_) => "INVALID_MONTH",
            Self::DuplicateMonth { .. } => "DUPLICATE_BUDGET_MONTH",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::CategoryNotFound => "CATEGORY_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::EmptyName
            | Self::NoMonths
            | Self::InvalidMonth(_)
            | Self::DuplicateMonth { .. }
            | Self::NegativeAmount(_) => 400,
            Self::CategoryNotFound => 404,
            Self::Database(_) => 500,
        }
    }
}

impl From<StoreError> for BudgetError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::CategoryNotFound,
            StoreError::Conflict(msg) | StoreError::Database(msg) => Self::Database(msg),
        }
    }
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        Self::new(err.http_status_code(), err.error_code(), err.to_string())
    }
}
