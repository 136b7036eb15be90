//! Transaction engine error types.
//!
//! Errors fall into three groups by when they happen relative to the
//! balance mutation:
//! - before it (validation, lookups): nothing changed, safe to retry with
//!   corrected input;
//! - during it (ledger): the ledger rejected the movement, nothing changed;
//! - after it (record write): the balance already moved but no transaction
//!   row exists. These need reconciliation, see
//!   [`TransactionError::needs_reconciliation`].

use finbud_shared::AppError;
use finbud_shared::types::{BankAccountId, Money};
use thiserror::Error;

use crate::bank::LedgerError;
use crate::store::StoreError;

/// Errors that can occur during transaction engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    // ========== Validation Errors ==========
    /// An input field is invalid, or a reference does not resolve for the tenant.
    ///
    /// Carries the field name: `name`, `bankAccountFrom`, `bankAccountTo`,
    /// `bankAccount`, `category`, or `budgetDate`.
    #[error("Invalid {0}")]
    Validation(&'static str),

    /// Amount must be strictly positive.
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Money),

    /// Source and destination of a transfer are the same account.
    #[error("Cannot transfer to the same bank account")]
    SameBankAccount,

    /// `TRANSFER` passed where only `IN`/`OUT` are allowed.
    #[error("Transaction kind must be IN or OUT")]
    InvalidTransactionKind,

    /// Month out of range.
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    // ========== Ledger Errors ==========
    /// The debit would drive the balance below zero.
    #[error("Insufficient funds in bank account {bank_account_id}")]
    InsufficientFunds {
        /// The account that would be overdrawn.
        bank_account_id: BankAccountId,
        /// Balance at the time of the check.
        balance: Money,
        /// Requested debit.
        amount: Money,
    },

    /// The credit would push the balance above the allowed maximum.
    #[error("Balance limit exceeded for bank account {0}")]
    BalanceLimitExceeded(BankAccountId),

    /// The account vanished between lookup and mutation.
    #[error("Bank account not found: {0}")]
    BankAccountNotFound(BankAccountId),

    // ========== Record-write Errors (balance already moved) ==========
    /// The record referenced a row that no longer exists.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The record violated a uniqueness constraint.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other failure writing the record.
    #[error("Internal error: {0}")]
    Internal(String),

    // ========== Database Errors ==========
    /// Failure reading data or applying the ledger mutation.
    #[error("Database error: {0}")]
    Database(String),
}

impl TransactionError {
    /// Wrap a failure from the read phase.
    #[must_use]
    pub fn lookup(err: StoreError) -> Self {
        Self::Database(err.to_string())
    }

    /// Wrap a failure from writing the transaction record.
    #[must_use]
    pub fn record(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => Self::NotFound(msg),
            StoreError::Conflict(msg) => Self::Conflict(msg),
            StoreError::Database(msg) => Self::Internal(msg),
        }
    }

    /// Returns true if a balance was changed without a matching record.
    #[must_use]
    pub fn needs_reconciliation(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::Conflict(_) | Self::Internal(_)
        )
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::SameBankAccount => "SAME_BANK_ACCOUNT",
            Self::InvalidTransactionKind => "INVALID_TRANSACTION_KIND",
            Self::InvalidMonth(_) => "INVALID_MONTH",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::BalanceLimitExceeded(_) => "BALANCE_LIMIT_EXCEEDED",
            Self::BankAccountNotFound(_) => "BANK_ACCOUNT_NOT_FOUND",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::Validation(_)
            | Self::InvalidAmount(_)
            | Self::SameBankAccount
            | Self::InvalidTransactionKind
            | Self::InvalidMonth(_) => 400,

            // 404 Not Found
            Self::BankAccountNotFound(_) | Self::NotFound(_) => 404,

            // 409 Conflict
            Self::Conflict(_) => 409,

            // 422 Unprocessable - ledger refused the movement
            Self::InsufficientFunds { .. } | Self::BalanceLimitExceeded(_) => 422,

            // 500 Internal Server Error
            Self::Internal(_) | Self::Database(_) => 500,
        }
    }
}

impl From<LedgerError> for TransactionError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientFunds {
                bank_account_id,
                balance,
                amount,
            } => Self::InsufficientFunds {
                bank_account_id,
                balance,
                amount,
            },
            LedgerError::BalanceLimitExceeded {
                bank_account_id, ..
            } => Self::BalanceLimitExceeded(bank_account_id),
            LedgerError::BankAccountNotFound(id) => Self::BankAccountNotFound(id),
            LedgerError::SameBankAccount(_) => Self::SameBankAccount,
            LedgerError::InvalidAmount(amount) => Self::InvalidAmount(amount),
            LedgerError::Database(msg) => Self::Database(msg),
        }
    }
}

impl From<TransactionError> for AppError {
    fn from(err: TransactionError) -> Self {
        let app = Self::new(err.http_status_code(), err.error_code(), err.to_string());
        if err.needs_reconciliation() {
            app.requiring_reconciliation()
        } else {
            app
        }
    }
}
