//! Bank account and ledger error types.

use finbud_shared::AppError;
use finbud_shared::types::{BankAccountId, Money};
use thiserror::Error;

use crate::store::StoreError;

/// Errors raised by the balance ledger authority.
///
/// Every variant means no balance was changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The debit would drive the balance below zero.
    #[error("Insufficient funds in bank account {bank_account_id}: balance {balance}, requested {amount}")]
    InsufficientFunds {
        /// The account that would be overdrawn.
        bank_account_id: BankAccountId,
        /// Balance at the time of the check.
        balance: Money,
        /// Requested debit.
        amount: Money,
    },

    /// The credit would push the balance above the allowed maximum.
    #[error("Balance limit exceeded for bank account {bank_account_id}: balance {balance}, credit {amount}")]
    BalanceLimitExceeded {
        /// The account that would overflow.
        bank_account_id: BankAccountId,
        /// Balance at the time of the check.
        balance: Money,
        /// Requested credit.
        amount: Money,
    },

    /// The account did not resolve for the tenant at mutation time.
    #[error("Bank account not found: {0}")]
    BankAccountNotFound(BankAccountId),

    /// Source and destination of a transfer are the same account.
    #[error("Cannot transfer bank account {0} to itself")]
    SameBankAccount(BankAccountId),

    /// Ledger amounts must be positive.
    #[error("Ledger amount must be positive, got {0}")]
    InvalidAmount(Money),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::BalanceLimitExceeded { .. } => "BALANCE_LIMIT_EXCEEDED",
            Self::BankAccountNotFound(_) => "BANK_ACCOUNT_NOT_FOUND",
            Self::SameBankAccount(_) => "SAME_BANK_ACCOUNT",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount(_) | Self::SameBankAccount(_) => 400,
            Self::BankAccountNotFound(_) => 404,
            Self::InsufficientFunds { .. } | Self::BalanceLimitExceeded { .. } => 422,
            Self::Database(_) => 500,
        }
    }
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        Self::new(err.http_status_code(), err.error_code(), err.to_string())
    }
}

/// Errors raised while registering a bank account.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankAccountError {
    /// Name must be 1-20 characters.
    #[error("Bank account name must be between 1 and 20 characters")]
    InvalidName,

    /// Account number must be exactly 6 digits.
    #[error("Account number must be exactly 6 digits")]
    InvalidAccountNumber,

    /// Branch must be exactly 3 digits.
    #[error("Branch must be exactly 3 digits")]
    InvalidBranch,

    /// Opening balance out of range.
    #[error("Opening balance {0} is outside the allowed range")]
    InvalidBalance(Money),

    /// The referenced bank provider does not exist.
    #[error("Bank provider doesn't exist")]
    ProviderNotFound,

    /// An identical bank account is already registered.
    #[error("Bank account already exists")]
    AlreadyExists,

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl BankAccountError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidName | Self::InvalidAccountNumber | Self::InvalidBranch => {
                "VALIDATION_ERROR"
            }
            Self::InvalidBalance(_) => "INVALID_BALANCE",
            Self::ProviderNotFound => "BANK_PROVIDER_NOT_FOUND",
            Self::AlreadyExists => "BANK_ACCOUNT_EXISTS",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidName
            | Self::InvalidAccountNumber
            | Self::InvalidBranch
            | Self::InvalidBalance(_) => 400,
            Self::ProviderNotFound => 404,
            Self::AlreadyExists => 409,
            Self::Database(_) => 500,
        }
    }
}

impl From<StoreError> for BankAccountError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::ProviderNotFound,
            StoreError::Conflict(_) => Self::AlreadyExists,
            StoreError::Database(msg) => Self::Database(msg),
        }
    }
}

impl From<BankAccountError> for AppError {
    fn from(err: BankAccountError) -> Self {
        Self::new(err.http_status_code(), err.error_code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_error_display() {
        let id = BankAccountId::from_uuid(uuid::Uuid::nil());
        let err = LedgerError::InsufficientFunds {
            bank_account_id: id,
            balance: Money::from_minor(10_000),
            amount: Money::from_minor(50_000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds in bank account 00000000-0000-0000-0000-000000000000: balance 100.00, requested 500.00"
        );
        assert_eq!(err.error_code(), "INSUFFICIENT_FUNDS");
    }

    #[test]
    fn test_bank_account_error_from_store() {
        assert_eq!(
            BankAccountError::from(StoreError::NotFound("provider".into())),
            BankAccountError::ProviderNotFound
        );
        assert_eq!(
            BankAccountError::from(StoreError::Conflict("dup".into())),
            BankAccountError::AlreadyExists
        );
        assert_eq!(BankAccountError::ProviderNotFound.http_status_code(), 404);
        assert_eq!(BankAccountError::AlreadyExists.http_status_code(), 409);
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = BankAccountError::AlreadyExists.into();
        assert_eq!(app.status_code(), 409);
        assert_eq!(app.error_code(), "BANK_ACCOUNT_EXISTS");

        let app: AppError = LedgerError::SameBankAccount(BankAccountId::new()).into();
        assert_eq!(app.status_code(), 400);
        assert_eq!(app.error_code(), "SAME_BANK_ACCOUNT");
        assert!(!app.needs_reconciliation());
    }
}
