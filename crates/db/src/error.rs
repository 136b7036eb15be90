//! Translation of `SeaORM` errors into core error types.

use finbud_core::StoreError;
use finbud_core::bank::LedgerError;
use sea_orm::{DbErr, SqlErr};

/// Classify a database error for the core.
///
/// Foreign-key violations become `NotFound`, unique violations `Conflict`,
/// everything else `Database`.
pub(crate) fn store_err(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => StoreError::Conflict(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => StoreError::NotFound(msg),
        _ => StoreError::database(err),
    }
}

pub(crate) fn ledger_err(err: DbErr) -> LedgerError {
    LedgerError::Database(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_errors_map_to_database() {
        let err = store_err(DbErr::Custom("boom".into()));
        assert!(matches!(err, StoreError::Database(msg) if msg.contains("boom")));
    }

    #[test]
    fn test_record_not_found_is_not_a_reference_error() {
        let err = store_err(DbErr::RecordNotFound("transactions".into()));
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[test]
    fn test_ledger_err_keeps_message() {
        let err = ledger_err(DbErr::Custom("lock timeout".into()));
        assert!(matches!(err, LedgerError::Database(msg) if msg.contains("lock timeout")));
    }
}
