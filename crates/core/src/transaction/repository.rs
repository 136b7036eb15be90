//! Capabilities the transaction store provides to the core.

use std::future::Future;

use super::types::{BudgetScope, CreateInOutRecord, CreateTransferRecord, Transaction};
use crate::store::StoreError;

/// Append-only transaction persistence.
pub trait TransactionStore: Send + Sync {
    /// Persist a `TRANSFER` record.
    fn create_transfer(
        &self,
        record: CreateTransferRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Persist an `IN` or `OUT` record.
    fn create_in_out(
        &self,
        record: CreateInOutRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// One page of the transactions filed under `scope`, newest first.
    fn get_by_budget(
        &self,
        scope: BudgetScope,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<Transaction>, StoreError>> + Send;

    /// Number of transactions filed under `scope`.
    fn count_by_budget(
        &self,
        scope: BudgetScope,
    ) -> impl Future<Output = Result<u64, StoreError>> + Send;
}
