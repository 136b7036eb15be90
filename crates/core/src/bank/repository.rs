//! Capabilities the bank-account store provides to the core.
//!
//! These traits are implemented by the db crate to provide actual database
//! operations, and by in-memory fakes in tests.

use std::future::Future;

use finbud_shared::types::{BankAccountId, TenantId};

use super::error::LedgerError;
use super::types::{BankAccount, InOutFundsInput, TransferFundsInput};
use crate::store::StoreError;

/// Tenant-scoped bank-account reads.
///
/// A row owned by another tenant is reported exactly like a missing row.
pub trait BankLookup: Send + Sync {
    /// Find one bank account owned by `account_id`.
    fn get_by_id(
        &self,
        id: BankAccountId,
        account_id: TenantId,
    ) -> impl Future<Output = Result<Option<BankAccount>, StoreError>> + Send;

    /// Find every listed bank account owned by `account_id`, in one round trip.
    ///
    /// Unresolved ids are simply absent from the result.
    fn get_many_by_id(
        &self,
        ids: &[BankAccountId],
        account_id: TenantId,
    ) -> impl Future<Output = Result<Vec<BankAccount>, StoreError>> + Send;
}

/// The balance-mutation authority.
///
/// The only legitimate path to changing `BankAccount::balance`.
/// Implementations must serialize concurrent mutations of the same account
/// and apply each call atomically: on error no balance has changed.
pub trait BankLedger: Send + Sync {
    /// Debit `bank_account_from_id` and credit `bank_account_to_id`.
    fn transfer(
        &self,
        input: TransferFundsInput,
    ) -> impl Future<Output = Result<(), LedgerError>> + Send;

    /// Credit (`IN`) or debit (`OUT`) a single account.
    fn in_out(
        &self,
        input: InOutFundsInput,
    ) -> impl Future<Output = Result<(), LedgerError>> + Send;
}
