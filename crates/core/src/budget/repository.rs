//! Capabilities the budget store provides to the core.

use std::future::Future;

use finbud_shared::types::{BudgetDateId, TenantId};

use super::types::BudgetDate;
use crate::store::StoreError;

/// Tenant-scoped budget reads.
pub trait BudgetLookup: Send + Sync {
    /// Find a budget month whose parent budget is owned by `account_id`.
    ///
    /// Returns `None` both for unknown ids and for months of another
    /// tenant's budget.
    fn get_budget_date_by_id(
        &self,
        id: BudgetDateId,
        account_id: TenantId,
    ) -> impl Future<Output = Result<Option<BudgetDate>, StoreError>> + Send;
}
