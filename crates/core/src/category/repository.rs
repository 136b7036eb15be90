//! Capabilities the category store provides to the core.

use std::future::Future;

use finbud_shared::types::{CategoryId, TenantId};

use super::types::Category;
use crate::store::StoreError;

/// Tenant-scoped category reads.
pub trait CategoryLookup: Send + Sync {
    /// Find a category owned by `account_id`.
    ///
    /// With `active: Some(flag)` only a category whose `active` equals
    /// `flag` is returned; `None` ignores the flag.
    fn get_by_id(
        &self,
        id: CategoryId,
        account_id: TenantId,
        active: Option<bool>,
    ) -> impl Future<Output = Result<Option<Category>, StoreError>> + Send;
}
