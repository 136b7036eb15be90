//! Category domain types.

use finbud_shared::types::{CategoryId, TenantId};
use serde::{Deserialize, Serialize};

/// A category transactions and budget items are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Owning tenant.
    pub account_id: TenantId,
    /// Display name.
    pub name: String,
    /// Icon identifier.
    pub icon: String,
    /// Hex color, e.g. `#34d399`.
    pub color: String,
    /// Only active categories may be referenced by new transactions.
    pub active: bool,
}
