//! Budget domain types.

use chrono::{DateTime, Utc};
use finbud_shared::types::{BudgetDateId, BudgetId, BudgetItemId, CategoryId, Money, TenantId};
use serde::{Deserialize, Serialize};

/// A budget owned by a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Budget ID.
    pub id: BudgetId,
    /// Owning tenant.
    pub account_id: TenantId,
    /// Budget name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// One month of a budget. Tenant ownership comes from the parent budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetDate {
    /// Budget date ID.
    pub id: BudgetDateId,
    /// Parent budget.
    pub budget_id: BudgetId,
    /// Month, 1-12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

/// Amount allocated to a category in one budget month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetItem {
    /// Budget item ID.
    pub id: BudgetItemId,
    /// Parent budget month.
    pub budget_date_id: BudgetDateId,
    /// Category the amount is allocated to.
    pub category_id: CategoryId,
    /// Allocated amount.
    pub amount: Money,
}

/// Category allocation returned by monthly reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAllocation {
    /// Category.
    pub category_id: CategoryId,
    /// Allocated amount.
    pub amount: Money,
}

/// Input for creating a budget with all of its months and items.
#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    /// Owning tenant.
    pub account_id: TenantId,
    /// Budget name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Months covered by the budget.
    pub months: Vec<CreateBudgetMonthInput>,
}

/// One month in a [`CreateBudgetInput`].
#[derive(Debug, Clone)]
pub struct CreateBudgetMonthInput {
    /// Month, 1-12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Allocations for the month.
    pub items: Vec<CreateBudgetItemInput>,
}

/// One allocation in a [`CreateBudgetMonthInput`].
#[derive(Debug, Clone, Copy)]
pub struct CreateBudgetItemInput {
    /// Category.
    pub category_id: CategoryId,
    /// Allocated amount (non-negative).
    pub amount: Money,
}
