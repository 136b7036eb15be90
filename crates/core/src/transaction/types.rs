//! Transaction domain types.
//!
//! Transactions are append-only ledger records: created once by the engine
//! after the matching balance mutation succeeded, never updated or deleted.

use chrono::{DateTime, Utc};
use finbud_shared::types::{
    BankAccountId, BudgetDateId, BudgetId, CategoryId, Money, TenantId, TransactionId,
};
use serde::{Deserialize, Serialize};

use crate::bank::InOutKind;

/// Longest transaction name the record store accepts, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Transaction classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    /// Money coming into an account.
    In,
    /// Money leaving an account.
    Out,
    /// Money moved between two accounts of the same tenant.
    Transfer,
}

impl TransactionKind {
    /// Returns the single-account direction, or `None` for transfers.
    #[must_use]
    pub fn as_in_out(self) -> Option<InOutKind> {
        match self {
            Self::In => Some(InOutKind::In),
            Self::Out => Some(InOutKind::Out),
            Self::Transfer => None,
        }
    }

    /// Database/API representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
            Self::Transfer => "TRANSFER",
        }
    }
}

impl From<InOutKind> for TransactionKind {
    fn from(kind: InOutKind) -> Self {
        match kind {
            InOutKind::In => Self::In,
            InOutKind::Out => Self::Out,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN" => Ok(Self::In),
            "OUT" => Ok(Self::Out),
            "TRANSFER" => Ok(Self::Transfer),
            _ => Err(format!("Unknown transaction kind: {s}")),
        }
    }
}

/// Accounts a transaction touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "flow", rename_all = "snake_case")]
pub enum TransactionFlow {
    /// Movement between two accounts.
    Transfer {
        /// Debited account.
        bank_account_from_id: BankAccountId,
        /// Credited account.
        bank_account_to_id: BankAccountId,
    },
    /// Credit or debit of one account, filed under a category.
    InOut {
        /// Mutated account.
        bank_account_id: BankAccountId,
        /// Category.
        category_id: CategoryId,
    },
}

/// A recorded transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Owning tenant.
    pub account_id: TenantId,
    /// Kind.
    pub kind: TransactionKind,
    /// Short name.
    pub name: String,
    /// Amount moved (positive).
    pub amount: Money,
    /// Accounts touched.
    #[serde(flatten)]
    pub flow: TransactionFlow,
    /// Budget month the transaction is filed under.
    pub budget_date_id: BudgetDateId,
    /// Free-form description.
    pub description: String,
    /// When the transaction happened.
    pub created_at: DateTime<Utc>,
    /// True only for entries generated by internal processes.
    pub is_system_managed: bool,
}

/// Input for a transfer between two bank accounts.
#[derive(Debug, Clone)]
pub struct TransferInput {
    /// Owning tenant.
    pub account_id: TenantId,
    /// Short name.
    pub name: String,
    /// Amount to move (positive).
    pub amount: Money,
    /// Account to debit.
    pub bank_account_from_id: BankAccountId,
    /// Account to credit.
    pub bank_account_to_id: BankAccountId,
    /// Budget month.
    pub budget_date_id: BudgetDateId,
    /// Free-form description.
    pub description: String,
    /// When the transaction happened.
    pub created_at: DateTime<Utc>,
}

/// Input for an income or expense on one bank account.
#[derive(Debug, Clone)]
pub struct InOutInput {
    /// `In` or `Out`; `Transfer` is rejected.
    pub kind: TransactionKind,
    /// Owning tenant.
    pub account_id: TenantId,
    /// Short name.
    pub name: String,
    /// Amount (positive).
    pub amount: Money,
    /// Category, must be active.
    pub category_id: CategoryId,
    /// Account to credit or debit.
    pub bank_account_id: BankAccountId,
    /// Budget month.
    pub budget_date_id: BudgetDateId,
    /// Free-form description.
    pub description: String,
    /// When the transaction happened.
    pub created_at: DateTime<Utc>,
}

/// Input for listing the transactions of one budget month.
#[derive(Debug, Clone, Copy)]
pub struct GetListInput {
    /// Owning tenant.
    pub account_id: TenantId,
    /// Budget.
    pub budget_id: BudgetId,
    /// Month, 1-12.
    pub month: u32,
    /// Year.
    pub year: i32,
    /// Page size.
    pub limit: u32,
    /// Page number (1-indexed).
    pub page: u32,
}

/// Scope of a budget listing: one tenant, one budget, one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetScope {
    /// Owning tenant.
    pub account_id: TenantId,
    /// Budget.
    pub budget_id: BudgetId,
    /// Month, 1-12.
    pub month: u32,
    /// Year.
    pub year: i32,
}

/// Record written to the store after a successful transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTransferRecord {
    /// Owning tenant.
    pub account_id: TenantId,
    /// Short name.
    pub name: String,
    /// Amount moved.
    pub amount: Money,
    /// Debited account.
    pub bank_account_from_id: BankAccountId,
    /// Credited account.
    pub bank_account_to_id: BankAccountId,
    /// Budget month.
    pub budget_date_id: BudgetDateId,
    /// Free-form description.
    pub description: String,
    /// When the transaction happened.
    pub created_at: DateTime<Utc>,
    /// System-generated flag.
    pub is_system_managed: bool,
}

/// Record written to the store after a successful credit or debit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateInOutRecord {
    /// Direction.
    pub kind: InOutKind,
    /// Owning tenant.
    pub account_id: TenantId,
    /// Short name.
    pub name: String,
    /// Amount moved.
    pub amount: Money,
    /// Category.
    pub category_id: CategoryId,
    /// Mutated account.
    pub bank_account_id: BankAccountId,
    /// Budget month.
    pub budget_date_id: BudgetDateId,
    /// Free-form description.
    pub description: String,
    /// When the transaction happened.
    pub created_at: DateTime<Utc>,
    /// System-generated flag.
    pub is_system_managed: bool,
}
