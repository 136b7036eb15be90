//! Bank account domain types.

use chrono::{DateTime, Utc};
use finbud_shared::types::{BankAccountId, BankProviderId, Money, TenantId};
use serde::{Deserialize, Serialize};

/// A bank or card issuer accounts can be opened at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankProvider {
    /// The bank provider ID.
    pub id: BankProviderId,
    /// Display name, unique across providers.
    pub name: String,
    /// When the provider was added.
    pub created_at: DateTime<Utc>,
}

/// A bank account owned by a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    /// The bank account ID.
    pub id: BankAccountId,
    /// The owning tenant.
    pub account_id: TenantId,
    /// The bank provider this account is held at.
    pub bank_provider_id: BankProviderId,
    /// Display name.
    pub name: String,
    /// Six-digit account number.
    pub account_number: String,
    /// Three-digit branch code.
    pub branch: String,
    /// Current balance, `0..=MAX_BALANCE`.
    pub balance: Money,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}

impl BankAccount {
    /// Returns true if this account belongs to `tenant`.
    #[must_use]
    pub fn is_owned_by(&self, tenant: TenantId) -> bool {
        self.account_id == tenant
    }
}

/// Input for registering a bank account.
#[derive(Debug, Clone)]
pub struct CreateBankAccountInput {
    /// The owning tenant.
    pub account_id: TenantId,
    /// The bank provider.
    pub bank_provider_id: BankProviderId,
    /// Display name (1-20 characters).
    pub name: String,
    /// Account number (exactly 6 digits).
    pub account_number: String,
    /// Branch code (exactly 3 digits).
    pub branch: String,
    /// Opening balance.
    pub balance: Money,
}

/// Direction of a single-account balance movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InOutKind {
    /// Money coming into the account (credit).
    In,
    /// Money leaving the account (debit).
    Out,
}

impl std::fmt::Display for InOutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::In => write!(f, "IN"),
            Self::Out => write!(f, "OUT"),
        }
    }
}

/// Ledger request moving money between two accounts of one tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferFundsInput {
    /// The owning tenant.
    pub account_id: TenantId,
    /// Account to debit.
    pub bank_account_from_id: BankAccountId,
    /// Account to credit.
    pub bank_account_to_id: BankAccountId,
    /// Amount to move (positive).
    pub amount: Money,
}

/// Ledger request crediting or debiting one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InOutFundsInput {
    /// Credit or debit.
    pub kind: InOutKind,
    /// The owning tenant.
    pub account_id: TenantId,
    /// Account to mutate.
    pub bank_account_id: BankAccountId,
    /// Amount to move (positive).
    pub amount: Money,
}
