//! In-memory stores for exercising the transaction engine.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, TimeZone, Utc};
use finbud_shared::types::{
    BankAccountId, BankProviderId, BudgetDateId, BudgetId, CategoryId, Money, TenantId,
    TransactionId,
};

use super::engine::TransactionEngine;
use super::repository::TransactionStore;
use super::types::{
    BudgetScope, CreateInOutRecord, CreateTransferRecord, InOutInput, Transaction,
    TransactionFlow, TransactionKind, TransferInput,
};
use crate::bank::{
    BankAccount, BankLedger, BankLookup, InOutFundsInput, LedgerError, LedgerService,
    TransferFundsInput,
};
use crate::budget::{Budget, BudgetDate, BudgetLookup};
use crate::category::{Category, CategoryLookup};
use crate::store::StoreError;

pub type MemoryEngine =
    TransactionEngine<MemoryBackend, MemoryBackend, MemoryBackend, MemoryBackend, MemoryBackend>;

#[derive(Default)]
struct State {
    bank_accounts: HashMap<BankAccountId, BankAccount>,
    budgets: HashMap<BudgetId, Budget>,
    budget_dates: HashMap<BudgetDateId, BudgetDate>,
    categories: HashMap<CategoryId, Category>,
    transactions: Vec<Transaction>,
    record_failure: Option<StoreError>,
    ledger_calls: usize,
}

/// One store backing every capability the engine needs.
#[derive(Default)]
pub struct MemoryBackend {
    state: Mutex<State>,
}

impl MemoryBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn add_bank_account(&self, tenant: TenantId, balance: i64) -> BankAccountId {
        let id = BankAccountId::new();
        self.state().bank_accounts.insert(
            id,
            BankAccount {
                id,
                account_id: tenant,
                bank_provider_id: BankProviderId::new(),
                name: "Checking".to_string(),
                account_number: "123456".to_string(),
                branch: "001".to_string(),
                balance: Money::from_minor(balance),
                created_at: Utc::now(),
            },
        );
        id
    }

    pub fn add_budget(&self, tenant: TenantId) -> BudgetId {
        let id = BudgetId::new();
        self.state().budgets.insert(
            id,
            Budget {
                id,
                account_id: tenant,
                name: "Household".to_string(),
                description: None,
                created_at: Utc::now(),
            },
        );
        id
    }

    pub fn add_budget_date(&self, budget_id: BudgetId, month: u32, year: i32) -> BudgetDateId {
        let id = BudgetDateId::new();
        self.state().budget_dates.insert(
            id,
            BudgetDate {
                id,
                budget_id,
                month,
                year,
            },
        );
        id
    }

    pub fn add_category(&self, tenant: TenantId, active: bool) -> CategoryId {
        let id = CategoryId::new();
        self.state().categories.insert(
            id,
            Category {
                id,
                account_id: tenant,
                name: "Groceries".to_string(),
                icon: "cart".to_string(),
                color: "#34d399".to_string(),
                active,
            },
        );
        id
    }

    pub fn balance(&self, id: BankAccountId) -> Money {
        self.state().bank_accounts[&id].balance
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.state().transactions.clone()
    }

    pub fn ledger_calls(&self) -> usize {
        self.state().ledger_calls
    }

    /// Make every following record write fail with `err`.
    pub fn fail_records_with(&self, err: StoreError) {
        self.state().record_failure = Some(err);
    }

    fn push_record(&self, record: Transaction) -> Result<(), StoreError> {
        let mut state = self.state();
        if let Some(err) = state.record_failure.clone() {
            return Err(err);
        }
        if !state.budget_dates.contains_key(&record.budget_date_id) {
            return Err(StoreError::NotFound("budget date".into()));
        }
        state.transactions.push(record);
        Ok(())
    }
}

impl BankLookup for MemoryBackend {
    async fn get_by_id(
        &self,
        id: BankAccountId,
        account_id: TenantId,
    ) -> Result<Option<BankAccount>, StoreError> {
        Ok(self
            .state()
            .bank_accounts
            .get(&id)
            .filter(|b| b.is_owned_by(account_id))
            .cloned())
    }

    async fn get_many_by_id(
        &self,
        ids: &[BankAccountId],
        account_id: TenantId,
    ) -> Result<Vec<BankAccount>, StoreError> {
        let state = self.state();
        Ok(ids
            .iter()
            .filter_map(|id| state.bank_accounts.get(id))
            .filter(|b| b.is_owned_by(account_id))
            .cloned()
            .collect())
    }
}

impl BankLedger for MemoryBackend {
    async fn transfer(&self, input: TransferFundsInput) -> Result<(), LedgerError> {
        let mut state = self.state();
        state.ledger_calls += 1;
        let from = owned(&state, input.bank_account_from_id, input.account_id)?;
        let to = owned(&state, input.bank_account_to_id, input.account_id)?;

        let balances = LedgerService::apply_transfer(&from, &to, input.amount)?;

        if let Some(acc) = state.bank_accounts.get_mut(&from.id) {
            acc.balance = balances.from;
        }
        if let Some(acc) = state.bank_accounts.get_mut(&to.id) {
            acc.balance = balances.to;
        }
        Ok(())
    }

    async fn in_out(&self, input: InOutFundsInput) -> Result<(), LedgerError> {
        let mut state = self.state();
        state.ledger_calls += 1;
        let account = owned(&state, input.bank_account_id, input.account_id)?;

        let balance = LedgerService::apply_in_out(input.kind, &account, input.amount)?;

        if let Some(acc) = state.bank_accounts.get_mut(&account.id) {
            acc.balance = balance;
        }
        Ok(())
    }
}

fn owned(state: &State, id: BankAccountId, tenant: TenantId) -> Result<BankAccount, LedgerError> {
    state
        .bank_accounts
        .get(&id)
        .filter(|b| b.is_owned_by(tenant))
        .cloned()
        .ok_or(LedgerError::BankAccountNotFound(id))
}

impl BudgetLookup for MemoryBackend {
    async fn get_budget_date_by_id(
        &self,
        id: BudgetDateId,
        account_id: TenantId,
    ) -> Result<Option<BudgetDate>, StoreError> {
        let state = self.state();
        Ok(state.budget_dates.get(&id).copied().filter(|d| {
            state
                .budgets
                .get(&d.budget_id)
                .is_some_and(|b| b.account_id == account_id)
        }))
    }
}

impl CategoryLookup for MemoryBackend {
    async fn get_by_id(
        &self,
        id: CategoryId,
        account_id: TenantId,
        active: Option<bool>,
    ) -> Result<Option<Category>, StoreError> {
        Ok(self
            .state()
            .categories
            .get(&id)
            .filter(|c| c.account_id == account_id)
            .filter(|c| active.is_none_or(|flag| c.active == flag))
            .cloned())
    }
}

impl TransactionStore for MemoryBackend {
    async fn create_transfer(&self, record: CreateTransferRecord) -> Result<(), StoreError> {
        self.push_record(Transaction {
            id: TransactionId::new(),
            account_id: record.account_id,
            kind: TransactionKind::Transfer,
            name: record.name,
            amount: record.amount,
            flow: TransactionFlow::Transfer {
                bank_account_from_id: record.bank_account_from_id,
                bank_account_to_id: record.bank_account_to_id,
            },
            budget_date_id: record.budget_date_id,
            description: record.description,
            created_at: record.created_at,
            is_system_managed: record.is_system_managed,
        })
    }

    async fn create_in_out(&self, record: CreateInOutRecord) -> Result<(), StoreError> {
        self.push_record(Transaction {
            id: TransactionId::new(),
            account_id: record.account_id,
            kind: record.kind.into(),
            name: record.name,
            amount: record.amount,
            flow: TransactionFlow::InOut {
                bank_account_id: record.bank_account_id,
                category_id: record.category_id,
            },
            budget_date_id: record.budget_date_id,
            description: record.description,
            created_at: record.created_at,
            is_system_managed: record.is_system_managed,
        })
    }

    async fn get_by_budget(
        &self,
        scope: BudgetScope,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Transaction>, StoreError> {
        let mut rows = scoped(&self.state(), scope);
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect())
    }

    async fn count_by_budget(&self, scope: BudgetScope) -> Result<u64, StoreError> {
        Ok(scoped(&self.state(), scope).len() as u64)
    }
}

fn scoped(state: &State, scope: BudgetScope) -> Vec<Transaction> {
    state
        .transactions
        .iter()
        .filter(|t| t.account_id == scope.account_id)
        .filter(|t| {
            state.budget_dates.get(&t.budget_date_id).is_some_and(|d| {
                d.budget_id == scope.budget_id && d.month == scope.month && d.year == scope.year
            })
        })
        .cloned()
        .collect()
}

pub fn engine(backend: &Arc<MemoryBackend>) -> MemoryEngine {
    TransactionEngine::new(
        Arc::clone(backend),
        Arc::clone(backend),
        Arc::clone(backend),
        Arc::clone(backend),
        Arc::clone(backend),
    )
}

/// A fixed instant, `minutes` after midnight on 2025-08-01 UTC.
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes)
}

/// One tenant with a budget month, a category, and two funded accounts.
pub struct World {
    pub backend: Arc<MemoryBackend>,
    pub engine: MemoryEngine,
    pub tenant: TenantId,
    pub budget_id: BudgetId,
    pub budget_date_id: BudgetDateId,
    pub category_id: CategoryId,
    pub a: BankAccountId,
    pub b: BankAccountId,
}

impl World {
    pub fn new(balance_a: i64, balance_b: i64) -> Self {
        let backend = MemoryBackend::new();
        let tenant = TenantId::new();
        let budget_id = backend.add_budget(tenant);
        let budget_date_id = backend.add_budget_date(budget_id, 8, 2025);
        let category_id = backend.add_category(tenant, true);
        let a = backend.add_bank_account(tenant, balance_a);
        let b = backend.add_bank_account(tenant, balance_b);
        Self {
            engine: engine(&backend),
            backend,
            tenant,
            budget_id,
            budget_date_id,
            category_id,
            a,
            b,
        }
    }

    pub fn transfer(&self, from: BankAccountId, to: BankAccountId, amount: i64) -> TransferInput {
        TransferInput {
            account_id: self.tenant,
            name: "move".to_string(),
            amount: Money::from_minor(amount),
            bank_account_from_id: from,
            bank_account_to_id: to,
            budget_date_id: self.budget_date_id,
            description: String::new(),
            created_at: at(0),
        }
    }

    pub fn in_out(&self, kind: TransactionKind, bank: BankAccountId, amount: i64) -> InOutInput {
        InOutInput {
            kind,
            account_id: self.tenant,
            name: "groceries".to_string(),
            amount: Money::from_minor(amount),
            category_id: self.category_id,
            bank_account_id: bank,
            budget_date_id: self.budget_date_id,
            description: String::new(),
            created_at: at(0),
        }
    }
}
