//! The transaction engine.
//!
//! Every write runs in two phases:
//!
//! 1. **Read phase.** All lookups for the operation are issued concurrently
//!    and joined. Missing or foreign references fail validation here, before
//!    anything is mutated.
//! 2. **Write phase.** The ledger authority applies the balance mutation,
//!    and only once it has succeeded is the transaction record written.
//!
//! The mutation and the record write are two separate stores and are NOT
//! atomic together. If the record write fails after the ledger accepted the
//! mutation, the balance stays changed, the failure is logged at `error`
//! level and returned; [`TransactionError::needs_reconciliation`] is true
//! for exactly those errors.

use std::sync::Arc;

use finbud_shared::config::PaginationConfig;
use finbud_shared::types::{BankAccountId, Money, PageRequest, Paginated, TenantId};
use tracing::{debug, error, info, instrument};

use super::error::TransactionError;
use super::repository::TransactionStore;
use super::types::{
    BudgetScope, CreateInOutRecord, CreateTransferRecord, GetListInput, InOutInput,
    MAX_NAME_LEN, Transaction, TransferInput,
};
use crate::bank::{BankAccount, BankLedger, BankLookup, InOutFundsInput, TransferFundsInput};
use crate::budget::{BudgetLookup, BudgetService};
use crate::category::CategoryLookup;
use crate::store::StoreError;

/// Orchestrates transfers, incomes/expenses, and budget listings.
///
/// Depends only on capability traits; the concrete stores are passed in
/// explicitly at construction.
pub struct TransactionEngine<B, D, C, L, S> {
    banks: Arc<B>,
    budgets: Arc<D>,
    categories: Arc<C>,
    ledger: Arc<L>,
    store: Arc<S>,
    pagination: PaginationConfig,
}

impl<B, D, C, L, S> TransactionEngine<B, D, C, L, S>
where
    B: BankLookup,
    D: BudgetLookup,
    C: CategoryLookup,
    L: BankLedger,
    S: TransactionStore,
{
    /// Create a new transaction engine with default pagination limits.
    #[must_use]
    pub fn new(
        banks: Arc<B>,
        budgets: Arc<D>,
        categories: Arc<C>,
        ledger: Arc<L>,
        store: Arc<S>,
    ) -> Self {
        Self {
            banks,
            budgets,
            categories,
            ledger,
            store,
            pagination: PaginationConfig::default(),
        }
    }

    /// Override the pagination limits used by [`Self::get_list`].
    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    /// Move `amount` between two bank accounts of the same tenant.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` / `SameBankAccount` / `Validation("name")` before
    ///   any I/O;
    /// - `Validation("bankAccountFrom" | "bankAccountTo" | "budgetDate")`
    ///   if a reference does not resolve for the tenant;
    /// - ledger errors (`InsufficientFunds`, ...) with nothing changed;
    /// - `NotFound` / `Conflict` / `Internal` if the record write failed
    ///   after the balances moved.
    #[instrument(
        skip_all,
        fields(
            account_id = %input.account_id,
            from = %input.bank_account_from_id,
            to = %input.bank_account_to_id,
            amount = %input.amount,
        )
    )]
    pub async fn transfer(&self, input: TransferInput) -> Result<(), TransactionError> {
        validate_amount(input.amount)?;
        if input.bank_account_from_id == input.bank_account_to_id {
            return Err(TransactionError::SameBankAccount);
        }
        validate_name(&input.name)?;

        // Phase 1: independent lookups, joined.
        let ids = [input.bank_account_from_id, input.bank_account_to_id];
        let (bank_accounts, budget_date) = tokio::join!(
            self.banks.get_many_by_id(&ids, input.account_id),
            self.budgets
                .get_budget_date_by_id(input.budget_date_id, input.account_id),
        );
        let bank_accounts = bank_accounts.map_err(TransactionError::lookup)?;
        let budget_date = budget_date.map_err(TransactionError::lookup)?;

        if find_owned(&bank_accounts, input.bank_account_from_id, input.account_id).is_none() {
            return Err(TransactionError::Validation("bankAccountFrom"));
        }
        if find_owned(&bank_accounts, input.bank_account_to_id, input.account_id).is_none() {
            return Err(TransactionError::Validation("bankAccountTo"));
        }
        if budget_date.is_none() {
            return Err(TransactionError::Validation("budgetDate"));
        }

        // Phase 2: mutate, then record.
        self.ledger
            .transfer(TransferFundsInput {
                account_id: input.account_id,
                bank_account_from_id: input.bank_account_from_id,
                bank_account_to_id: input.bank_account_to_id,
                amount: input.amount,
            })
            .await?;
        debug!("balances moved");

        let record = CreateTransferRecord {
            account_id: input.account_id,
            name: input.name,
            amount: input.amount,
            bank_account_from_id: input.bank_account_from_id,
            bank_account_to_id: input.bank_account_to_id,
            budget_date_id: input.budget_date_id,
            description: input.description,
            created_at: input.created_at,
            is_system_managed: false,
        };
        self.store
            .create_transfer(record)
            .await
            .map_err(unrecorded)?;

        info!("transfer recorded");
        Ok(())
    }

    /// Credit (`IN`) or debit (`OUT`) one bank account under a category.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` / `InvalidTransactionKind` / `Validation("name")`
    ///   before any I/O;
    /// - `Validation("bankAccount" | "category" | "budgetDate")` if a
    ///   reference does not resolve for the tenant or the category is inactive;
    /// - ledger errors with nothing changed;
    /// - `NotFound` / `Conflict` / `Internal` if the record write failed
    ///   after the balance moved.
    #[instrument(
        skip_all,
        fields(
            account_id = %input.account_id,
            kind = %input.kind,
            bank_account_id = %input.bank_account_id,
            amount = %input.amount,
        )
    )]
    pub async fn in_out(&self, input: InOutInput) -> Result<(), TransactionError> {
        validate_amount(input.amount)?;
        let kind = input
            .kind
            .as_in_out()
            .ok_or(TransactionError::InvalidTransactionKind)?;
        validate_name(&input.name)?;

        // Phase 1: independent lookups, joined.
        let (bank_account, category, budget_date) = tokio::join!(
            self.banks.get_by_id(input.bank_account_id, input.account_id),
            self.categories
                .get_by_id(input.category_id, input.account_id, Some(true)),
            self.budgets
                .get_budget_date_by_id(input.budget_date_id, input.account_id),
        );
        let bank_account = bank_account.map_err(TransactionError::lookup)?;
        let category = category.map_err(TransactionError::lookup)?;
        let budget_date = budget_date.map_err(TransactionError::lookup)?;

        if !bank_account.is_some_and(|b| b.is_owned_by(input.account_id)) {
            return Err(TransactionError::Validation("bankAccount"));
        }
        if !category.is_some_and(|c| c.active && c.account_id == input.account_id) {
            return Err(TransactionError::Validation("category"));
        }
        if budget_date.is_none() {
            return Err(TransactionError::Validation("budgetDate"));
        }

        // Phase 2: mutate, then record.
        self.ledger
            .in_out(InOutFundsInput {
                kind,
                account_id: input.account_id,
                bank_account_id: input.bank_account_id,
                amount: input.amount,
            })
            .await?;
        debug!("balance moved");

        let record = CreateInOutRecord {
            kind,
            account_id: input.account_id,
            name: input.name,
            amount: input.amount,
            category_id: input.category_id,
            bank_account_id: input.bank_account_id,
            budget_date_id: input.budget_date_id,
            description: input.description,
            created_at: input.created_at,
            is_system_managed: false,
        };
        self.store
            .create_in_out(record)
            .await
            .map_err(unrecorded)?;

        info!("transaction recorded");
        Ok(())
    }

    /// One page of the transactions filed under a budget month.
    ///
    /// The page and the total count are read concurrently.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMonth` for months outside 1-12, or `Database` if
    /// either read fails.
    #[instrument(
        skip_all,
        fields(
            account_id = %input.account_id,
            budget_id = %input.budget_id,
            month = input.month,
            year = input.year,
        )
    )]
    pub async fn get_list(
        &self,
        input: GetListInput,
    ) -> Result<Paginated<Transaction>, TransactionError> {
        if !BudgetService::is_valid_month(input.month) {
            return Err(TransactionError::InvalidMonth(input.month));
        }

        let params = PageRequest::new(input.limit, input.page).compute_with(&self.pagination);
        let scope = BudgetScope {
            account_id: input.account_id,
            budget_id: input.budget_id,
            month: input.month,
            year: input.year,
        };

        let (data, total) = tokio::join!(
            self.store.get_by_budget(scope, params.offset, params.limit),
            self.store.count_by_budget(scope),
        );
        let data = data.map_err(TransactionError::lookup)?;
        let total = total.map_err(TransactionError::lookup)?;

        Ok(Paginated::new(data, params.paging, total))
    }
}

fn validate_amount(amount: Money) -> Result<(), TransactionError> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(TransactionError::InvalidAmount(amount))
    }
}

fn validate_name(name: &str) -> Result<(), TransactionError> {
    if name.chars().count() > MAX_NAME_LEN {
        return Err(TransactionError::Validation("name"));
    }
    Ok(())
}

fn find_owned(
    accounts: &[BankAccount],
    id: BankAccountId,
    tenant: TenantId,
) -> Option<&BankAccount> {
    accounts.iter().find(|b| b.id == id && b.is_owned_by(tenant))
}

/// Log and convert a record-write failure that follows an applied mutation.
fn unrecorded(err: StoreError) -> TransactionError {
    error!(
        error = %err,
        "balance mutation applied but transaction record was not written; reconciliation required"
    );
    TransactionError::record(err)
}
