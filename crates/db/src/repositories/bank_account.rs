//! Bank account repository and the PostgreSQL balance ledger.
//!
//! Every ledger call runs in its own database transaction:
//! 1. the affected rows are read with `SELECT ... FOR UPDATE`, ordered by id
//!    so two opposite-direction transfers lock in the same order;
//! 2. `LedgerService` computes the new balances from the locked rows;
//! 3. the balances are written and the transaction committed.
//!
//! A rejected movement drops the transaction, which rolls it back.

use chrono::Utc;
use finbud_core::StoreError;
use finbud_core::bank::{
    BankAccount, BankAccountError, BankAccountService, BankLedger, BankLookup, BankProvider,
    CreateBankAccountInput, InOutFundsInput, LedgerError, LedgerService, TransferFundsInput,
};
use finbud_shared::types::{BankAccountId, BankProviderId, Money, PageParams, Paginated, TenantId};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::entities::{bank_accounts, bank_providers};
use crate::error::{ledger_err, store_err};

impl From<bank_accounts::Model> for BankAccount {
    fn from(model: bank_accounts::Model) -> Self {
        Self {
            id: BankAccountId::from_uuid(model.id),
            account_id: TenantId::from_uuid(model.account_id),
            bank_provider_id: BankProviderId::from_uuid(model.bank_provider_id),
            name: model.name,
            account_number: model.account_number,
            branch: model.branch,
            balance: Money::from_minor(model.balance),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<bank_providers::Model> for BankProvider {
    fn from(model: bank_providers::Model) -> Self {
        Self {
            id: BankProviderId::from_uuid(model.id),
            name: model.name,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

/// Bank account repository: tenant-scoped reads, onboarding, and the ledger.
#[derive(Debug, Clone)]
pub struct BankAccountRepository {
    db: DatabaseConnection,
}

impl BankAccountRepository {
    /// Creates a new bank account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a bank account after validating it.
    ///
    /// # Errors
    ///
    /// Returns a validation error from [`BankAccountService`],
    /// `ProviderNotFound` if the bank provider does not exist, or
    /// `AlreadyExists` for a duplicate account number at the same branch.
    #[instrument(skip(self, input), fields(account_id = %input.account_id))]
    pub async fn create(
        &self,
        input: CreateBankAccountInput,
    ) -> Result<BankAccount, BankAccountError> {
        BankAccountService::validate_new_account(&input)?;

        let now = Utc::now().into();
        let model = bank_accounts::ActiveModel {
            id: Set(BankAccountId::new().into_inner()),
            account_id: Set(input.account_id.into_inner()),
            bank_provider_id: Set(input.bank_provider_id.into_inner()),
            name: Set(input.name),
            account_number: Set(input.account_number),
            branch: Set(input.branch),
            balance: Set(input.balance.minor_units()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| BankAccountError::from(store_err(e)))?;

        info!(bank_account_id = %model.id, "bank account created");
        Ok(model.into())
    }

    /// One page of the bank providers, ordered by name.
    ///
    /// Providers are shared by every tenant.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` on failure.
    pub async fn get_providers(
        &self,
        params: PageParams,
    ) -> Result<Paginated<BankProvider>, StoreError> {
        let query = bank_providers::Entity::find()
            .order_by_asc(bank_providers::Column::Name)
            .order_by_asc(bank_providers::Column::Id);

        let (models, total) = tokio::try_join!(
            query
                .clone()
                .offset(params.offset)
                .limit(params.limit)
                .all(&self.db),
            query.count(&self.db),
        )
        .map_err(store_err)?;

        let data = models.into_iter().map(BankProvider::from).collect();
        Ok(Paginated::new(data, params.paging, total))
    }
}

impl BankLookup for BankAccountRepository {
    async fn get_by_id(
        &self,
        id: BankAccountId,
        account_id: TenantId,
    ) -> Result<Option<BankAccount>, StoreError> {
        let model = bank_accounts::Entity::find_by_id(id.into_inner())
            .filter(bank_accounts::Column::AccountId.eq(account_id.into_inner()))
            .one(&self.db)
            .await
            .map_err(store_err)?;

        Ok(model.map(BankAccount::from))
    }

    async fn get_many_by_id(
        &self,
        ids: &[BankAccountId],
        account_id: TenantId,
    ) -> Result<Vec<BankAccount>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = bank_accounts::Entity::find()
            .filter(bank_accounts::Column::Id.is_in(ids.iter().map(|id| id.into_inner())))
            .filter(bank_accounts::Column::AccountId.eq(account_id.into_inner()))
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(models.into_iter().map(BankAccount::from).collect())
    }
}

impl BankLedger for BankAccountRepository {
    #[instrument(
        skip(self, input),
        fields(
            from = %input.bank_account_from_id,
            to = %input.bank_account_to_id,
            amount = %input.amount,
        )
    )]
    async fn transfer(&self, input: TransferFundsInput) -> Result<(), LedgerError> {
        LedgerService::validate_amount(input.amount)?;

        let txn = self.db.begin().await.map_err(ledger_err)?;
        let locked = lock_accounts(
            &txn,
            &[input.bank_account_from_id, input.bank_account_to_id],
            input.account_id,
        )
        .await?;
        let from = take(&locked, input.bank_account_from_id)?;
        let to = take(&locked, input.bank_account_to_id)?;

        let balances = LedgerService::apply_transfer(from, to, input.amount).inspect_err(|e| {
            warn!(error = %e, "transfer rejected");
        })?;

        set_balance(&txn, from.id, balances.from).await?;
        set_balance(&txn, to.id, balances.to).await?;
        txn.commit().await.map_err(ledger_err)?;

        debug!(from_balance = %balances.from, to_balance = %balances.to, "transfer applied");
        Ok(())
    }

    #[instrument(
        skip(self, input),
        fields(kind = %input.kind, bank_account_id = %input.bank_account_id, amount = %input.amount)
    )]
    async fn in_out(&self, input: InOutFundsInput) -> Result<(), LedgerError> {
        LedgerService::validate_amount(input.amount)?;

        let txn = self.db.begin().await.map_err(ledger_err)?;
        let locked = lock_accounts(&txn, &[input.bank_account_id], input.account_id).await?;
        let account = take(&locked, input.bank_account_id)?;

        let balance = LedgerService::apply_in_out(input.kind, account, input.amount)
            .inspect_err(|e| warn!(error = %e, "balance movement rejected"))?;

        set_balance(&txn, account.id, balance).await?;
        txn.commit().await.map_err(ledger_err)?;

        debug!(balance = %balance, "balance movement applied");
        Ok(())
    }
}

/// Lock the tenant's rows for `ids`, in ascending id order.
async fn lock_accounts(
    txn: &DatabaseTransaction,
    ids: &[BankAccountId],
    account_id: TenantId,
) -> Result<Vec<BankAccount>, LedgerError> {
    let mut ids: Vec<Uuid> = ids.iter().map(|id| id.into_inner()).collect();
    ids.sort_unstable();
    ids.dedup();

    let models = bank_accounts::Entity::find()
        .filter(bank_accounts::Column::Id.is_in(ids))
        .filter(bank_accounts::Column::AccountId.eq(account_id.into_inner()))
        .order_by_asc(bank_accounts::Column::Id)
        .lock_exclusive()
        .all(txn)
        .await
        .map_err(ledger_err)?;

    Ok(models.into_iter().map(BankAccount::from).collect())
}

fn take(locked: &[BankAccount], id: BankAccountId) -> Result<&BankAccount, LedgerError> {
    locked
        .iter()
        .find(|b| b.id == id)
        .ok_or(LedgerError::BankAccountNotFound(id))
}

async fn set_balance(
    txn: &DatabaseTransaction,
    id: BankAccountId,
    balance: Money,
) -> Result<(), LedgerError> {
    bank_accounts::Entity::update_many()
        .col_expr(bank_accounts::Column::Balance, Expr::value(balance.minor_units()))
        .filter(bank_accounts::Column::Id.eq(id.into_inner()))
        .exec(txn)
        .await
        .map_err(ledger_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn model(balance: i64) -> bank_accounts::Model {
        let at = FixedOffset::east_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 8, 1, 7, 0, 0)
            .unwrap();
        bank_accounts::Model {
            id: Uuid::now_v7(),
            account_id: Uuid::now_v7(),
            bank_provider_id: Uuid::now_v7(),
            name: "Checking".to_string(),
            account_number: "123456".to_string(),
            branch: "001".to_string(),
            balance,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_model_into_bank_account() {
        let row = model(12_345);
        let account = BankAccount::from(row.clone());

        assert_eq!(account.id.into_inner(), row.id);
        assert_eq!(account.account_id.into_inner(), row.account_id);
        assert_eq!(account.balance, Money::from_minor(12_345));
        assert_eq!(
            account.created_at,
            Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_provider_model_into_bank_provider() {
        let row = bank_providers::Model {
            id: Uuid::now_v7(),
            name: "Nubank".to_string(),
            created_at: FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2025, 8, 1, 0, 0, 0)
                .unwrap(),
        };
        let provider = BankProvider::from(row.clone());

        assert_eq!(provider.id.into_inner(), row.id);
        assert_eq!(provider.name, "Nubank");
        assert_eq!(
            provider.created_at,
            Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_take_missing_account() {
        let locked = vec![BankAccount::from(model(0))];
        let missing = BankAccountId::new();

        assert_eq!(
            take(&locked, missing).unwrap_err(),
            LedgerError::BankAccountNotFound(missing)
        );
        assert!(take(&locked, locked[0].id).is_ok());
    }
}
