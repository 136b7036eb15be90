//! Transaction repository: append-only transaction records and budget listings.

use chrono::Utc;
use finbud_core::StoreError;
use finbud_core::transaction::{
    BudgetScope, CreateInOutRecord, CreateTransferRecord, Transaction, TransactionFlow,
    TransactionKind, TransactionStore,
};
use finbud_shared::types::{
    BankAccountId, BudgetDateId, CategoryId, Money, TenantId, TransactionId,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};
use tracing::debug;

use crate::entities::sea_orm_active_enums::TransactionKind as DbTransactionKind;
use crate::entities::{budget_dates, budgets, transactions};
use crate::error::store_err;

impl From<DbTransactionKind> for TransactionKind {
    fn from(kind: DbTransactionKind) -> Self {
        match kind {
            DbTransactionKind::In => Self::In,
            DbTransactionKind::Out => Self::Out,
            DbTransactionKind::Transfer => Self::Transfer,
        }
    }
}

fn db_kind(kind: TransactionKind) -> DbTransactionKind {
    match kind {
        TransactionKind::In => DbTransactionKind::In,
        TransactionKind::Out => DbTransactionKind::Out,
        TransactionKind::Transfer => DbTransactionKind::Transfer,
    }
}

impl TryFrom<transactions::Model> for Transaction {
    type Error = StoreError;

    fn try_from(model: transactions::Model) -> Result<Self, Self::Error> {
        let kind = TransactionKind::from(model.kind);
        let flow = match (
            kind,
            model.bank_account_from_id,
            model.bank_account_to_id,
            model.bank_account_id,
            model.category_id,
        ) {
            (TransactionKind::Transfer, Some(from), Some(to), None, None) => {
                TransactionFlow::Transfer {
                    bank_account_from_id: BankAccountId::from_uuid(from),
                    bank_account_to_id: BankAccountId::from_uuid(to),
                }
            }
            (TransactionKind::In | TransactionKind::Out, None, None, Some(bank), Some(category)) => {
                TransactionFlow::InOut {
                    bank_account_id: BankAccountId::from_uuid(bank),
                    category_id: CategoryId::from_uuid(category),
                }
            }
            _ => {
                return Err(StoreError::Database(format!(
                    "malformed {kind} transaction row {}",
                    model.id
                )));
            }
        };

        Ok(Self {
            id: TransactionId::from_uuid(model.id),
            account_id: TenantId::from_uuid(model.account_id),
            kind,
            name: model.name,
            amount: Money::from_minor(model.amount),
            flow,
            budget_date_id: BudgetDateId::from_uuid(model.budget_date_id),
            description: model.description,
            created_at: model.created_at.with_timezone(&Utc),
            is_system_managed: model.is_system_managed,
        })
    }
}

/// Transaction repository.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn insert(&self, model: transactions::ActiveModel) -> Result<(), StoreError> {
        let row = model.insert(&self.db).await.map_err(store_err)?;
        debug!(transaction_id = %row.id, kind = ?row.kind, "transaction row inserted");
        Ok(())
    }
}

/// Transactions of one tenant filed under one budget month.
fn scoped(scope: BudgetScope) -> Result<Select<transactions::Entity>, StoreError> {
    let month = i32::try_from(scope.month).map_err(StoreError::database)?;

    Ok(transactions::Entity::find()
        .inner_join(budget_dates::Entity)
        .join(JoinType::InnerJoin, budget_dates::Relation::Budgets.def())
        .filter(transactions::Column::AccountId.eq(scope.account_id.into_inner()))
        .filter(budgets::Column::AccountId.eq(scope.account_id.into_inner()))
        .filter(budget_dates::Column::BudgetId.eq(scope.budget_id.into_inner()))
        .filter(budget_dates::Column::Month.eq(month))
        .filter(budget_dates::Column::Year.eq(scope.year)))
}

impl TransactionStore for TransactionRepository {
    async fn create_transfer(&self, record: CreateTransferRecord) -> Result<(), StoreError> {
        self.insert(transactions::ActiveModel {
            id: Set(TransactionId::new().into_inner()),
            account_id: Set(record.account_id.into_inner()),
            kind: Set(DbTransactionKind::Transfer),
            name: Set(record.name),
            amount: Set(record.amount.minor_units()),
            bank_account_from_id: Set(Some(record.bank_account_from_id.into_inner())),
            bank_account_to_id: Set(Some(record.bank_account_to_id.into_inner())),
            bank_account_id: Set(None),
            category_id: Set(None),
            budget_date_id: Set(record.budget_date_id.into_inner()),
            description: Set(record.description),
            created_at: Set(record.created_at.into()),
            is_system_managed: Set(record.is_system_managed),
        })
        .await
    }

    async fn create_in_out(&self, record: CreateInOutRecord) -> Result<(), StoreError> {
        self.insert(transactions::ActiveModel {
            id: Set(TransactionId::new().into_inner()),
            account_id: Set(record.account_id.into_inner()),
            kind: Set(db_kind(record.kind.into())),
            name: Set(record.name),
            amount: Set(record.amount.minor_units()),
            bank_account_from_id: Set(None),
            bank_account_to_id: Set(None),
            bank_account_id: Set(Some(record.bank_account_id.into_inner())),
            category_id: Set(Some(record.category_id.into_inner())),
            budget_date_id: Set(record.budget_date_id.into_inner()),
            description: Set(record.description),
            created_at: Set(record.created_at.into()),
            is_system_managed: Set(record.is_system_managed),
        })
        .await
    }

    async fn get_by_budget(
        &self,
        scope: BudgetScope,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Transaction>, StoreError> {
        let models = scoped(scope)?
            .order_by_desc(transactions::Column::CreatedAt)
            .order_by_desc(transactions::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(store_err)?;

        models.into_iter().map(Transaction::try_from).collect()
    }

    async fn count_by_budget(&self, scope: BudgetScope) -> Result<u64, StoreError> {
        scoped(scope)?.count(&self.db).await.map_err(store_err)
    }
}
