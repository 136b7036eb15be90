//! Budget repository: budget months lookup, creation, and monthly allocations.

use std::collections::BTreeSet;

use chrono::Utc;
use finbud_core::StoreError;
use finbud_core::budget::{
    Budget, BudgetDate, BudgetError, BudgetItem, BudgetLookup, BudgetService, CategoryAllocation,
    CreateBudgetInput,
};
use finbud_shared::types::{BudgetDateId, BudgetId, BudgetItemId, CategoryId, Money, TenantId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, instrument};

use crate::entities::{budget_dates, budget_items, budgets, categories};
use crate::error::store_err;

impl From<budgets::Model> for Budget {
    fn from(model: budgets::Model) -> Self {
        Self {
            id: BudgetId::from_uuid(model.id),
            account_id: TenantId::from_uuid(model.account_id),
            name: model.name,
            description: model.description,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl TryFrom<budget_dates::Model> for BudgetDate {
    type Error = StoreError;

    fn try_from(model: budget_dates::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BudgetDateId::from_uuid(model.id),
            budget_id: BudgetId::from_uuid(model.budget_id),
            month: u32::try_from(model.month).map_err(StoreError::database)?,
            year: model.year,
        })
    }
}

impl From<budget_items::Model> for BudgetItem {
    fn from(model: budget_items::Model) -> Self {
        Self {
            id: BudgetItemId::from_uuid(model.id),
            budget_date_id: BudgetDateId::from_uuid(model.budget_date_id),
            category_id: CategoryId::from_uuid(model.category_id),
            amount: Money::from_minor(model.amount),
        }
    }
}

/// A newly created budget with its months and items.
#[derive(Debug, Clone)]
pub struct CreatedBudget {
    /// Budget header.
    pub budget: Budget,
    /// Months the budget covers, in input order.
    pub dates: Vec<BudgetDate>,
    /// Allocations across all months.
    pub items: Vec<BudgetItem>,
}

/// Budget repository.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a budget, its months and their items in one database transaction.
    ///
    /// # Errors
    ///
    /// Returns a validation error from [`BudgetService::validate_new_budget`],
    /// `CategoryNotFound` if an item references a category the tenant does
    /// not own, or `Database` on failure. Nothing is written on error.
    #[instrument(skip(self, input), fields(account_id = %input.account_id))]
    pub async fn create_with_items(
        &self,
        input: CreateBudgetInput,
    ) -> Result<CreatedBudget, BudgetError> {
        BudgetService::validate_new_budget(&input)?;

        let txn = self.db.begin().await.map_err(|e| BudgetError::from(store_err(e)))?;
        let created = insert_budget(&txn, input).await?;
        txn.commit().await.map_err(|e| BudgetError::from(store_err(e)))?;

        info!(
            budget_id = %created.budget.id,
            months = created.dates.len(),
            items = created.items.len(),
            "budget created"
        );
        Ok(created)
    }

    /// Allocations for one month of a budget, one entry per category.
    ///
    /// Returns `None` when the budget does not exist or belongs to another
    /// tenant, and an empty list when the month has no items.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` on failure.
    pub async fn get_monthly_by_category(
        &self,
        account_id: TenantId,
        budget_id: BudgetId,
        month: u32,
        year: i32,
    ) -> Result<Option<Vec<CategoryAllocation>>, StoreError> {
        let owned = budgets::Entity::find_by_id(budget_id.into_inner())
            .filter(budgets::Column::AccountId.eq(account_id.into_inner()))
            .count(&self.db)
            .await
            .map_err(store_err)?;
        if owned == 0 {
            return Ok(None);
        }

        let items = budget_items::Entity::find()
            .inner_join(budget_dates::Entity)
            .filter(budget_dates::Column::BudgetId.eq(budget_id.into_inner()))
            .filter(budget_dates::Column::Month.eq(i32::try_from(month).map_err(StoreError::database)?))
            .filter(budget_dates::Column::Year.eq(year))
            .all(&self.db)
            .await
            .map_err(store_err)?;

        let allocations: Vec<CategoryAllocation> = items
            .into_iter()
            .map(|item| CategoryAllocation {
                category_id: CategoryId::from_uuid(item.category_id),
                amount: Money::from_minor(item.amount),
            })
            .collect();

        Ok(Some(BudgetService::total_by_category(&allocations)))
    }
}

async fn insert_budget(
    txn: &DatabaseTransaction,
    input: CreateBudgetInput,
) -> Result<CreatedBudget, BudgetError> {
    let tenant = input.account_id.into_inner();

    // Every referenced category must belong to the tenant.
    let category_ids: BTreeSet<_> = input
        .months
        .iter()
        .flat_map(|m| m.items.iter().map(|i| i.category_id.into_inner()))
        .collect();
    if !category_ids.is_empty() {
        let found = categories::Entity::find()
            .filter(categories::Column::Id.is_in(category_ids.iter().copied()))
            .filter(categories::Column::AccountId.eq(tenant))
            .count(txn)
            .await
            .map_err(|e| BudgetError::from(store_err(e)))?;
        if found != category_ids.len() as u64 {
            return Err(BudgetError::CategoryNotFound);
        }
    }

    let budget = budgets::ActiveModel {
        id: Set(BudgetId::new().into_inner()),
        account_id: Set(tenant),
        name: Set(input.name),
        description: Set(input.description),
        created_at: Set(Utc::now().into()),
    }
    .insert(txn)
    .await
    .map_err(|e| BudgetError::from(store_err(e)))?;

    let mut dates = Vec::with_capacity(input.months.len());
    let mut items = Vec::new();
    for month in input.months {
        let date = budget_dates::ActiveModel {
            id: Set(BudgetDateId::new().into_inner()),
            budget_id: Set(budget.id),
            month: Set(i32::try_from(month.month).map_err(|_| BudgetError::InvalidMonth(month.month))?),
            year: Set(month.year),
        }
        .insert(txn)
        .await
        .map_err(|e| BudgetError::from(store_err(e)))?;

        for item in month.items {
            let row = budget_items::ActiveModel {
                id: Set(BudgetItemId::new().into_inner()),
                budget_date_id: Set(date.id),
                category_id: Set(item.category_id.into_inner()),
                amount: Set(item.amount.minor_units()),
            }
            .insert(txn)
            .await
            .map_err(|e| BudgetError::from(store_err(e)))?;
            items.push(BudgetItem::from(row));
        }

        dates.push(BudgetDate::try_from(date)?);
    }

    Ok(CreatedBudget {
        budget: budget.into(),
        dates,
        items,
    })
}

impl BudgetLookup for BudgetRepository {
    async fn get_budget_date_by_id(
        &self,
        id: BudgetDateId,
        account_id: TenantId,
    ) -> Result<Option<BudgetDate>, StoreError> {
        let model = budget_dates::Entity::find_by_id(id.into_inner())
            .inner_join(budgets::Entity)
            .filter(budgets::Column::AccountId.eq(account_id.into_inner()))
            .one(&self.db)
            .await
            .map_err(store_err)?;

        model.map(BudgetDate::try_from).transpose()
    }
}
