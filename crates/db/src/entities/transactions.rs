//! `SeaORM` Entity for transactions table.
//!
//! A `TRANSFER` row fills `bank_account_from_id`/`bank_account_to_id`; an
//! `IN`/`OUT` row fills `bank_account_id`/`category_id`. A table `CHECK`
//! enforces the shape.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::TransactionKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_id: Uuid,
    pub kind: TransactionKind,
    pub name: String,
    pub amount: i64,
    pub bank_account_from_id: Option<Uuid>,
    pub bank_account_to_id: Option<Uuid>,
    pub bank_account_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub budget_date_id: Uuid,
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub is_system_managed: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::budget_dates::Entity",
        from = "Column::BudgetDateId",
        to = "super::budget_dates::Column::Id"
    )]
    BudgetDates,
}

impl Related<super::budget_dates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetDates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
