//! `SeaORM` Entity for budgets table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::budget_dates::Entity")]
    BudgetDates,
}

impl Related<super::budget_dates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetDates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
