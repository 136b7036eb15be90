//! `SeaORM` Entity for bank_accounts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "bank_accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_id: Uuid,
    pub bank_provider_id: Uuid,
    pub name: String,
    pub account_number: String,
    pub branch: String,
    /// Minor units, `0..=99_999_999_999`.
    pub balance: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bank_providers::Entity",
        from = "Column::BankProviderId",
        to = "super::bank_providers::Column::Id"
    )]
    BankProviders,
}

impl Related<super::bank_providers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BankProviders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
