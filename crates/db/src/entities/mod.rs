//! `SeaORM` entity definitions.

pub mod bank_accounts;
pub mod bank_providers;
pub mod budget_dates;
pub mod budget_items;
pub mod budgets;
pub mod categories;
pub mod sea_orm_active_enums;
pub mod transactions;
