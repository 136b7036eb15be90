//! Budgets, budget months, and allocation rules.

pub mod error;
pub mod repository;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::BudgetError;
pub use repository::BudgetLookup;
pub use service::BudgetService;
pub use types::{
    Budget, BudgetDate, BudgetItem, CategoryAllocation, CreateBudgetInput, CreateBudgetItemInput,
    CreateBudgetMonthInput,
};
