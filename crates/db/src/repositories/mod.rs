//! Repository implementations of the core capability traits.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod bank_account;
pub mod budget;
pub mod category;
pub mod transaction;

pub use bank_account::BankAccountRepository;
pub use budget::{BudgetRepository, CreatedBudget};
pub use category::CategoryRepository;
pub use transaction::TransactionRepository;
