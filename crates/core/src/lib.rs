//! Core business logic for Finbud.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Domain types, capability traits for the persistence layer, and the
//! transaction engine live here.
//!
//! # Modules
//!
//! - `bank` - Bank accounts, onboarding rules, and the balance ledger contract
//! - `budget` - Budgets, budget months, and allocation rules
//! - `category` - Spending/income categories
//! - `transaction` - The transaction engine and the append-only ledger records
//! - `store` - Errors shared by every persistence capability

pub mod bank;
pub mod budget;
pub mod category;
pub mod store;
pub mod transaction;

pub use store::StoreError;
pub use transaction::{TransactionEngine, TransactionError};
