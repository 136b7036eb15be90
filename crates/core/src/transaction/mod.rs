//! Transactions: the engine and the append-only records it writes.
//!
//! [`TransactionEngine`] validates requests against tenant-scoped lookups,
//! asks the bank ledger to move the money, and then files a [`Transaction`]
//! under a budget month.

pub mod engine;
pub mod error;
pub mod repository;
pub mod types;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod engine_props;

pub use engine::TransactionEngine;
pub use error::TransactionError;
pub use repository::TransactionStore;
pub use types::{
    BudgetScope, CreateInOutRecord, CreateTransferRecord, GetListInput, InOutInput,
    MAX_NAME_LEN, Transaction, TransactionFlow, TransactionKind, TransferInput,
};
