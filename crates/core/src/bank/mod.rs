//! Bank accounts and the balance ledger.
//!
//! The ledger authority ([`BankLedger`]) is the only path that may change a
//! bank account's balance. [`LedgerService`] holds the balance rules every
//! implementation applies; [`BankAccountService`] validates onboarding input.

pub mod error;
pub mod ledger;
pub mod repository;
pub mod service;
pub mod types;

pub use error::{BankAccountError, LedgerError};
pub use ledger::LedgerService;
pub use repository::{BankLedger, BankLookup};
pub use service::BankAccountService;
pub use types::{
    BankAccount, BankProvider, CreateBankAccountInput, InOutFundsInput, InOutKind,
    TransferFundsInput,
};
