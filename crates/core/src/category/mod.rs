//! Spending and income categories.

pub mod repository;
pub mod types;

pub use repository::CategoryLookup;
pub use types::Category;
