//! Common types used across the application.

pub mod id;
pub mod money;
pub mod pagination;

pub use id::*;
pub use money::{MAX_BALANCE, Money};
pub use pagination::{PageParams, PageRequest, Paginated, Paging};
