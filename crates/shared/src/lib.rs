//! Shared types, errors, and configuration for Finbud.
//!
//! This crate provides common types used across all other crates:
//! - Money amounts in minor currency units
//! - Typed IDs for type-safe entity references
//! - The pagination contract for list operations
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::AppError;
