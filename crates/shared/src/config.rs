//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Pagination limits applied to list operations.
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Seconds to wait for a pooled connection before giving up.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_acquire_timeout() -> u64 {
    8
}

/// Pagination configuration.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when the caller does not provide one.
    #[serde(default = "default_page_size")]
    pub default_limit: u32,
    /// Largest page size a caller may request.
    #[serde(default = "default_max_page_size")]
    pub max_limit: u32,
}

fn default_page_size() -> u32 {
    10
}

fn default_max_page_size() -> u32 {
    100
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_page_size(),
            max_limit: default_max_page_size(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones: `config/default`,
    /// `config/{RUN_MODE}`, then `FINBUD__*` environment variables
    /// (e.g. `FINBUD__DATABASE__URL`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FINBUD").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
