//! Database migration runner for Finbud.
//!
//! Usage:
//!   migrator up      - Run all pending migrations (default)
//!   migrator down    - Rollback last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations
//!
//! The database URL comes from the layered configuration
//! (`config/default.toml`, `config/{RUN_MODE}.toml`, `FINBUD__DATABASE__URL`).

use anyhow::{Context, bail};
use finbud_db::migration::Migrator;
use finbud_shared::AppConfig;
use sea_orm_migration::MigratorTrait;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finbud=debug,sea_orm_migration=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let command = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());

    let config = AppConfig::load().context("failed to load configuration")?;
    let db = finbud_db::connect_with(&config.database)
        .await
        .context("failed to connect to database")?;

    match command.as_str() {
        "up" => Migrator::up(&db, None).await?,
        "down" => Migrator::down(&db, Some(1)).await?,
        "status" => Migrator::status(&db).await?,
        "fresh" => Migrator::fresh(&db).await?,
        other => bail!("unknown command `{other}`, expected one of: up, down, status, fresh"),
    }

    info!(command = %command, "migration command finished");
    Ok(())
}
