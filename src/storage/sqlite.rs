//! SQLite connection pool backed by `sqlx`.

use crate::infra::config::AppConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to connect to the database: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Opens a connection pool for `config.database_url`.
///
/// The database file is created if missing and foreign keys are enforced on every
/// connection, so a `vendor_sweets` row can never point at a missing vendor or sweet.
/// Idle connections are never reaped: with `sqlite::memory:` the single pooled
/// connection *is* the database.
pub async fn connect(config: &AppConfig) -> Result<SqlitePool, StorageError> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect_with(options)
        .await?;

    tracing::debug!(url = %config.database_url, "Database pool ready.");
    Ok(pool)
}

/// Applies the migrations under `migrations/` (embedded at compile time).
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
