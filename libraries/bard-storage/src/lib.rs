//! Bard Storage
//!
//! `SQLite`-backed asset repository for Bard.
//!
//! This crate persists the three asset partitions (audio, images, data) and
//! layers JSON document storage on top of them.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: `assets` owns its queries, `data_objects` owns the
//!   document codec
//! - **Atomic Writes**: every write is a single upsert or a single transaction,
//!   so a reader never observes a half-written entry or a half-replaced class
//! - **Trait Boundary**: callers use `bard_core::AssetStore`; `LocalAssetStore`
//!   is the `SQLite` implementation
//!
//! # Example
//!
//! ```rust,no_run
//! use bard_storage::{LocalAssetStore, create_pool, run_migrations};
//! use bard_core::{AssetStore, AssetClass};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create database connection
//! let pool = create_pool("sqlite://campaign.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = LocalAssetStore::new(pool);
//!
//! // Get all audio assets
//! let tracks = store.get_all(AssetClass::Audio).await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod assets;
pub mod data_objects;

pub use context::LocalAssetStore;
pub use error::{Result, StorageError};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> std::result::Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://campaign.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> std::result::Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "creating asset store pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!(database_url, "asset store pool ready");

    Ok(pool)
}

/// Open a store at `database_url` with migrations applied
pub async fn open(database_url: &str) -> Result<LocalAssetStore> {
    let pool = create_pool(database_url).await?;
    run_migrations(&pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))?;
    Ok(LocalAssetStore::new(pool))
}
