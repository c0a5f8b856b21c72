//! Asset partitions
//!
//! Every entry lives in the `assets` table under its class partition. Writes
//! are single upserts (or one transaction for bulk replacement), so readers see
//! either the previous or the new entry, never a mix.
//!
//! # Example
//!
//! ```rust,no_run
//! use bard_core::{AssetClass, AssetEntry};
//! use bard_storage::assets;
//! # async fn example(pool: &sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//! let entry = AssetEntry::from_bytes(AssetClass::Audio, "rain.ogg", b"OggS...");
//! assets::put(pool, AssetClass::Audio, &entry).await?;
//!
//! let stored = assets::get_by_name(pool, AssetClass::Audio, "rain.ogg").await?;
//! assert!(stored.is_some());
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;

use bard_core::{AssetClass, AssetEntry, ClassCounts};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

use crate::error::{Result, StorageError};

const UPSERT: &str = "INSERT INTO assets (asset_class, name, payload, mime_type, last_modified)
     VALUES (?, ?, ?, ?, ?)
     ON CONFLICT(asset_class, name) DO UPDATE SET
        payload = excluded.payload,
        mime_type = excluded.mime_type,
        last_modified = excluded.last_modified";

/// Insert or overwrite an entry
///
/// # Errors
///
/// Returns an error if the database query fails
pub async fn put(pool: &SqlitePool, class: AssetClass, entry: &AssetEntry) -> Result<()> {
    let mut conn = pool.acquire().await?;
    upsert(&mut *conn, class, entry).await
}

/// Get every entry of a class
///
/// Ordered by name for stable output; callers must not rely on it.
pub async fn get_all(pool: &SqlitePool, class: AssetClass) -> Result<Vec<AssetEntry>> {
    let rows = sqlx::query(
        "SELECT name, payload, mime_type, last_modified FROM assets
         WHERE asset_class = ? ORDER BY name",
    )
    .bind(class.partition())
    .fetch_all(pool)
    .await?;

    rows.iter().map(entry_from_row).collect()
}

/// Get a single entry by name
///
/// Returns `Ok(None)` when the name is not stored.
pub async fn get_by_name(
    pool: &SqlitePool,
    class: AssetClass,
    name: &str,
) -> Result<Option<AssetEntry>> {
    let row = sqlx::query(
        "SELECT name, payload, mime_type, last_modified FROM assets
         WHERE asset_class = ? AND name = ?",
    )
    .bind(class.partition())
    .bind(name)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(entry_from_row).transpose()
}

/// Delete an entry
///
/// Returns `Ok(true)` if an entry was deleted, `Ok(false)` if none existed.
pub async fn delete(pool: &SqlitePool, class: AssetClass, name: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM assets WHERE asset_class = ? AND name = ?")
        .bind(class.partition())
        .bind(name)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove every entry of a class, returning how many were removed
pub async fn clear(pool: &SqlitePool, class: AssetClass) -> Result<u64> {
    let result = sqlx::query("DELETE FROM assets WHERE asset_class = ?")
        .bind(class.partition())
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Replace the whole contents of a class in one transaction
///
/// Either the class ends up holding exactly `entries`, or (on any failure) it
/// keeps its previous contents. Duplicate names collapse to the last one.
/// Returns the number of entries written.
pub async fn replace_all(
    pool: &SqlitePool,
    class: AssetClass,
    entries: &[AssetEntry],
) -> Result<usize> {
    let unique: BTreeMap<&str, &AssetEntry> = entries
        .iter()
        .map(|entry| (entry.name.as_str(), entry))
        .collect();

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM assets WHERE asset_class = ?")
        .bind(class.partition())
        .execute(&mut *tx)
        .await?;

    for entry in unique.values() {
        upsert(&mut *tx, class, entry).await?;
    }

    tx.commit().await?;

    tracing::debug!(%class, written = unique.len(), "replaced asset class");
    Ok(unique.len())
}

/// Count entries per class
pub async fn counts(pool: &SqlitePool) -> Result<ClassCounts> {
    let rows = sqlx::query("SELECT asset_class, COUNT(*) AS total FROM assets GROUP BY asset_class")
        .fetch_all(pool)
        .await?;

    let mut counts = ClassCounts::default();
    for row in &rows {
        let partition: String = row.try_get("asset_class")?;
        let total: i64 = row.try_get("total")?;
        let class = AssetClass::from_partition(&partition).ok_or_else(|| {
            StorageError::InvalidData(format!("unknown asset partition '{partition}'"))
        })?;
        counts.set(class, usize::try_from(total).unwrap_or_default());
    }

    Ok(counts)
}

async fn upsert(conn: &mut SqliteConnection, class: AssetClass, entry: &AssetEntry) -> Result<()> {
    sqlx::query(UPSERT)
        .bind(class.partition())
        .bind(&entry.name)
        .bind(&entry.payload)
        .bind(&entry.mime_type)
        .bind(entry.last_modified.timestamp_millis())
        .execute(conn)
        .await?;

    Ok(())
}

fn entry_from_row(row: &SqliteRow) -> Result<AssetEntry> {
    let millis: i64 = row.try_get("last_modified")?;
    let last_modified: DateTime<Utc> = DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| StorageError::InvalidData(format!("invalid timestamp: {millis}")))?;

    Ok(AssetEntry {
        name: row.try_get("name")?,
        payload: row.try_get("payload")?,
        mime_type: row.try_get("mime_type")?,
        last_modified,
    })
}
