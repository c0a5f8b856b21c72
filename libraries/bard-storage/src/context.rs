use crate::assets;
use async_trait::async_trait;
use bard_core::{error::Result, AssetClass, AssetEntry, AssetStore, ClassCounts};
use sqlx::SqlitePool;

/// Local asset store using `SQLite`
#[derive(Clone)]
pub struct LocalAssetStore {
    pool: SqlitePool,
}

impl LocalAssetStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Close the underlying pool, waiting for in-flight queries
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn put(&self, class: AssetClass, entry: AssetEntry) -> Result<()> {
        assets::put(&self.pool, class, &entry).await.map_err(Into::into)
    }

    async fn get_all(&self, class: AssetClass) -> Result<Vec<AssetEntry>> {
        assets::get_all(&self.pool, class).await.map_err(Into::into)
    }

    async fn get_by_name(&self, class: AssetClass, name: &str) -> Result<Option<AssetEntry>> {
        assets::get_by_name(&self.pool, class, name)
            .await
            .map_err(Into::into)
    }

    async fn delete(&self, class: AssetClass, name: &str) -> Result<()> {
        let deleted = assets::delete(&self.pool, class, name).await?;
        if !deleted {
            tracing::debug!(%class, name, "delete of missing asset ignored");
        }
        Ok(())
    }

    async fn clear(&self, class: AssetClass) -> Result<()> {
        let removed = assets::clear(&self.pool, class).await?;
        tracing::info!(%class, removed, "cleared asset class");
        Ok(())
    }

    async fn replace_all(&self, class: AssetClass, entries: Vec<AssetEntry>) -> Result<usize> {
        assets::replace_all(&self.pool, class, &entries)
            .await
            .map_err(Into::into)
    }

    async fn exists(&self, class: AssetClass) -> Result<bool> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM assets WHERE asset_class = ? LIMIT 1")
                .bind(class.partition())
                .fetch_optional(&self.pool)
                .await
                .map_err(crate::StorageError::from)?;
        Ok(row.is_some())
    }

    async fn counts(&self) -> Result<ClassCounts> {
        assets::counts(&self.pool).await.map_err(Into::into)
    }
}
