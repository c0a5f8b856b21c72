/// Shared application state
use crate::config::BardConfig;
use crate::error::Result;
use bard_archive::{ArchiveExporter, ArchiveImporter};
use bard_core::AssetStore;
use bard_mixer::{AudioSessionManager, PlaybackEngine};
use bard_storage::LocalAssetStore;
use std::sync::Arc;

/// Everything a command needs, opened once per invocation
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<BardConfig>,
    pub store: Arc<LocalAssetStore>,
    pub importer: ArchiveImporter,
    pub exporter: ArchiveExporter,
}

impl AppState {
    /// Open the configured database (running migrations) and build services
    pub async fn open(config: BardConfig) -> Result<Self> {
        let store = Arc::new(bard_storage::open(&config.storage.database_url).await?);
        tracing::debug!(database_url = %config.storage.database_url, "store opened");
        Ok(Self::new(config, store))
    }

    pub fn new(config: BardConfig, store: Arc<LocalAssetStore>) -> Self {
        let shared: Arc<dyn AssetStore> = store.clone();
        Self {
            config: Arc::new(config),
            importer: ArchiveImporter::new(Arc::clone(&shared)),
            exporter: ArchiveExporter::new(shared),
            store,
        }
    }

    /// A mixer over this store, playing on `engine`
    pub fn mixer(&self, engine: Arc<dyn PlaybackEngine>) -> AudioSessionManager {
        AudioSessionManager::new(self.store.clone(), engine, self.config.mixer.clone())
    }

    pub async fn close(&self) {
        self.store.close().await;
    }
}
