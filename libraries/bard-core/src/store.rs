//! Asset store trait
//!
//! Abstracts the persistent asset repository so the mixer and the archive
//! layer never depend on a concrete database.

use crate::error::Result;
use crate::types::{AssetClass, AssetEntry};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Number of stored entries per class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassCounts {
    pub audio: usize,
    pub images: usize,
    pub data: usize,
}

impl ClassCounts {
    pub fn get(&self, class: AssetClass) -> usize {
        match class {
            AssetClass::Audio => self.audio,
            AssetClass::Image => self.images,
            AssetClass::Data => self.data,
        }
    }

    pub fn set(&mut self, class: AssetClass, count: usize) {
        match class {
            AssetClass::Audio => self.audio = count,
            AssetClass::Image => self.images = count,
            AssetClass::Data => self.data = count,
        }
    }

    pub fn total(&self) -> usize {
        self.audio + self.images + self.data
    }
}

/// Persistent store keyed by `(class, name)`
///
/// Every operation may fail with a storage error; the store never retries.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Insert or overwrite the entry with the same name, atomically
    async fn put(&self, class: AssetClass, entry: AssetEntry) -> Result<()>;

    /// Consistent snapshot of a class; order is unspecified
    async fn get_all(&self, class: AssetClass) -> Result<Vec<AssetEntry>>;

    /// Single entry, `None` when absent
    async fn get_by_name(&self, class: AssetClass, name: &str) -> Result<Option<AssetEntry>>;

    /// Delete by name; deleting a missing name succeeds
    async fn delete(&self, class: AssetClass, name: &str) -> Result<()>;

    /// Remove every entry of a class
    async fn clear(&self, class: AssetClass) -> Result<()>;

    /// Clear a class and write `entries` as one all-or-nothing unit
    async fn replace_all(&self, class: AssetClass, entries: Vec<AssetEntry>) -> Result<usize>;

    /// Whether the class holds at least one entry
    async fn exists(&self, class: AssetClass) -> Result<bool> {
        Ok(!self.get_all(class).await?.is_empty())
    }

    /// Entry counts for every class
    async fn counts(&self) -> Result<ClassCounts> {
        let mut counts = ClassCounts::default();
        for class in AssetClass::ALL {
            counts.set(class, self.get_all(class).await?.len());
        }
        Ok(counts)
    }

    /// Resource locator for an entry, or `""` when it is not available
    ///
    /// Absence is the common "optional asset not configured" path, so this
    /// never fails; storage errors are logged and reported as absence.
    async fn get_url(&self, class: AssetClass, name: &str) -> String {
        match self.get_by_name(class, name).await {
            Ok(Some(entry)) => entry.data_url(),
            Ok(None) => String::new(),
            Err(e) => {
                tracing::warn!(%class, name, error = %e, "failed to resolve asset url");
                String::new()
            }
        }
    }
}
