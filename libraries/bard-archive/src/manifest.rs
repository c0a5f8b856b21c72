//! Archive manifest
//!
//! A root-level `manifest.json` records what the folder layout cannot carry:
//! each entry's MIME type and modification time. It sits outside the class
//! folders, so [`crate::layout::classify_entry`] never treats it as an asset.
//!
//! ```json
//! {
//!   "version": 1,
//!   "entries": {
//!     "images/portrait": { "mimeType": "image/jpeg", "lastModified": "2026-03-01T18:04:11.250Z" }
//!   }
//! }
//! ```
//!
//! Archives without a manifest (hand-made zips, older exports) still import;
//! MIME types are then inferred from file extensions and entries are stamped
//! with the import time.

use crate::layout;
use bard_core::{AssetClass, AssetEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Archive path of the manifest
pub const MANIFEST_PATH: &str = "manifest.json";

const MANIFEST_VERSION: u32 = 1;

/// Metadata kept for one archived entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryMetadata {
    pub mime_type: String,
    pub last_modified: DateTime<Utc>,
}

/// Entry metadata keyed by archive path (`<folder>/<name>`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: u32,
    #[serde(default)]
    pub entries: BTreeMap<String, EntryMetadata>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            version: MANIFEST_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

impl Manifest {
    /// Build a manifest describing every entry of a store snapshot
    pub fn from_snapshot(snapshot: &[(AssetClass, Vec<AssetEntry>)]) -> Self {
        let entries = snapshot
            .iter()
            .flat_map(|(class, entries)| {
                entries.iter().map(move |entry| {
                    (
                        layout::entry_path(*class, &entry.name),
                        EntryMetadata {
                            mime_type: entry.mime_type.clone(),
                            last_modified: entry.last_modified,
                        },
                    )
                })
            })
            .collect();

        Self {
            version: MANIFEST_VERSION,
            entries,
        }
    }

    /// Parse a manifest read from an archive
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        let manifest: Self = serde_json::from_slice(bytes)?;
        if manifest.version > MANIFEST_VERSION {
            tracing::warn!(
                version = manifest.version,
                supported = MANIFEST_VERSION,
                "archive manifest is newer than this reader"
            );
        }
        Ok(manifest)
    }

    pub fn to_vec(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
    }

    pub fn get(&self, path: &str) -> Option<&EntryMetadata> {
        self.entries.get(path)
    }

    /// Overwrite an imported entry's inferred metadata with the recorded one
    ///
    /// Entries missing from the manifest are left as they are.
    pub fn apply(&self, path: &str, entry: &mut AssetEntry) {
        if let Some(metadata) = self.get(path) {
            entry.mime_type.clone_from(&metadata.mime_type);
            entry.last_modified = metadata.last_modified;
        }
    }
}
