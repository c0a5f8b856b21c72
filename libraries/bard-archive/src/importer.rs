//! Archive import: unpack a zip into the asset store, one class at a time

use crate::manifest::{Manifest, MANIFEST_PATH};
use crate::{layout, ArchiveError, ClassFailure, ImportSummary, Result};
use bard_core::{AssetClass, AssetEntry, AssetStore};
use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use zip::ZipArchive;

/// One lock per asset class, held across the whole replace of that class
#[derive(Default)]
struct ClassLocks {
    audio: Mutex<()>,
    images: Mutex<()>,
    data: Mutex<()>,
}

impl ClassLocks {
    fn get(&self, class: AssetClass) -> &Mutex<()> {
        match class {
            AssetClass::Audio => &self.audio,
            AssetClass::Image => &self.images,
            AssetClass::Data => &self.data,
        }
    }
}

/// Archive importer
///
/// Clones share the same class locks, so every clone of one importer
/// serializes imports into the same class.
#[derive(Clone)]
pub struct ArchiveImporter {
    store: Arc<dyn AssetStore>,
    locks: Arc<ClassLocks>,
}

impl ArchiveImporter {
    /// Create a new importer writing into `store`
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        Self {
            store,
            locks: Arc::new(ClassLocks::default()),
        }
    }

    /// Import a zip archive held in memory
    ///
    /// Every class with at least one file in the archive has its stored
    /// contents replaced by exactly the archive's files. Classes with no
    /// files in the archive are left untouched.
    pub async fn import_archive(&self, bytes: &[u8]) -> Result<ImportSummary> {
        let contents = read_archive(bytes)?;
        if contents.entries.is_empty() && contents.failures.is_empty() {
            return Err(ArchiveError::EmptyArchive);
        }

        let mut summary = ImportSummary {
            failures: contents.failures,
            ..ImportSummary::default()
        };
        let mut written_classes = 0;

        for (class, entries) in contents.entries {
            let _guard = self.locks.get(class).lock().await;
            let discovered = entries.len();

            match self.store.replace_all(class, entries).await {
                Ok(written) => {
                    tracing::info!(%class, discovered, written, "imported asset class");
                    summary.record(class, written);
                    written_classes += 1;
                }
                Err(e) => {
                    tracing::error!(%class, error = %e, "failed to import asset class");
                    summary.failures.push(ClassFailure {
                        class,
                        message: e.to_string(),
                    });
                }
            }
        }

        if written_classes == 0 {
            return Err(ArchiveError::NothingWritten {
                failed: summary.failures.len(),
            });
        }

        Ok(summary)
    }

    /// Import a zip archive from disk
    pub async fn import_from_file(&self, path: &Path) -> Result<ImportSummary> {
        let bytes = tokio::fs::read(path).await?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "read archive file");
        self.import_archive(&bytes).await
    }
}

/// Files found in an archive, grouped by class
struct ArchiveContents {
    entries: BTreeMap<AssetClass, Vec<AssetEntry>>,
    failures: Vec<ClassFailure>,
}

/// Parse the container and read every file of the layout
///
/// A file that cannot be read abandons its whole class; the other classes
/// are still read.
fn read_archive(bytes: &[u8]) -> Result<ArchiveContents> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ArchiveError::MalformedArchive(e.to_string()))?;

    let paths: Vec<String> = archive.file_names().map(str::to_owned).collect();
    let manifest = read_manifest(&mut archive);
    let mut entries: BTreeMap<AssetClass, Vec<AssetEntry>> = BTreeMap::new();
    let mut failed: BTreeMap<AssetClass, String> = BTreeMap::new();

    for path in &paths {
        let Some((class, name)) = layout::classify_entry(path) else {
            tracing::debug!(path, "ignoring archive entry outside class folders");
            continue;
        };
        if failed.contains_key(&class) {
            continue;
        }

        match read_file(&mut archive, path) {
            Ok(data) => {
                let mut entry = AssetEntry::from_bytes(class, name, &data);
                manifest.apply(path, &mut entry);
                entries.entry(class).or_default().push(entry);
            }
            Err(e) => {
                tracing::warn!(path, %class, error = %e, "unreadable archive entry, skipping class");
                failed.insert(class, format!("{path}: {e}"));
            }
        }
    }

    let failures = failed
        .into_iter()
        .map(|(class, message)| {
            entries.remove(&class);
            ClassFailure { class, message }
        })
        .collect();

    Ok(ArchiveContents { entries, failures })
}

/// Read the manifest, if the archive has a usable one
///
/// A missing or unreadable manifest is not an error: the files themselves are
/// the archive's contents, and their metadata falls back to inference.
fn read_manifest(archive: &mut ZipArchive<Cursor<&[u8]>>) -> Manifest {
    if archive.index_for_name(MANIFEST_PATH).is_none() {
        return Manifest::default();
    }

    let parsed = read_file(archive, MANIFEST_PATH)
        .and_then(|bytes| Manifest::from_slice(&bytes).map_err(ArchiveError::from));
    match parsed {
        Ok(manifest) => {
            tracing::debug!(entries = manifest.entries.len(), "read archive manifest");
            manifest
        }
        Err(e) => {
            tracing::warn!(error = %e, "unreadable archive manifest, inferring metadata");
            Manifest::default()
        }
    }
}

fn read_file(archive: &mut ZipArchive<Cursor<&[u8]>>, path: &str) -> Result<Vec<u8>> {
    let mut file = archive.by_name(path)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    Ok(data)
}
