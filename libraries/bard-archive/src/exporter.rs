//! Archive export: pack the whole asset store into a zip

use crate::manifest::{Manifest, MANIFEST_PATH};
use crate::{layout, Result};
use bard_core::{codec, AssetClass, AssetEntry, AssetStore};
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::borrow::Cow;
use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::Arc;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Archive exporter
#[derive(Clone)]
pub struct ArchiveExporter {
    store: Arc<dyn AssetStore>,
}

impl ArchiveExporter {
    /// Create a new exporter reading from `store`
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        Self { store }
    }

    /// Export every asset class into an in-memory zip archive
    pub async fn export_archive(&self) -> Result<Vec<u8>> {
        let mut snapshot = Vec::with_capacity(AssetClass::ALL.len());
        for class in AssetClass::ALL {
            snapshot.push((class, self.store.get_all(class).await?));
        }

        let bytes = write_archive(&snapshot)?;
        tracing::info!(
            entries = snapshot.iter().map(|(_, entries)| entries.len()).sum::<usize>(),
            bytes = bytes.len(),
            "exported archive"
        );
        Ok(bytes)
    }

    /// Export to a file on disk, returning the archive size in bytes
    pub async fn export_to_file(&self, path: &Path) -> Result<usize> {
        let bytes = self.export_archive().await?;
        tokio::fs::write(path, &bytes).await?;
        Ok(bytes.len())
    }
}

fn write_archive(snapshot: &[(AssetClass, Vec<AssetEntry>)]) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    writer.start_file(MANIFEST_PATH, options)?;
    writer.write_all(&Manifest::from_snapshot(snapshot).to_vec()?)?;

    for (class, entries) in snapshot {
        writer.add_directory(class.folder(), SimpleFileOptions::default())?;

        for entry in entries {
            if entry.name.contains('/') {
                tracing::warn!(%class, name = %entry.name, "entry name has a path separator and will not re-import");
            }
            let entry_options = match zip_time(entry.last_modified) {
                Some(time) => options.last_modified_time(time),
                None => options,
            };
            writer.start_file(layout::entry_path(*class, &entry.name), entry_options)?;
            writer.write_all(&entry_bytes(entry))?;
        }
    }

    Ok(writer.finish()?.into_inner())
}

/// Zip timestamp for an entry, for tools that list the archive
///
/// Zip times have two-second precision and cannot represent years before
/// 1980; the manifest keeps the exact value.
fn zip_time(time: DateTime<Utc>) -> Option<zip::DateTime> {
    let year = u16::try_from(time.year()).ok()?;
    zip::DateTime::from_date_and_time(
        year,
        time.month() as u8,
        time.day() as u8,
        time.hour() as u8,
        time.minute() as u8,
        time.second() as u8,
    )
    .ok()
}

/// The file contents for an entry
///
/// Payloads are normally base64 of the original file. Anything else (plain
/// JSON written by old versions) is exported as its text.
fn entry_bytes(entry: &AssetEntry) -> Cow<'_, [u8]> {
    match codec::decode_bytes(&entry.payload) {
        Ok(bytes) => Cow::Owned(bytes),
        Err(_) => {
            tracing::debug!(name = %entry.name, "payload is not base64, exporting text verbatim");
            Cow::Borrowed(entry.payload.as_bytes())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_payloads_export_as_raw_bytes() {
        let entry = AssetEntry::from_bytes(AssetClass::Audio, "chime.wav", &[0, 159, 146, 150]);
        assert_eq!(entry_bytes(&entry).as_ref(), &[0, 159, 146, 150]);
    }

    #[test]
    fn zip_time_follows_entry_time() {
        use chrono::TimeZone;

        let time = zip_time(Utc.with_ymd_and_hms(2026, 3, 1, 18, 4, 11).unwrap()).unwrap();
        assert_eq!(time.year(), 2026);
        assert_eq!(time.month(), 3);
        assert_eq!(time.hour(), 18);
        assert!(zip_time(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap()).is_none());
    }

    #[test]
    fn plain_text_payloads_export_verbatim() {
        let entry = AssetEntry::new("characters.json", r#"[{"name":"Brom"}]"#, "application/json");
        assert_eq!(entry_bytes(&entry).as_ref(), br#"[{"name":"Brom"}]"#);
    }
}
