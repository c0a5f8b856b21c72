//! Command implementations
//!
//! Each command returns data; printing is left to the binary.

use crate::error::{CliError, Result};
use crate::state::AppState;
use bard_archive::ImportSummary;
use bard_core::{AssetClass, AssetEntry, AssetStore, ClassCounts, LocationTree};
use bard_mixer::{ActiveTrack, SilentEngine};
use bard_storage::data_objects;
use std::path::Path;
use std::sync::Arc;

/// Import an archive file, replacing the classes it contains
pub async fn import(state: &AppState, path: &Path) -> Result<ImportSummary> {
    let summary = state.importer.import_from_file(path).await?;
    for failure in &summary.failures {
        tracing::warn!(class = %failure.class, message = %failure.message, "class not imported");
    }
    Ok(summary)
}

/// Export the whole store to an archive file, returning its size in bytes
pub async fn export(state: &AppState, path: &Path) -> Result<usize> {
    Ok(state.exporter.export_to_file(path).await?)
}

/// List entries of one class, or of every class
pub async fn list(
    state: &AppState,
    class: Option<AssetClass>,
) -> Result<Vec<(AssetClass, AssetEntry)>> {
    let classes = match class {
        Some(class) => vec![class],
        None => AssetClass::ALL.to_vec(),
    };

    let mut listed = Vec::new();
    for class in classes {
        listed.extend(
            state
                .store
                .get_all(class)
                .await?
                .into_iter()
                .map(|entry| (class, entry)),
        );
    }
    Ok(listed)
}

/// Per-class entry counts
pub async fn status(state: &AppState) -> Result<ClassCounts> {
    Ok(state.store.counts().await?)
}

/// Store a file from disk, replacing any entry with the same name
///
/// The entry name defaults to the file name.
pub async fn add(
    state: &AppState,
    class: AssetClass,
    file: &Path,
    name: Option<&str>,
) -> Result<AssetEntry> {
    let name = match name {
        Some(name) => name.to_string(),
        None => file
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                CliError::InvalidInput(format!("cannot derive a name from {}", file.display()))
            })?,
    };
    if name.is_empty() || name.contains('/') {
        return Err(CliError::InvalidInput(format!(
            "asset names must be non-empty and contain no '/': '{name}'"
        )));
    }

    let bytes = tokio::fs::read(file).await?;
    let entry = AssetEntry::from_bytes(class, name, &bytes);
    state.store.put(class, entry.clone()).await?;

    tracing::info!(%class, name = %entry.name, bytes = bytes.len(), "asset stored");
    Ok(entry)
}

/// Delete one entry; deleting a missing entry is not an error
pub async fn remove(state: &AppState, class: AssetClass, name: &str) -> Result<()> {
    Ok(state.store.delete(class, name).await?)
}

/// Clear the given classes
pub async fn clear(state: &AppState, classes: &[AssetClass]) -> Result<()> {
    for class in classes {
        state.store.clear(*class).await?;
    }
    Ok(())
}

/// Data URL for an entry, or `None` if it does not exist
pub async fn url(state: &AppState, class: AssetClass, name: &str) -> Option<String> {
    let url = state.store.get_url(class, name).await;
    (!url.is_empty()).then_some(url)
}

/// Decode a JSON document from the data class
pub async fn show_data(state: &AppState, name: &str) -> Result<Option<serde_json::Value>> {
    Ok(data_objects::get_data_object(&*state.store, name).await?)
}

/// Dry-run the mixer over a path through the stored locations
///
/// Returns the active tracks after entering each location in turn.
pub async fn walk(state: &AppState, route: &[String]) -> Result<Vec<Vec<ActiveTrack>>> {
    let locations = data_objects::load_locations(&*state.store).await?;
    if locations.is_empty() {
        tracing::warn!("no locations stored; every step will be silent");
    }
    let tree = LocationTree::new(locations);
    let mixer = state.mixer(Arc::new(SilentEngine));

    let mut steps = Vec::with_capacity(route.len());
    for location_id in route {
        if tree.get(location_id).is_none() {
            return Err(CliError::InvalidInput(format!(
                "unknown location '{location_id}'"
            )));
        }
        mixer.play_location_audio(&tree, location_id).await;
        steps.push(mixer.active_tracks());
    }

    mixer.stop_all();
    Ok(steps)
}
