//! JSON documents stored in the `data` partition
//!
//! Application state (locations, characters) is saved as whole JSON documents.
//! Reads go through the codec's three-tier fallback so campaigns written by
//! older encoders stay readable; an unreadable or missing document reads as
//! `None` and callers substitute an empty collection.
//!
//! # Example
//!
//! ```rust,no_run
//! use bard_storage::data_objects;
//! # async fn example(store: &bard_storage::LocalAssetStore) -> Result<(), Box<dyn std::error::Error>> {
//! let mut locations = data_objects::load_locations(store).await?;
//! locations.push(bard_core::LocationNode::new("harbor"));
//! data_objects::save_locations(store, &locations).await?;
//! # Ok(())
//! # }
//! ```

use bard_core::{codec, error::Result, AssetClass, AssetEntry, AssetStore, LocationNode};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Document holding every map location
pub const LOCATIONS_DOCUMENT: &str = "locations.json";

/// Document holding every character record
pub const CHARACTERS_DOCUMENT: &str = "characters.json";

const DOCUMENT_MIME_TYPE: &str = "application/json";

/// Serialize `value` and store it under `name`, replacing any previous value
pub async fn save_data_object<S, T>(store: &S, name: &str, value: &T) -> Result<()>
where
    S: AssetStore + ?Sized,
    T: Serialize + ?Sized,
{
    let text = serde_json::to_string(value)?;
    let entry = AssetEntry::new(name, codec::encode_text(&text), DOCUMENT_MIME_TYPE);
    store.put(AssetClass::Data, entry).await?;

    tracing::debug!(name, bytes = text.len(), "saved data object");
    Ok(())
}

/// Load the document stored under `name`
///
/// Returns `Ok(None)` when the document does not exist or no decode strategy
/// yields a value of type `T`. Storage failures are returned as errors.
pub async fn get_data_object<S, T>(store: &S, name: &str) -> Result<Option<T>>
where
    S: AssetStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(entry) = store.get_by_name(AssetClass::Data, name).await? else {
        return Ok(None);
    };

    match codec::decode_with(&entry.payload, |text| serde_json::from_str::<T>(text).ok()) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(name, error = %e, "data object unreadable, treating as absent");
            Ok(None)
        }
    }
}

/// Load all locations, or an empty list if none are stored or readable
pub async fn load_locations<S>(store: &S) -> Result<Vec<LocationNode>>
where
    S: AssetStore + ?Sized,
{
    Ok(get_data_object(store, LOCATIONS_DOCUMENT)
        .await?
        .unwrap_or_default())
}

/// Replace the stored locations
pub async fn save_locations<S>(store: &S, locations: &[LocationNode]) -> Result<()>
where
    S: AssetStore + ?Sized,
{
    save_data_object(store, LOCATIONS_DOCUMENT, locations).await
}

/// Load all character records
///
/// Characters are opaque to the store; each record is kept as raw JSON.
pub async fn load_characters<S>(store: &S) -> Result<Vec<serde_json::Value>>
where
    S: AssetStore + ?Sized,
{
    Ok(get_data_object(store, CHARACTERS_DOCUMENT)
        .await?
        .unwrap_or_default())
}

/// Replace the stored character records
pub async fn save_characters<S>(store: &S, characters: &[serde_json::Value]) -> Result<()>
where
    S: AssetStore + ?Sized,
{
    save_data_object(store, CHARACTERS_DOCUMENT, characters).await
}
