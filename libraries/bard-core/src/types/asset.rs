use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BardError;

/// Storage partition for an asset
///
/// Partition and folder names are a compatibility surface: renaming them
/// breaks existing saved campaigns and archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Audio,
    #[serde(rename = "images")]
    Image,
    Data,
}

impl AssetClass {
    /// Every class, in archive order
    pub const ALL: [AssetClass; 3] = [AssetClass::Audio, AssetClass::Image, AssetClass::Data];

    /// Persisted partition name
    pub fn partition(self) -> &'static str {
        match self {
            AssetClass::Audio => "audio",
            AssetClass::Image => "images",
            AssetClass::Data => "data",
        }
    }

    /// Top-level archive folder (with trailing slash)
    pub fn folder(self) -> &'static str {
        match self {
            AssetClass::Audio => "audio/",
            AssetClass::Image => "images/",
            AssetClass::Data => "data/",
        }
    }

    /// Look up a class by its partition name
    pub fn from_partition(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.partition() == name)
    }

    /// MIME type used when the file extension is unknown
    pub fn default_mime_type(self) -> &'static str {
        match self {
            AssetClass::Audio => "audio/mpeg",
            AssetClass::Image => "image/png",
            AssetClass::Data => "application/json",
        }
    }

    /// Infer a MIME type from a file name
    ///
    /// Only the extension is consulted, and only after the class has been
    /// decided by the caller; the extension never changes the class.
    pub fn infer_mime_type(self, file_name: &str) -> &'static str {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());

        let inferred = match (self, extension.as_deref()) {
            (AssetClass::Audio, Some("mp3")) => Some("audio/mpeg"),
            (AssetClass::Audio, Some("wav")) => Some("audio/wav"),
            (AssetClass::Audio, Some("ogg" | "oga")) => Some("audio/ogg"),
            (AssetClass::Audio, Some("flac")) => Some("audio/flac"),
            (AssetClass::Audio, Some("m4a" | "aac")) => Some("audio/mp4"),
            (AssetClass::Audio, Some("opus")) => Some("audio/opus"),
            (AssetClass::Audio, Some("webm")) => Some("audio/webm"),
            (AssetClass::Image, Some("png")) => Some("image/png"),
            (AssetClass::Image, Some("jpg" | "jpeg")) => Some("image/jpeg"),
            (AssetClass::Image, Some("gif")) => Some("image/gif"),
            (AssetClass::Image, Some("webp")) => Some("image/webp"),
            (AssetClass::Image, Some("svg")) => Some("image/svg+xml"),
            (AssetClass::Image, Some("bmp")) => Some("image/bmp"),
            (AssetClass::Data, Some("json")) => Some("application/json"),
            (AssetClass::Data, Some("md" | "markdown")) => Some("text/markdown"),
            (AssetClass::Data, Some("txt")) => Some("text/plain"),
            _ => None,
        };

        inferred.unwrap_or_else(|| self.default_mime_type())
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.partition())
    }
}

impl FromStr for AssetClass {
    type Err = BardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "audio" => Ok(AssetClass::Audio),
            "image" | "images" => Ok(AssetClass::Image),
            "data" => Ok(AssetClass::Data),
            other => Err(BardError::invalid_input(format!(
                "unknown asset class '{other}' (expected audio, images or data)"
            ))),
        }
    }
}

/// A stored asset
///
/// `name` is the identity key within its class. `payload` is the
/// transport-safe text form produced by [`crate::codec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetEntry {
    pub name: String,
    pub payload: String,
    pub mime_type: String,
    pub last_modified: DateTime<Utc>,
}

impl AssetEntry {
    /// Create an entry stamped with the current time
    ///
    /// The timestamp is truncated to milliseconds, the precision the store keeps.
    pub fn new(
        name: impl Into<String>,
        payload: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            payload: payload.into(),
            mime_type: mime_type.into(),
            last_modified: Utc::now().trunc_subsecs(3),
        }
    }

    /// Create an entry from raw file bytes, inferring the MIME type
    pub fn from_bytes(class: AssetClass, name: impl Into<String>, bytes: &[u8]) -> Self {
        let name = name.into();
        let mime_type = class.infer_mime_type(&name);
        Self::new(name, crate::codec::encode_bytes(bytes), mime_type)
    }

    /// Resource locator for this entry
    pub fn data_url(&self) -> String {
        crate::codec::data_url(&self.mime_type, &self.payload)
    }
}

/// Extract the storage key from a path-shaped track id
///
/// Callers identify tracks as `/audio/<name>`; only the trailing component is
/// meaningful to the store.
pub fn asset_name_from_track_id(track_id: &str) -> &str {
    track_id
        .rsplit('/')
        .next()
        .unwrap_or(track_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_names_are_stable() {
        assert_eq!(AssetClass::Audio.partition(), "audio");
        assert_eq!(AssetClass::Image.partition(), "images");
        assert_eq!(AssetClass::Data.partition(), "data");
        assert_eq!(AssetClass::Image.folder(), "images/");
    }

    #[test]
    fn serde_uses_partition_names() {
        let json = serde_json::to_string(&AssetClass::ALL).unwrap();
        assert_eq!(json, r#"["audio","images","data"]"#);
    }

    #[test]
    fn parse_class() {
        assert_eq!("Images".parse::<AssetClass>().unwrap(), AssetClass::Image);
        assert_eq!("image".parse::<AssetClass>().unwrap(), AssetClass::Image);
        assert!("video".parse::<AssetClass>().is_err());
        assert_eq!(AssetClass::from_partition("data"), Some(AssetClass::Data));
        assert_eq!(AssetClass::from_partition("image"), None);
    }

    #[test]
    fn mime_inference() {
        assert_eq!(AssetClass::Audio.infer_mime_type("rain.OGG"), "audio/ogg");
        assert_eq!(AssetClass::Image.infer_mime_type("map.jpeg"), "image/jpeg");
        assert_eq!(AssetClass::Data.infer_mime_type("locations.json"), "application/json");
        // Extension does not override the class
        assert_eq!(AssetClass::Image.infer_mime_type("song.mp3"), "image/png");
        assert_eq!(AssetClass::Audio.infer_mime_type("no_extension"), "audio/mpeg");
    }

    #[test]
    fn track_id_to_asset_name() {
        assert_eq!(asset_name_from_track_id("/audio/tavern.mp3"), "tavern.mp3");
        assert_eq!(asset_name_from_track_id("tavern.mp3"), "tavern.mp3");
        assert_eq!(asset_name_from_track_id("/audio/"), "");
    }
}
