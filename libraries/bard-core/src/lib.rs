//! Bard Core
//!
//! Platform-agnostic core types, traits, and error handling for Bard.
//!
//! This crate provides the foundational building blocks shared by the asset
//! store, the archive importer/exporter and the audio mixer.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `AssetClass`, `AssetEntry`, `LocationNode`, `LocationTree`
//! - **Core Traits**: `AssetStore` (implemented by `bard-storage`)
//! - **Binary Codec**: transport-safe text encoding for every persisted payload
//! - **Error Handling**: Unified `BardError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use bard_core::codec;
//! use bard_core::types::{AssetClass, AssetEntry};
//!
//! let payload = codec::encode_text(r#"{"name":"Caverns of Thyme"}"#);
//! let entry = AssetEntry::new("locations.json", payload, AssetClass::Data.default_mime_type());
//!
//! let text = codec::decode_text(&entry.payload).unwrap();
//! assert!(text.contains("Thyme"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
pub mod error;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{BardError, Result};
pub use store::{AssetStore, ClassCounts};

pub use types::{
    asset_name_from_track_id, AssetClass, AssetEntry, LocationNode, LocationTree,
};
