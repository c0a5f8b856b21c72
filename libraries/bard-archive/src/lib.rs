//! Bard Archive
//!
//! Backup and transfer of the whole asset store as a single zip archive.
//!
//! # Layout
//!
//! Three flat top-level folders, `audio/`, `images/` and `data/`, one per
//! asset class. See [`layout`]. A root-level `manifest.json` carries each
//! entry's MIME type and modification time; see [`manifest`].
//!
//! # Semantics
//!
//! - Import replaces a class's contents; it never merges. Each class is
//!   written in one transaction under a per-class lock, so a failed class
//!   keeps its old contents and concurrent imports cannot interleave.
//! - A problem in one folder does not stop the other two.
//! - Export writes all three folders even when a class is empty, and writes
//!   every entry's decoded bytes under its original name.
//! - An export followed by an import restores names, payloads, MIME types and
//!   modification times.

mod error;
mod types;

pub mod exporter;
pub mod importer;
pub mod layout;
pub mod manifest;

pub use error::ArchiveError;
pub use exporter::ArchiveExporter;
pub use importer::ArchiveImporter;
pub use manifest::Manifest;
pub use types::*;

/// Re-export commonly used types
pub type Result<T> = std::result::Result<T, ArchiveError>;
