//! Error types for archive import/export

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Malformed archive: {0}")]
    MalformedArchive(String),

    #[error("Archive contains no files under audio/, images/ or data/")]
    EmptyArchive,

    #[error("No asset class could be imported ({failed} failed)")]
    NothingWritten { failed: usize },

    #[error("Storage error: {0}")]
    Storage(#[from] bard_core::BardError),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
