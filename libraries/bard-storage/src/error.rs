/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// A stored row could not be mapped back to an entry
    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for bard_core::BardError {
    fn from(err: StorageError) -> Self {
        bard_core::BardError::storage(err.to_string())
    }
}
