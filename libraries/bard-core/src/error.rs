/// Core error types for Bard
use thiserror::Error;

/// Result type alias using `BardError`
pub type Result<T> = std::result::Result<T, BardError>;

/// Core error type for Bard
#[derive(Error, Debug)]
pub enum BardError {
    /// Storage layer unavailable, quota exceeded, connection closed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Every decode strategy was exhausted for a stored payload
    #[error("Corrupt asset: {0}")]
    CorruptAsset(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl BardError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a corrupt asset error
    pub fn corrupt_asset(msg: impl Into<String>) -> Self {
        Self::CorruptAsset(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
