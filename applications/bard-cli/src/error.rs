/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(#[from] bard_core::BardError),

    #[error("Archive error: {0}")]
    Archive(#[from] bard_archive::ArchiveError),

    #[error("Mixer error: {0}")]
    Mixer(#[from] bard_mixer::MixerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<bard_storage::StorageError> for CliError {
    fn from(err: bard_storage::StorageError) -> Self {
        CliError::Storage(err.into())
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
