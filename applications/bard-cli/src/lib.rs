//! Bard command-line tool
//!
//! Manages a campaign's asset store from the terminal: archive import and
//! export, single-asset edits, document inspection, and mixer dry runs.
//!
//! This library exposes the command layer for testing purposes.

pub mod commands;
pub mod config;
pub mod error;
pub mod state;

// Re-export commonly used types for convenience
pub use config::BardConfig;
pub use error::{CliError, Result};
pub use state::AppState;
