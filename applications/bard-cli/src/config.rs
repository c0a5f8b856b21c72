/// Bard configuration
use crate::error::{CliError, Result};
use bard_mixer::MixerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file read when no path is given, if present
pub const DEFAULT_CONFIG_FILE: &str = "bard.toml";

/// Prefix for environment overrides, e.g. `BARD_STORAGE__DATABASE_URL`
pub const ENV_PREFIX: &str = "BARD";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BardConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub logging: LoggingSettings,

    #[serde(default)]
    pub mixer: MixerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl BardConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `bard.toml` in the working
    /// directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`BardConfig::load`], reading overrides from `env` instead of the
    /// process environment when given
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Nested keys use a double underscore: BARD_MIXER__FADE_IN_MS
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.database_url.trim().is_empty() {
            return Err(CliError::Config(
                "storage.database_url must not be empty".to_string(),
            ));
        }

        tracing_subscriber::EnvFilter::try_new(&self.logging.filter).map_err(|e| {
            CliError::Config(format!(
                "invalid logging.filter '{}': {e}",
                self.logging.filter
            ))
        })?;

        self.mixer
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

// Default values
fn default_database_url() -> String {
    "sqlite://./bard.db".to_string()
}

fn default_log_filter() -> String {
    "bard=info,bard_cli=info,bard_storage=info,bard_archive=info,bard_mixer=info".to_string()
}
