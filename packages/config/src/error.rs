// ABOUTME: Error types for configuration loading
// ABOUTME: Covers unreadable or malformed config files and invalid override values

use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine a configuration directory; set {}", crate::constants::GWSCTL_CONFIG_DIR)]
    NoConfigDir,

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unknown keyring backend: {0}. Supported: keyring, memory")]
    UnknownBackend(String),

    #[error("Invalid value for {name}: {message}")]
    InvalidValue { name: &'static str, message: String },
}
