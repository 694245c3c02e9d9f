// ABOUTME: gwsctl configuration library
// ABOUTME: Resolves the config directory, reads config.toml and applies environment overrides

pub mod constants;
pub mod error;
pub mod paths;
pub mod settings;

pub use error::{ConfigError, ConfigResult};
pub use paths::{config_dir, config_file, credentials_file};
pub use settings::{Settings, StoreBackend};
