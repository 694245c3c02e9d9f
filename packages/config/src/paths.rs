// ABOUTME: Filesystem locations used by gwsctl
// ABOUTME: Config directory honours GWSCTL_CONFIG_DIR before falling back to the platform default

use std::env;
use std::path::PathBuf;

use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, CREDENTIALS_FILE_NAME, GWSCTL_CONFIG_DIR,
};
use crate::error::{ConfigError, ConfigResult};

/// Get the gwsctl configuration directory
///
/// `GWSCTL_CONFIG_DIR` wins when set (useful for tests and sandboxes),
/// otherwise `<platform config dir>/gwsctl`.
pub fn config_dir() -> ConfigResult<PathBuf> {
    if let Ok(dir) = env::var(GWSCTL_CONFIG_DIR) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

/// Path to `config.toml`
pub fn config_file() -> ConfigResult<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Path where imported OAuth client credentials are kept
pub fn credentials_file() -> ConfigResult<PathBuf> {
    Ok(config_dir()?.join(CREDENTIALS_FILE_NAME))
}
