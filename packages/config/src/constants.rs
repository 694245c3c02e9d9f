// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names and defaults used across gwsctl

// Paths
pub const GWSCTL_CONFIG_DIR: &str = "GWSCTL_CONFIG_DIR";

// Secret store selection
pub const GWSCTL_KEYRING_BACKEND: &str = "GWSCTL_KEYRING_BACKEND";
pub const GWSCTL_KEYRING_SERVICE: &str = "GWSCTL_KEYRING_SERVICE";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";

/// Directory name under the platform config directory
pub const APP_DIR_NAME: &str = "gwsctl";

/// Settings file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Client credentials written by `gwsctl auth credentials`
pub const CREDENTIALS_FILE_NAME: &str = "credentials.json";

/// Keyring service name used when none is configured
pub const DEFAULT_KEYRING_SERVICE: &str = "gwsctl";
