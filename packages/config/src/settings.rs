// ABOUTME: Runtime settings loaded from config.toml with environment overrides
// ABOUTME: Selects the secret store backend and keyring service name at process start

use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::constants::{DEFAULT_KEYRING_SERVICE, GWSCTL_KEYRING_BACKEND, GWSCTL_KEYRING_SERVICE};
use crate::error::{ConfigError, ConfigResult};
use crate::paths::config_file;

/// Which secret store implementation backs the token store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// OS-native secure credential storage
    #[default]
    Keyring,
    /// Process-local storage, discarded on exit
    Memory,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyring => write!(f, "keyring"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "keyring" | "keychain" | "os" => Ok(Self::Keyring),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

/// On-disk shape of config.toml; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    keyring_backend: Option<String>,
    keyring_service: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub keyring_backend: StoreBackend,
    pub keyring_service: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keyring_backend: StoreBackend::default(),
            keyring_service: DEFAULT_KEYRING_SERVICE.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default config file and the process environment
    pub fn load() -> ConfigResult<Self> {
        let path = config_file()?;
        Self::load_from(&path, |name| env::var(name).ok())
    }

    /// Load settings from `path` (missing file means defaults), then apply
    /// overrides from `lookup`
    pub fn load_from<F>(path: &Path, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config file at {}", path.display());
                None
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let file: FileSettings = match contents {
            Some(contents) => toml::from_str(&contents).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?,
            None => FileSettings::default(),
        };

        let mut settings = Settings::default();

        if let Some(backend) = file.keyring_backend {
            settings.keyring_backend = backend.parse()?;
        }
        if let Some(service) = file.keyring_service {
            settings.keyring_service = non_blank(GWSCTL_KEYRING_SERVICE, service)?;
        }

        // Environment wins over the file
        if let Some(backend) = lookup(GWSCTL_KEYRING_BACKEND) {
            settings.keyring_backend = backend.parse()?;
        }
        if let Some(service) = lookup(GWSCTL_KEYRING_SERVICE) {
            settings.keyring_service = non_blank(GWSCTL_KEYRING_SERVICE, service)?;
        }

        debug!(
            backend = %settings.keyring_backend,
            service = %settings.keyring_service,
            "Resolved settings"
        );
        Ok(settings)
    }
}

fn non_blank(name: &'static str, value: String) -> ConfigResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidValue {
            name,
            message: "must not be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[rstest]
    #[case("keyring", StoreBackend::Keyring)]
    #[case("KEYCHAIN", StoreBackend::Keyring)]
    #[case(" memory ", StoreBackend::Memory)]
    fn test_backend_from_str(#[case] input: &str, #[case] expected: StoreBackend) {
        assert_eq!(input.parse::<StoreBackend>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_backend() {
        let err = "file".parse::<StoreBackend>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownBackend(ref name) if name == "file"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings =
            Settings::load_from(&temp_dir.path().join("config.toml"), no_env).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.keyring_service, "gwsctl");
    }

    #[test]
    fn test_file_values_applied() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "keyring_backend = \"memory\"\nkeyring_service = \"work\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path, no_env).unwrap();
        assert_eq!(settings.keyring_backend, StoreBackend::Memory);
        assert_eq!(settings.keyring_service, "work");
    }

    #[test]
    fn test_env_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "keyring_backend = \"memory\"\n").unwrap();

        let env: HashMap<&str, &str> = HashMap::from([
            (GWSCTL_KEYRING_BACKEND, "keyring"),
            (GWSCTL_KEYRING_SERVICE, "personal"),
        ]);
        let settings =
            Settings::load_from(&path, |name| env.get(name).map(|v| v.to_string())).unwrap();

        assert_eq!(settings.keyring_backend, StoreBackend::Keyring);
        assert_eq!(settings.keyring_service, "personal");
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "keyring_backend = [").unwrap();

        let err = Settings::load_from(&path, no_env).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "colour = \"blue\"\n").unwrap();

        assert!(matches!(
            Settings::load_from(&path, no_env),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_blank_service_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let err = Settings::load_from(&temp_dir.path().join("config.toml"), |name| {
            (name == GWSCTL_KEYRING_SERVICE).then(|| "   ".to_string())
        })
        .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
