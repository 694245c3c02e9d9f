// ABOUTME: Per-invocation wiring of store, token manager and confirmation gate
// ABOUTME: Built from settings in the binary, or from injected parts in tests

use gwsctl_auth::{ConfirmFlags, ConfirmInput, ConfirmationGate, TerminalInput, TokenManager};
use gwsctl_config::{credentials_file, Settings};
use gwsctl_secrets::{open_store, SecretStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::error::CliResult;

/// Everything a command needs besides its output sinks
pub struct Runtime {
    pub manager: TokenManager,
    pub gate: ConfirmationGate,
    pub credentials_path: PathBuf,
}

impl Runtime {
    pub fn new(
        store: Arc<dyn SecretStore>,
        flags: ConfirmFlags,
        input: Box<dyn ConfirmInput + Send>,
        credentials_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            manager: TokenManager::new(store),
            gate: ConfirmationGate::new(flags, input),
            credentials_path: credentials_path.into(),
        }
    }

    /// Production wiring: configured store, process terminal
    pub fn from_settings(settings: &Settings, flags: ConfirmFlags) -> CliResult<Self> {
        let credentials_path = credentials_file()?;
        debug!(
            backend = %settings.keyring_backend,
            credentials = %credentials_path.display(),
            "Resolved runtime settings"
        );

        let store = open_store(settings.keyring_backend, &settings.keyring_service);
        Ok(Self::new(
            store,
            flags,
            Box::new(TerminalInput),
            credentials_path,
        ))
    }
}
