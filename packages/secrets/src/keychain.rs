//! Token storage in the OS keychain
//!
//! Uses platform-specific secure storage through the `keyring` crate:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: kernel keyutils cache in front of the Secret Service
//!
//! Keychain APIs cannot enumerate entries, so the store keeps its own
//! `index` entry listing every account it has written.

use async_trait::async_trait;
use gwsctl_config::StoreBackend;
use keyring::Entry;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::error::{SecretsError, SecretsResult};
use crate::record::{decode, encode, token_key};
use crate::store::{validate_account, validate_for_write, SecretStore};
use crate::token::Token;

const INDEX_KEY: &str = "index";

/// Raw get/set/delete of named entries under one keyring service
pub(crate) trait KeyringEntries: Send + Sync {
    fn read(&self, key: &str) -> keyring::Result<String>;
    fn write(&self, key: &str, value: &str) -> keyring::Result<()>;
    fn remove(&self, key: &str) -> keyring::Result<()>;
}

/// Entries in the platform credential store
struct OsEntries {
    service_name: String,
}

impl KeyringEntries for OsEntries {
    fn read(&self, key: &str) -> keyring::Result<String> {
        Entry::new(&self.service_name, key)?.get_password()
    }

    fn write(&self, key: &str, value: &str) -> keyring::Result<()> {
        Entry::new(&self.service_name, key)?.set_password(value)
    }

    fn remove(&self, key: &str) -> keyring::Result<()> {
        Entry::new(&self.service_name, key)?.delete_credential()
    }
}

/// Keyring-backed secret store
pub struct KeyringStore {
    service_name: String,
    entries: Arc<dyn KeyringEntries>,
}

impl KeyringStore {
    pub fn new(service_name: impl Into<String>) -> Self {
        let service_name = service_name.into();
        let entries = Arc::new(OsEntries {
            service_name: service_name.clone(),
        });
        Self::with_entries(service_name, entries)
    }

    pub(crate) fn with_entries(
        service_name: impl Into<String>,
        entries: Arc<dyn KeyringEntries>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            entries,
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Read a raw entry; `None` when it does not exist
    fn read_entry(&self, key: &str) -> SecretsResult<Option<String>> {
        match self.entries.read(key) {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(map_keyring_error(key, e)),
        }
    }

    fn write_entry(&self, key: &str, value: &str) -> SecretsResult<()> {
        self.entries
            .write(key, value)
            .map_err(|e| map_keyring_error(key, e))
    }

    fn load_index(&self) -> SecretsResult<BTreeSet<String>> {
        match self.read_entry(INDEX_KEY)? {
            Some(raw) => decode_index(&raw),
            None => Ok(BTreeSet::new()),
        }
    }

    fn save_index(&self, index: &BTreeSet<String>) -> SecretsResult<()> {
        let raw = serde_json::to_string(index)?;
        self.write_entry(INDEX_KEY, &raw)
    }
}

#[async_trait]
impl SecretStore for KeyringStore {
    async fn set_token(&self, account: &str, token: &Token) -> SecretsResult<()> {
        validate_for_write(account, token)?;
        let raw = encode(token)?;
        let key = token_key(account);

        let mut index = self.load_index()?;
        self.write_entry(&key, &raw)?;

        if index.insert(account.to_string()) {
            if let Err(e) = self.save_index(&index) {
                // Roll back so the token never exists outside the index
                error!(account = account, error = %e, "Failed to update keyring index");
                if let Err(rollback) = self.entries.remove(&key) {
                    warn!(account = account, error = %rollback, "Failed to roll back token write");
                }
                return Err(e);
            }
        }

        debug!(account = account, "Stored token in keyring");
        Ok(())
    }

    async fn get_token(&self, account: &str) -> SecretsResult<Token> {
        validate_account(account)?;
        let raw = self
            .read_entry(&token_key(account))?
            .ok_or_else(|| SecretsError::NotFound(account.to_string()))?;
        debug!(account = account, "Retrieved token from keyring");
        decode(account, &raw)
    }

    async fn delete_token(&self, account: &str) -> SecretsResult<()> {
        validate_account(account)?;
        let key = token_key(account);

        match self.entries.remove(&key) {
            Ok(()) => {}
            Err(keyring::Error::NoEntry) => {
                return Err(SecretsError::NotFound(account.to_string()));
            }
            Err(e) => return Err(map_keyring_error(&key, e)),
        }

        let mut index = self.load_index()?;
        if index.remove(account) {
            // A stale index entry is skipped on listing, so this is not fatal
            if let Err(e) = self.save_index(&index) {
                warn!(account = account, error = %e, "Token deleted but index update failed");
            }
        }

        debug!(account = account, "Deleted token from keyring");
        Ok(())
    }

    async fn list_tokens(&self) -> SecretsResult<Vec<(String, Token)>> {
        let index = self.load_index()?;
        let mut tokens = Vec::with_capacity(index.len());

        for account in index {
            let raw = match self.read_entry(&token_key(&account))? {
                Some(raw) => raw,
                None => {
                    debug!(account = %account, "Index lists account without a keyring entry");
                    continue;
                }
            };
            match decode(&account, &raw) {
                Ok(token) => tokens.push((account, token)),
                Err(SecretsError::Unusable(account)) => {
                    warn!(account = %account, "Skipping token without refresh token");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(tokens)
    }

    async fn keys(&self) -> SecretsResult<Vec<String>> {
        let index = self.load_index()?;
        let mut keys = Vec::with_capacity(index.len());
        for account in index {
            let key = token_key(&account);
            if self.read_entry(&key)?.is_some() {
                keys.push(key);
            }
        }
        Ok(keys)
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Keyring
    }
}

fn decode_index(raw: &str) -> SecretsResult<BTreeSet<String>> {
    serde_json::from_str(raw).map_err(|e| SecretsError::Corrupt {
        key: INDEX_KEY.to_string(),
        message: e.to_string(),
    })
}

/// Convert a keyring error into the store taxonomy
fn map_keyring_error(key: &str, e: keyring::Error) -> SecretsError {
    match e {
        keyring::Error::NoEntry => SecretsError::NotFound(key.to_string()),
        keyring::Error::BadEncoding(_) | keyring::Error::Ambiguous(_) => SecretsError::Corrupt {
            key: key.to_string(),
            message: e.to_string(),
        },
        keyring::Error::TooLong(..) | keyring::Error::Invalid(..) => {
            SecretsError::Validation(format!("keyring rejected {}: {}", key, e))
        }
        other => SecretsError::StoreUnavailable(format!("Keyring error: {}", other)),
    }
}
