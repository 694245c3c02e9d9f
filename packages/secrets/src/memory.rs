// ABOUTME: In-memory secret store backend for tests and throwaway sessions
// ABOUTME: Stores the same encoded records as the keyring backend, keyed by `token:<account>`

use async_trait::async_trait;
use gwsctl_config::StoreBackend;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

use crate::error::{SecretsError, SecretsResult};
use crate::record::{account_from_key, decode, encode, token_key};
use crate::store::{validate_account, validate_for_write, SecretStore};
use crate::token::Token;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw record, bypassing validation. Used to simulate damaged
    /// backend contents.
    pub fn insert_raw(&self, key: impl Into<String>, raw: impl Into<String>) -> SecretsResult<()> {
        self.write()?.insert(key.into(), raw.into());
        Ok(())
    }

    fn read(&self) -> SecretsResult<RwLockReadGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .read()
            .map_err(|_| SecretsError::StoreUnavailable("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> SecretsResult<RwLockWriteGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .write()
            .map_err(|_| SecretsError::StoreUnavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl SecretStore for MemoryStore {
    async fn set_token(&self, account: &str, token: &Token) -> SecretsResult<()> {
        validate_for_write(account, token)?;
        let raw = encode(token)?;
        self.write()?.insert(token_key(account), raw);
        debug!(account = account, "Stored token in memory");
        Ok(())
    }

    async fn get_token(&self, account: &str) -> SecretsResult<Token> {
        validate_account(account)?;
        let entries = self.read()?;
        let raw = entries
            .get(&token_key(account))
            .ok_or_else(|| SecretsError::NotFound(account.to_string()))?;
        decode(account, raw)
    }

    async fn delete_token(&self, account: &str) -> SecretsResult<()> {
        validate_account(account)?;
        match self.write()?.remove(&token_key(account)) {
            Some(_) => {
                debug!(account = account, "Deleted token from memory");
                Ok(())
            }
            None => Err(SecretsError::NotFound(account.to_string())),
        }
    }

    async fn list_tokens(&self) -> SecretsResult<Vec<(String, Token)>> {
        let entries = self.read()?;
        let mut tokens = Vec::with_capacity(entries.len());

        // BTreeMap iteration keeps accounts sorted
        for (key, raw) in entries.iter() {
            let Some(account) = account_from_key(key) else {
                continue;
            };
            match decode(account, raw) {
                Ok(token) => tokens.push((account.to_string(), token)),
                Err(SecretsError::Unusable(account)) => {
                    warn!(account = %account, "Skipping token without refresh token");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(tokens)
    }

    async fn keys(&self) -> SecretsResult<Vec<String>> {
        Ok(self
            .read()?
            .keys()
            .filter(|key| account_from_key(key).is_some())
            .cloned()
            .collect())
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Memory
    }
}
