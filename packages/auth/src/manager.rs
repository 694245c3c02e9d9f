// ABOUTME: Token lifecycle manager orchestrating add, list, get, export, import and delete
// ABOUTME: Validates input before any store access and routes destructive steps through the confirmation gate

use chrono::{DateTime, Utc};
use gwsctl_secrets::{SecretStore, SecretsError, Token};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

use crate::{
    confirm::ConfirmationGate,
    error::{AuthError, AuthResult},
    files::write_private,
    services::parse_services,
    token_file::{decode_token_file, encode_token_file},
    types::{AccountSummary, AddToken, Outcome, OutcomeKind},
};

/// Token lifecycle operations over an injected secret store
#[derive(Clone)]
pub struct TokenManager {
    store: Arc<dyn SecretStore>,
}

impl TokenManager {
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self { store }
    }

    /// Register a token for an account
    ///
    /// Re-adding an existing account overwrites everything except its
    /// original creation time.
    pub async fn add(&self, request: AddToken) -> AuthResult<Outcome> {
        let account = normalize_account(&request.account)?;
        let services = parse_services(&request.services)?;
        if request.refresh_token.trim().is_empty() {
            return Err(AuthError::Validation(format!(
                "refresh token for {} must not be empty",
                account
            )));
        }

        let created_at = match self.store.get_token(&account).await {
            Ok(existing) => {
                debug!(account = %account, "Updating existing token");
                existing.created_at
            }
            Err(e) if e.is_missing_credential() => Utc::now(),
            Err(source @ SecretsError::Corrupt { .. }) => {
                return Err(AuthError::DamagedRecord { account, source })
            }
            Err(e) => return Err(e.into()),
        };

        let token = Token {
            account: account.clone(),
            services,
            refresh_token: request.refresh_token.trim().to_string(),
            access_token: request.access_token.filter(|t| !t.trim().is_empty()),
            expiry: request.expiry,
            created_at,
        };

        self.store.set_token(&account, &token).await?;
        info!(account = %account, services = token.services.len(), "Token added");

        Ok(Outcome::for_token(OutcomeKind::Added, &token))
    }

    /// Stored accounts with their scoped services, sorted by account
    pub async fn list(&self) -> AuthResult<Vec<AccountSummary>> {
        let tokens = self.store.list_tokens().await?;
        Ok(tokens
            .iter()
            .map(|(_, token)| AccountSummary::from(token))
            .collect())
    }

    /// Raw storage keys for low-level inspection
    pub async fn list_keys(&self) -> AuthResult<Vec<String>> {
        Ok(self.store.keys().await?)
    }

    /// Fetch the usable token for an account
    pub async fn get(&self, account: &str) -> AuthResult<Token> {
        let account = normalize_account(account)?;
        Ok(self.store.get_token(&account).await?)
    }

    /// Write one account's token to a portable file
    pub async fn export(
        &self,
        account: &str,
        path: &Path,
        gate: &mut ConfirmationGate,
    ) -> AuthResult<Outcome> {
        // Fails before touching the filesystem when the record is absent or unusable
        let token = self.get(account).await?;

        if fs::try_exists(path).await? {
            gate.confirm(&format!("overwrite {}", path.display()))?;
        }

        let contents = encode_token_file(&token)?;
        write_private(path, &contents).await?;
        info!(account = %token.account, "Token exported to {}", path.display());

        Ok(Outcome::for_token(OutcomeKind::Exported, &token).with_path(path))
    }

    /// Read a portable file and store its token, replacing the whole record
    pub async fn import(&self, path: &Path, gate: &mut ConfirmationGate) -> AuthResult<Outcome> {
        let content = fs::read(path).await.map_err(|e| {
            AuthError::Validation(format!("cannot read {}: {}", path.display(), e))
        })?;

        let mut token = decode_token_file(&content)?;
        token.account = normalize_account(&token.account)?;
        token.services = parse_services(&token.services.iter().collect::<Vec<_>>())?;

        // A damaged record is replaced like a usable one, behind the same gate
        match self.store.get_token(&token.account).await {
            Ok(_) | Err(SecretsError::Corrupt { .. }) => {
                gate.confirm(&format!("overwrite token for {}", token.account))?
            }
            Err(e) if e.is_missing_credential() => {}
            Err(e) => return Err(e.into()),
        }

        self.store.set_token(&token.account, &token).await?;
        info!(account = %token.account, "Token imported from {}", path.display());

        Ok(Outcome::for_token(OutcomeKind::Imported, &token).with_path(path))
    }

    /// Remove an account's token after confirmation
    pub async fn delete(&self, account: &str, gate: &mut ConfirmationGate) -> AuthResult<Outcome> {
        let account = normalize_account(account)?;
        gate.confirm(&format!("delete token for {}", account))?;

        self.store.delete_token(&account).await?;
        info!(account = %account, "Token deleted");

        Ok(Outcome::for_account(OutcomeKind::Deleted, &account))
    }

    /// Cache a freshly minted access token, keeping every other field
    pub async fn record_access_token(
        &self,
        account: &str,
        access_token: &str,
        expiry: Option<DateTime<Utc>>,
    ) -> AuthResult<Token> {
        if access_token.trim().is_empty() {
            return Err(AuthError::Validation(
                "access token must not be empty".to_string(),
            ));
        }

        let mut token = self.get(account).await?;
        token.access_token = Some(access_token.to_string());
        token.expiry = expiry;

        self.store.set_token(&token.account, &token).await?;
        debug!(account = %token.account, "Cached access token");
        Ok(token)
    }

    /// Cached access token if still fresh; `None` means the caller must refresh
    pub async fn usable_access_token(&self, account: &str) -> AuthResult<Option<String>> {
        let token = self.get(account).await?;
        Ok(token.fresh_access_token().map(str::to_string))
    }
}

/// Trim and lowercase an account, rejecting anything that is not email-like
pub fn normalize_account(account: &str) -> AuthResult<String> {
    let account = account.trim().to_lowercase();

    if account.is_empty() {
        return Err(AuthError::Validation("account must not be empty".to_string()));
    }
    if account.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(AuthError::Validation(format!(
            "account {:?} must not contain whitespace",
            account
        )));
    }

    match account.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(account)
        }
        _ => Err(AuthError::Validation(format!(
            "account {:?} is not an email address",
            account
        ))),
    }
}
