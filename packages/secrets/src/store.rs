// ABOUTME: Secret store contract implemented by every storage backend
// ABOUTME: Keyed by account, at most one token per account, deterministic listing order

use async_trait::async_trait;
use gwsctl_config::StoreBackend;

use crate::error::{SecretsError, SecretsResult};
use crate::token::Token;

/// Durable keyed storage of [`Token`] records
///
/// Implementations never make network calls and never substitute a default
/// token for a missing or damaged one.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Write or overwrite the record for `account` exactly as given
    async fn set_token(&self, account: &str, token: &Token) -> SecretsResult<()>;

    /// Fetch the record for `account`
    async fn get_token(&self, account: &str) -> SecretsResult<Token>;

    /// Remove the record for `account`; fails with `NotFound` when absent
    async fn delete_token(&self, account: &str) -> SecretsResult<()>;

    /// All usable records, sorted by account
    async fn list_tokens(&self) -> SecretsResult<Vec<(String, Token)>>;

    /// Raw storage keys (`token:<account>`), sorted, including unusable records
    async fn keys(&self) -> SecretsResult<Vec<String>>;

    /// Which backend this store is
    fn backend(&self) -> StoreBackend;
}

/// Checks shared by every backend before a write
pub(crate) fn validate_for_write(account: &str, token: &Token) -> SecretsResult<()> {
    if account.trim().is_empty() {
        return Err(SecretsError::Validation("account must not be empty".to_string()));
    }
    if token.account != account {
        return Err(SecretsError::Validation(format!(
            "token belongs to {} but was stored under {}",
            token.account, account
        )));
    }
    if !token.is_usable() {
        return Err(SecretsError::Validation(format!(
            "refresh token for {} must not be empty",
            account
        )));
    }
    Ok(())
}

pub(crate) fn validate_account(account: &str) -> SecretsResult<()> {
    if account.trim().is_empty() {
        return Err(SecretsError::Validation("account must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_for_write() {
        let token = Token::new("a@b.com", "rt");
        assert!(validate_for_write("a@b.com", &token).is_ok());
        assert!(matches!(
            validate_for_write("", &token),
            Err(SecretsError::Validation(_))
        ));
        assert!(matches!(
            validate_for_write("c@d.com", &token),
            Err(SecretsError::Validation(_))
        ));
        assert!(matches!(
            validate_for_write("a@b.com", &Token::new("a@b.com", "")),
            Err(SecretsError::Validation(_))
        ));
    }
}
