// ABOUTME: Storage encoding shared by every backend
// ABOUTME: Maps accounts to `token:<account>` keys and tokens to JSON records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{SecretsError, SecretsResult};
use crate::token::Token;

pub const TOKEN_KEY_PREFIX: &str = "token:";

/// Storage key for an account
pub fn token_key(account: &str) -> String {
    format!("{}{}", TOKEN_KEY_PREFIX, account)
}

/// Account encoded in a storage key, if it is a token key
pub fn account_from_key(key: &str) -> Option<&str> {
    key.strip_prefix(TOKEN_KEY_PREFIX)
        .filter(|account| !account.is_empty())
}

/// Record layout inside the backend. Kept separate from the portable export
/// format so the two can evolve independently.
#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    account: String,
    #[serde(default)]
    services: BTreeSet<String>,
    #[serde(default)]
    refresh_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expiry: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

pub(crate) fn encode(token: &Token) -> SecretsResult<String> {
    let stored = StoredToken {
        account: token.account.clone(),
        services: token.services.clone(),
        refresh_token: token.refresh_token.clone(),
        access_token: token.access_token.clone(),
        expiry: token.expiry,
        created_at: token.created_at,
    };
    Ok(serde_json::to_string(&stored)?)
}

/// Decode a record read from `key`; an empty refresh token is reported as
/// `Unusable` rather than returned.
pub(crate) fn decode(account: &str, raw: &str) -> SecretsResult<Token> {
    let stored: StoredToken = serde_json::from_str(raw).map_err(|e| SecretsError::Corrupt {
        key: token_key(account),
        message: e.to_string(),
    })?;

    if stored.account != account {
        return Err(SecretsError::Corrupt {
            key: token_key(account),
            message: format!("record belongs to {}", stored.account),
        });
    }

    let token = Token {
        account: stored.account,
        services: stored.services,
        refresh_token: stored.refresh_token,
        access_token: stored.access_token,
        expiry: stored.expiry,
        created_at: stored.created_at,
    };

    if !token.is_usable() {
        return Err(SecretsError::Unusable(account.to_string()));
    }
    Ok(token)
}
