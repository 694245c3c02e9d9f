// ABOUTME: Portable token file used by export and import
// ABOUTME: JSON with camelCase keys; snake_case spellings are accepted when reading

use chrono::{DateTime, Utc};
use gwsctl_secrets::Token;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{AuthError, AuthResult};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenFile {
    account: Option<String>,
    #[serde(default)]
    services: BTreeSet<String>,
    #[serde(alias = "refresh_token")]
    refresh_token: Option<String>,
    #[serde(default, alias = "access_token", skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expiry: Option<DateTime<Utc>>,
    #[serde(alias = "created_at")]
    created_at: Option<DateTime<Utc>>,
}

/// Serialize a token for export
pub fn encode_token_file(token: &Token) -> AuthResult<Vec<u8>> {
    let file = TokenFile {
        account: Some(token.account.clone()),
        services: token.services.clone(),
        refresh_token: Some(token.refresh_token.clone()),
        access_token: token.access_token.clone(),
        expiry: token.expiry,
        created_at: Some(token.created_at),
    };
    let mut json = serde_json::to_vec_pretty(&file)?;
    json.push(b'\n');
    Ok(json)
}

/// Parse an exported token. Missing `account` or `refreshToken` is a
/// validation error; a missing `createdAt` means "created now".
pub fn decode_token_file(content: &[u8]) -> AuthResult<Token> {
    let file: TokenFile = serde_json::from_slice(content)
        .map_err(|e| AuthError::Validation(format!("malformed token file: {}", e)))?;

    let account = file
        .account
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| AuthError::Validation("token file is missing \"account\"".to_string()))?;
    let refresh_token = file
        .refresh_token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| {
            AuthError::Validation("token file is missing \"refreshToken\"".to_string())
        })?;

    Ok(Token {
        account,
        services: file.services,
        refresh_token,
        access_token: file.access_token,
        expiry: file.expiry,
        created_at: file.created_at.unwrap_or_else(Utc::now),
    })
}
