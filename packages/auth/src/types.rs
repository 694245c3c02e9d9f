// ABOUTME: Request and result types for token lifecycle operations
// ABOUTME: Every operation yields a single structured Outcome for text or JSON rendering

use chrono::{DateTime, Utc};
use gwsctl_secrets::Token;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Manual token registration
#[derive(Clone, Default)]
pub struct AddToken {
    pub account: String,
    pub services: Vec<String>,
    pub refresh_token: String,
    pub access_token: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
}

impl fmt::Debug for AddToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddToken")
            .field("account", &self.account)
            .field("services", &self.services)
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Added,
    Deleted,
    Exported,
    Imported,
    CredentialsSaved,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "added"),
            Self::Deleted => write!(f, "deleted"),
            Self::Exported => write!(f, "exported"),
            Self::Imported => write!(f, "imported"),
            Self::CredentialsSaved => write!(f, "saved"),
        }
    }
}

/// Structured result of one lifecycle operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    pub outcome: OutcomeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<String>,
}

impl Outcome {
    pub fn for_token(kind: OutcomeKind, token: &Token) -> Self {
        Self {
            account: Some(token.account.clone()),
            outcome: kind,
            path: None,
            services: token.services.iter().cloned().collect(),
        }
    }

    pub fn for_account(kind: OutcomeKind, account: &str) -> Self {
        Self {
            account: Some(account.to_string()),
            outcome: kind,
            path: None,
            services: Vec::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Non-secret view of a stored token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub account: String,
    pub services: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
    pub access_token_valid: bool,
}

impl From<&Token> for AccountSummary {
    fn from(token: &Token) -> Self {
        Self {
            account: token.account.clone(),
            services: token.services.iter().cloned().collect(),
            created_at: token.created_at,
            expiry: token.expiry,
            access_token_valid: !token.is_access_token_expired(),
        }
    }
}
