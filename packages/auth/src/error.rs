// ABOUTME: Error types for credential import and token lifecycle operations
// ABOUTME: Separates caller mistakes, missing credentials, confirmation outcomes and storage failures

use gwsctl_secrets::SecretsError;
use std::path::PathBuf;
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unknown service(s): {}. Supported: {}", .unknown.join(", "), .supported.join(", "))]
    InvalidService {
        unknown: Vec<String>,
        supported: Vec<String>,
    },

    #[error("No token found for {0}")]
    NotFound(String),

    #[error("Malformed credentials file {}: {reason}", .path.display())]
    MalformedCredentialsFile { path: PathBuf, reason: String },

    #[error("refusing to {action} without --force (non-interactive)")]
    RefusingWithoutForce { action: String },

    #[error("cancelled")]
    Cancelled,

    #[error("Stored token for {account} is damaged ({source}); replace it with `auth tokens import` or remove it with `auth tokens delete {account}`")]
    DamagedRecord {
        account: String,
        source: SecretsError,
    },

    #[error("Secret store error: {0}")]
    Secrets(SecretsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<SecretsError> for AuthError {
    fn from(err: SecretsError) -> Self {
        match err {
            SecretsError::NotFound(account) => Self::NotFound(account),
            SecretsError::Validation(message) => Self::Validation(message),
            other => Self::Secrets(other),
        }
    }
}

impl AuthError {
    /// Caller mistakes that abort before anything is written
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidService { .. }
                | Self::MalformedCredentialsFile { .. }
                | Self::RefusingWithoutForce { .. }
        )
    }

    /// No usable credential exists for the requested account
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::Secrets(SecretsError::Unusable(_))
        )
    }
}
