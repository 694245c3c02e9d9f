// ABOUTME: Error types for the secret store
// ABOUTME: Distinguishes missing, unusable and corrupt records from an unreachable backend

use thiserror::Error;

pub type SecretsResult<T> = Result<T, SecretsError>;

#[derive(Error, Debug)]
pub enum SecretsError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("No token stored for {0}")]
    NotFound(String),

    #[error("Stored token for {0} has no refresh token")]
    Unusable(String),

    #[error("Stored record {key} is corrupt: {message}")]
    Corrupt { key: String, message: String },

    #[error("Secret store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SecretsError {
    /// Missing and unusable records both mean "no credential" to callers
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Unusable(_))
    }
}
