// ABOUTME: CLI error type and process exit codes
// ABOUTME: Maps library errors onto distinct exit signals for usage, cancellation and not-found

use gwsctl_auth::AuthError;
use gwsctl_config::ConfigError;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_CANCELLED: i32 = 3;
pub const EXIT_NOT_FOUND: i32 = 4;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Usage(String),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// User declined or input closed; not a failure of the tool
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Auth(AuthError::Cancelled))
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Auth(AuthError::Cancelled) => EXIT_CANCELLED,
            Self::Auth(e) if e.is_not_found() => EXIT_NOT_FOUND,
            Self::Auth(e) if e.is_usage_error() => EXIT_USAGE,
            Self::Usage(_) | Self::Config(_) => EXIT_USAGE,
            Self::Auth(_) | Self::Output(_) | Self::Json(_) => EXIT_FAILURE,
        }
    }
}
