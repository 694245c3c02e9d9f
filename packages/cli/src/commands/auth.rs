// ABOUTME: CLI commands for client credentials and per-account tokens
// ABOUTME: Supports credentials import, add, list, remove and the low-level tokens group

use chrono::{DateTime, Utc};
use clap::Subcommand;
use gwsctl_auth::{load_client_credentials, save_client_credentials, AddToken, AuthError};
use gwsctl_auth::{Outcome, OutcomeKind};
use inquire::{InquireError, Password, PasswordDisplayMode};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::console::Console;
use crate::error::{CliError, CliResult};
use crate::runtime::Runtime;

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Import an OAuth client credentials file (installed or web)
    Credentials {
        /// Path to the downloaded client secret JSON
        path: PathBuf,
    },

    /// Store a refresh token for an account
    Add {
        /// Account email
        account: String,

        /// Services the token is scoped to (comma separated, or "all")
        #[arg(long, value_delimiter = ',')]
        services: Vec<String>,

        /// Refresh token; prompted for when omitted in an interactive session
        #[arg(long)]
        refresh_token: Option<String>,

        /// Cached access token
        #[arg(long)]
        access_token: Option<String>,

        /// Access token expiry (RFC 3339)
        #[arg(long)]
        expiry: Option<DateTime<Utc>>,
    },

    /// List stored accounts
    List,

    /// Remove an account's token
    Remove {
        /// Account email
        account: String,
    },

    /// Low-level token management
    #[command(subcommand)]
    Tokens(TokensCommands),
}

#[derive(Subcommand, Debug)]
pub enum TokensCommands {
    /// List raw storage keys
    List,

    /// Show a stored token without its secrets
    Show {
        /// Account email
        account: String,
    },

    /// Export a token to a portable file
    Export {
        /// Account email
        account: String,

        /// Destination file
        #[arg(long)]
        out: PathBuf,
    },

    /// Import a token from a portable file
    Import {
        /// Source file
        path: PathBuf,
    },

    /// Delete an account's token
    Delete {
        /// Account email
        account: String,
    },
}

impl AuthCommands {
    pub async fn execute(&self, runtime: &mut Runtime, console: &mut Console<'_>) -> CliResult<()> {
        match self {
            AuthCommands::Credentials { path } => credentials_command(runtime, console, path).await,
            AuthCommands::Add {
                account,
                services,
                refresh_token,
                access_token,
                expiry,
            } => {
                let refresh_token = match refresh_token {
                    Some(token) => token.clone(),
                    None => prompt_refresh_token(runtime, account)?,
                };
                let request = AddToken {
                    account: account.clone(),
                    services: services.clone(),
                    refresh_token,
                    access_token: access_token.clone(),
                    expiry: *expiry,
                };
                let outcome = runtime.manager.add(request).await?;
                console.outcome(&outcome)
            }
            AuthCommands::List => {
                let accounts = runtime.manager.list().await?;
                console.accounts(&accounts)
            }
            AuthCommands::Remove { account } => delete_command(runtime, console, account).await,
            AuthCommands::Tokens(cmd) => cmd.execute(runtime, console).await,
        }
    }
}

impl TokensCommands {
    pub async fn execute(&self, runtime: &mut Runtime, console: &mut Console<'_>) -> CliResult<()> {
        match self {
            TokensCommands::List => {
                let keys = runtime.manager.list_keys().await?;
                console.keys(&keys)
            }
            TokensCommands::Show { account } => {
                let token = runtime.manager.get(account).await?;
                console.token(&token)
            }
            TokensCommands::Export { account, out } => {
                let outcome = runtime
                    .manager
                    .export(account, out, &mut runtime.gate)
                    .await?;
                console.outcome(&outcome)
            }
            TokensCommands::Import { path } => {
                let outcome = runtime.manager.import(path, &mut runtime.gate).await?;
                console.outcome(&outcome)
            }
            TokensCommands::Delete { account } => delete_command(runtime, console, account).await,
        }
    }
}

async fn credentials_command(
    runtime: &mut Runtime,
    console: &mut Console<'_>,
    path: &Path,
) -> CliResult<()> {
    let credentials = load_client_credentials(path).await?;
    save_client_credentials(&credentials, &runtime.credentials_path).await?;

    let outcome = Outcome {
        account: None,
        outcome: OutcomeKind::CredentialsSaved,
        path: Some(runtime.credentials_path.clone()),
        services: Vec::new(),
    };
    console.outcome(&outcome)
}

async fn delete_command(
    runtime: &mut Runtime,
    console: &mut Console<'_>,
    account: &str,
) -> CliResult<()> {
    let outcome = runtime.manager.delete(account, &mut runtime.gate).await?;
    console.outcome(&outcome)
}

fn prompt_refresh_token(runtime: &Runtime, account: &str) -> CliResult<String> {
    if !runtime.gate.can_prompt() {
        return Err(AuthError::Validation(
            "--refresh-token is required when input is not interactive".to_string(),
        )
        .into());
    }

    debug!(account = account, "Prompting for refresh token");
    let prompt = format!("Refresh token for {}:", account);
    match Password::new(&prompt)
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
    {
        Ok(token) => Ok(token),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            Err(AuthError::Cancelled.into())
        }
        Err(e) => Err(CliError::usage(format!(
            "failed to read refresh token: {}",
            e
        ))),
    }
}
