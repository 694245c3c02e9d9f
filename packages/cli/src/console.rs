// ABOUTME: Output rendering for CLI commands
// ABOUTME: Text goes through colored lines and tables, JSON mode emits one structured record per command

use chrono::{DateTime, Utc};
use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use gwsctl_auth::{AccountSummary, Outcome, OutcomeKind};
use gwsctl_secrets::Token;
use serde::Serialize;
use serde_json::json;
use std::io::Write;

use crate::error::CliResult;

/// Shown on stderr when the store holds nothing
pub const NO_TOKENS_NOTICE: &str = "No tokens stored";

/// Command output sinks. Results go to `out`, diagnostics to `err`.
pub struct Console<'a> {
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
    json: bool,
}

impl<'a> Console<'a> {
    pub fn new(out: &'a mut dyn Write, err: &'a mut dyn Write, json: bool) -> Self {
        Self { out, err, json }
    }

    /// Informational line on the diagnostic channel
    pub fn notice(&mut self, message: &str) -> CliResult<()> {
        writeln!(self.err, "{}", message.yellow())?;
        Ok(())
    }

    pub fn error(&mut self, message: &str) -> CliResult<()> {
        writeln!(self.err, "{} {}", "Error:".red().bold(), message)?;
        Ok(())
    }

    pub fn outcome(&mut self, outcome: &Outcome) -> CliResult<()> {
        if self.json {
            return self.write_json(outcome);
        }

        let account = outcome.account.as_deref().unwrap_or_default();
        let line = match outcome.outcome {
            OutcomeKind::Added => format!(
                "Token for {} added ({})",
                account.cyan(),
                services_label(&outcome.services)
            ),
            OutcomeKind::Deleted => format!("Token for {} deleted", account.cyan()),
            OutcomeKind::Exported => format!(
                "Token for {} exported to {}",
                account.cyan(),
                path_label(outcome)
            ),
            OutcomeKind::Imported => format!(
                "Token for {} imported from {}",
                account.cyan(),
                path_label(outcome)
            ),
            OutcomeKind::CredentialsSaved => {
                format!("Client credentials saved\npath\t{}", path_label(outcome))
            }
        };

        writeln!(self.out, "{} {}", "✓".green().bold(), line)?;
        Ok(())
    }

    /// Decoded accounts view
    pub fn accounts(&mut self, accounts: &[AccountSummary]) -> CliResult<()> {
        if accounts.is_empty() {
            self.notice(NO_TOKENS_NOTICE)?;
        }
        if self.json {
            return self.write_json(&json!({ "accounts": accounts }));
        }
        if accounts.is_empty() {
            return Ok(());
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Account", "Services", "Created", "Access token"]);

        for summary in accounts {
            table.add_row(vec![
                summary.account.clone(),
                services_label(&summary.services),
                format_timestamp(summary.created_at),
                if summary.access_token_valid {
                    "valid".to_string()
                } else {
                    "needs refresh".to_string()
                },
            ]);
        }

        writeln!(self.out, "{}", table)?;
        Ok(())
    }

    /// Raw storage keys view
    pub fn keys(&mut self, keys: &[String]) -> CliResult<()> {
        if keys.is_empty() {
            self.notice(NO_TOKENS_NOTICE)?;
        }
        if self.json {
            return self.write_json(&json!({ "keys": keys }));
        }
        for key in keys {
            writeln!(self.out, "{}", key)?;
        }
        Ok(())
    }

    /// Single token without its secrets
    pub fn token(&mut self, token: &Token) -> CliResult<()> {
        let summary = AccountSummary::from(token);
        if self.json {
            return self.write_json(&summary);
        }

        writeln!(self.out, "account\t{}", summary.account)?;
        writeln!(self.out, "services\t{}", services_label(&summary.services))?;
        writeln!(self.out, "created\t{}", format_timestamp(summary.created_at))?;
        match summary.expiry {
            Some(expiry) if summary.access_token_valid => {
                writeln!(self.out, "expiry\t{}", format_timestamp(expiry).green())?
            }
            Some(expiry) => writeln!(
                self.out,
                "expiry\t{} {}",
                format_timestamp(expiry).red(),
                "(expired)".red()
            )?,
            None => writeln!(self.out, "expiry\t{}", "none".dimmed())?,
        }
        Ok(())
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> CliResult<()> {
        serde_json::to_writer_pretty(&mut *self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }
}

fn services_label(services: &[String]) -> String {
    if services.is_empty() {
        "unscoped".to_string()
    } else {
        services.join(", ")
    }
}

fn path_label(outcome: &Outcome) -> String {
    outcome
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
