// ABOUTME: Top-level argument parser and dispatch for gwsctl
// ABOUTME: Global flags shape output mode and confirmation behaviour for every command

use clap::{Args, Parser, Subcommand};
use gwsctl_auth::ConfirmFlags;

use crate::commands::auth::AuthCommands;
use crate::console::Console;
use crate::error::CliResult;
use crate::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "gwsctl")]
#[command(about = "gwsctl - credential and token manager for Google Workspace accounts")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Print structured JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Skip confirmation for destructive actions
    #[arg(long, global = true)]
    pub force: bool,

    /// Never prompt; destructive actions require --force
    #[arg(long, global = true)]
    pub no_input: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    pub fn confirm_flags(&self) -> ConfirmFlags {
        ConfirmFlags {
            force: self.force,
            no_input: self.no_input,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage client credentials and account tokens
    #[command(subcommand)]
    Auth(AuthCommands),
}

impl Commands {
    pub async fn execute(&self, runtime: &mut Runtime, console: &mut Console<'_>) -> CliResult<()> {
        match self {
            Commands::Auth(cmd) => cmd.execute(runtime, console).await,
        }
    }
}
