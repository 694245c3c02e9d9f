// ABOUTME: gwsctl command-line library
// ABOUTME: Argument parsing, command dispatch, output rendering and exit-code mapping

pub mod app;
pub mod commands;
pub mod console;
pub mod error;
pub mod logging;
pub mod runtime;

use std::io::Write;
use tracing::debug;

pub use app::{Cli, Commands, GlobalArgs};
pub use console::Console;
pub use error::{CliError, CliResult};
pub use runtime::Runtime;

/// Execute a parsed command line and return the process exit code.
///
/// Failures are reported on `err` as a single diagnostic line.
pub async fn run(cli: &Cli, runtime: &mut Runtime, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    let mut console = Console::new(out, err, cli.global.json);

    match cli.command.execute(runtime, &mut console).await {
        Ok(()) => error::EXIT_SUCCESS,
        Err(e) => {
            let reported = if e.is_cancelled() {
                console.notice("Cancelled")
            } else {
                console.error(&e.to_string())
            };
            if let Err(write_err) = reported {
                debug!(error = %write_err, "Failed to report error");
            }
            e.exit_code()
        }
    }
}
