use clap::Parser;
use colored::*;
use gwsctl_cli::logging::init_tracing;
use gwsctl_cli::{run, Cli, CliError, Runtime};
use gwsctl_config::Settings;
use std::io::{self, Write};
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            let e = CliError::from(e);
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(e.exit_code());
        }
    };

    let mut runtime = match Runtime::from_settings(&settings, cli.global.confirm_flags()) {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(e.exit_code());
        }
    };

    let code = run(&cli, &mut runtime, &mut io::stdout(), &mut io::stderr()).await;
    let _ = io::stdout().flush();

    process::exit(code);
}
