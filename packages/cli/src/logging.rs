// ABOUTME: Tracing subscriber setup for the gwsctl binary
// ABOUTME: Logs go to stderr so stdout stays machine-readable

use gwsctl_config::constants::RUST_LOG;
use tracing_subscriber::EnvFilter;

/// Directive used when RUST_LOG is unset
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(RUST_LOG)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A second init (e.g. from tests) is not an error worth reporting
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
