//! Tracing subscriber setup for the CLI.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::GlobalArgs;

/// Returns `true` if stderr is attached to a terminal.
pub fn stderr_is_terminal() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
}

/// Returns the filter directive implied by `--quiet`/`--verbose`.
pub fn default_directive(global: &GlobalArgs) -> &'static str {
    if global.quiet {
        "error"
    } else if global.verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Installs the global subscriber, writing compact events to stderr.
///
/// `RUST_LOG` takes precedence over the verbosity flags.
pub fn init_logging(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(global)));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(global.color)
        .with_target(false)
        .compact()
        .finish();

    // A subscriber may already be installed when running under a test harness.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
