//! Logging setup for weeder
//!
//! Diagnostics go to stderr through `tracing`, so that stdout only carries
//! the list of files. `RUST_LOG` overrides the level picked from the flags.

use tracing_subscriber::EnvFilter;

use crate::cli::Verbosity;

/// Filter directive for a verbosity level
pub fn directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "warn",
        Verbosity::Normal => "info",
        Verbosity::Verbose => "debug",
        Verbosity::VeryVerbose => "trace",
    }
}

/// Install the global subscriber; later calls are ignored
pub fn init(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
