//! Tracing subscriber setup for the command-line front-end.

use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable holding `EnvFilter` directives that override `-v`.
pub const LOG_ENV: &str = "TWINMATCH_LOG";

/// Maps the number of `-v` flags to a default filter directive.
#[must_use]
pub const fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Builds the filter for a run: `TWINMATCH_LOG` when set and valid, otherwise
/// the level implied by `verbosity`.
#[must_use]
pub fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)))
}

/// Installs a stderr `fmt` subscriber.
///
/// A subscriber installed earlier in the process (for example by another
/// test) is left in place.
pub fn init_tracing(verbosity: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(io::stderr)
        .with_target(true)
        .try_init();
}
