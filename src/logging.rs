//! Diagnostic logging
//!
//! Logs go to stderr so they never mix with the console prompts on stdout.
//! `RUST_LOG` takes precedence over the `-v` flags.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "ghost_saver=warn",
        1 => "ghost_saver=info",
        2 => "ghost_saver=debug",
        _ => "ghost_saver=trace",
    }
}

/// Install the global tracing subscriber
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
