//! Diagnostic logging.
//!
//! Progress and debug events go through `tracing` to stderr so that stdout
//! stays reserved for command results (the JSON manifest of `scan`, the
//! stock config of `gen-config`).

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the `-v` verbosity, e.g.
/// `MDX_SITEMAP_LOG=mdx_sitemap::sitemap=debug`.
pub const LOG_ENV: &str = "MDX_SITEMAP_LOG";

/// Map a `-v` count to a tracing directive.
///
/// - 0 → `"warn"`
/// - 1 → `"info"`
/// - 2 → `"debug"`
/// - 3+ → `"trace"`
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global stderr subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));

    let use_ansi = std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(use_ansi)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .try_init();
}
