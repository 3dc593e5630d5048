//! Logging setup.
//!
//! `RUST_LOG` takes precedence. Otherwise the level is `info`, or `debug` when
//! verbose output is requested or `INSPECTOR_DEBUG` is set.

use tracing_subscriber::EnvFilter;

/// Environment variable switching the default level to `debug`.
pub const DEBUG_ENV: &str = "INSPECTOR_DEBUG";

/// Default filter directive for the given verbosity.
pub fn default_directive(verbose: bool) -> &'static str {
    let debug_env = std::env::var_os(DEBUG_ENV).is_some_and(|v| !v.is_empty());
    if verbose || debug_env {
        "inspector=debug,info"
    } else {
        "info"
    }
}

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
