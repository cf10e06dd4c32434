//! Logging setup for Repshare binaries.

use tracing_subscriber::EnvFilter;

/// Initialize tracing with a compact formatter.
///
/// Filtering defaults to `info` and can be overridden with the RUST_LOG
/// environment variable.
pub fn init() {
    init_with_filter("info")
}

/// Initialize tracing with a specific default filter directive
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();
}
