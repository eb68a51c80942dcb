//! Tracing/logging initialization.
//!
//! JSON lines on stdout, filtered through `RUST_LOG` (default `info`).

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info";

/// Filter from `RUST_LOG`, or [`DEFAULT_FILTER`] when unset or invalid.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
