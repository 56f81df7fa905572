//! stderr logging for the `colcheck` binary.
//!
//! The library crates log through the `log` facade; the subscriber installed
//! here picks those records up as well.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Install a human-readable subscriber on stderr, filtered by `RUST_LOG`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
