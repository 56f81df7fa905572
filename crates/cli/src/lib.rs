// crates/cli/src/lib.rs
pub mod args;
pub mod config;
pub mod error;
pub mod logging;
pub mod options;
pub mod parsers;
pub mod presentation;

use crate::config::Settings;
use crate::error::Result;
use colcheck_engine::stats::Summary;
use std::io::Write;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run one check with resolved settings, printing results to `out` and
/// per-input errors to `err`.
///
/// # Errors
/// Returns an error if the engine aborts (strict mode, unreadable patch on
/// stdin) or output cannot be written.
pub fn execute<O: Write, E: Write>(
    settings: &Settings,
    out: &mut O,
    err: &mut E,
) -> Result<Summary> {
    let result = colcheck_engine::run(&settings.engine)?;
    log::debug!(
        "checked {} inputs, {} failed",
        result.reports.len(),
        result.errors.len()
    );
    presentation::print_errors(&result.errors, err)?;
    presentation::print_results(&result, settings, out)?;
    Ok(result.summary())
}
