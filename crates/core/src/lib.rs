#![no_std]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]

extern crate alloc;

pub mod checker;
pub mod config;
pub mod diagnostic;
pub mod reporter;
pub mod rules;

pub use checker::{CheckResult, LineChecker, check_bytes};
pub use config::{CheckOptions, DEFAULT_MAX_LINE_LEN};
pub use diagnostic::{Diagnostic, Location, RuleId, Severity};
pub use reporter::{FnReporter, Reporter, Tally};
pub use rules::line_length::{LineLength, check_line_length, line_length_violation};
