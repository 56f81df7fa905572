use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::config::CheckOptions;
use crate::diagnostic::{Diagnostic, Location};
use crate::reporter::Reporter;
use crate::rules::{LineRule, enabled_rules};

/// Outcome of checking one buffer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub lines_checked: usize,
    pub diagnostics: usize,
    pub is_binary: bool,
}

impl CheckResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Runs the enabled rules over lines and forwards violations to a reporter.
pub struct LineChecker {
    rules: Vec<Box<dyn LineRule>>,
}

impl LineChecker {
    #[must_use]
    pub fn new(options: &CheckOptions) -> Self {
        Self {
            rules: enabled_rules(options),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check one line (without its `\n`). Returns the number of diagnostics
    /// reported.
    pub fn check_line<R: Reporter + ?Sized>(
        &self,
        line: &str,
        location: &Location,
        reporter: &mut R,
    ) -> usize {
        let mut reported = 0;
        for rule in &self.rules {
            if let Some(message) = rule.check(line) {
                reporter.report(
                    Diagnostic::warning(rule.id(), message)
                        .at(location.clone())
                        .with_context(line),
                );
                reported += 1;
            }
        }
        reported
    }

    /// Check every line of `text`, numbering from 1.
    pub fn check_text<R: Reporter + ?Sized>(
        &self,
        text: &str,
        file: &str,
        reporter: &mut R,
    ) -> CheckResult {
        let mut result = CheckResult::new();
        let file = String::from(file);
        let mut location = Location::new(file, 0);

        for (idx, raw) in text.split_inclusive('\n').enumerate() {
            let line = raw.strip_suffix('\n').unwrap_or(raw);
            location.line = idx + 1;
            location.input_line = idx + 1;
            result.lines_checked += 1;
            result.diagnostics += self.check_line(line, &location, reporter);
        }

        result
    }
}

/// Check an in-memory file.
///
/// Binary content (a NUL byte in the first 8 KiB) is not checked. Invalid
/// UTF-8 is replaced rather than rejected.
pub fn check_bytes<R: Reporter + ?Sized>(
    input: &[u8],
    file: &str,
    options: &CheckOptions,
    reporter: &mut R,
) -> CheckResult {
    if is_binary(input) {
        return CheckResult {
            is_binary: true,
            ..CheckResult::default()
        };
    }

    let text = String::from_utf8_lossy(input);
    LineChecker::new(options).check_text(&text, file, reporter)
}

fn is_binary(input: &[u8]) -> bool {
    let len = input.len().min(8 * 1024);
    input[..len].contains(&0)
}
