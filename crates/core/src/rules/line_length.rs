//! Line-length rule.
//!
//! A line is too long when it has more characters than the configured
//! limit. One escape: a line exactly one character under the limit whose
//! last character is `)` is never reported, whatever the limit is.

use alloc::string::{String, ToString};
use core::fmt;

use super::LineRule;
use crate::diagnostic::{Diagnostic, RuleId};
use crate::reporter::Reporter;

/// An overlong line: observed length and the limit it broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineLength {
    pub len: usize,
    pub max: usize,
}

impl fmt::Display for LineLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Line is {} characters long (recommended limit is {})",
            self.len, self.max
        )
    }
}

/// Length of `line` in characters. A trailing `\r` is not counted.
#[must_use]
pub fn line_len(line: &str) -> usize {
    let line = line.strip_suffix('\r').unwrap_or(line);
    bytecount::num_chars(line.as_bytes())
}

fn is_bracket_exception(line: &str, len: usize, max_line_len: usize) -> bool {
    max_line_len.checked_sub(1) == Some(len) && line.ends_with(')')
}

/// Decide whether `line` breaks the `max_line_len` limit.
#[must_use]
pub fn line_length_violation(line: &str, max_line_len: usize) -> Option<LineLength> {
    let len = line_len(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    if is_bracket_exception(line, len, max_line_len) {
        return None;
    }
    (len > max_line_len).then_some(LineLength {
        len,
        max: max_line_len,
    })
}

/// Check one line and report a warning to `reporter` when it is too long.
///
/// Returns `true` when a warning was reported. The diagnostic carries no
/// location; callers that know the file and line number use
/// [`crate::LineChecker`] instead.
pub fn check_line_length<R: Reporter + ?Sized>(
    line: &str,
    max_line_len: usize,
    reporter: &mut R,
) -> bool {
    match line_length_violation(line, max_line_len) {
        Some(v) => {
            reporter.report(
                Diagnostic::warning(RuleId::LineLength, v.to_string()).with_context(line),
            );
            true
        }
        None => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineLengthRule {
    max_line_len: usize,
}

impl LineLengthRule {
    #[must_use]
    pub const fn new(max_line_len: usize) -> Self {
        Self { max_line_len }
    }
}

impl LineRule for LineLengthRule {
    fn id(&self) -> RuleId {
        RuleId::LineLength
    }

    fn check(&self, line: &str) -> Option<String> {
        line_length_violation(line, self.max_line_len).map(|v| v.to_string())
    }
}
