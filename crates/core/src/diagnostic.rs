//! Diagnostic types emitted by the line rules.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Identifier of a per-line rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    LineLength,
    TrailingWhitespace,
    LeadingWhitespace,
}

impl RuleId {
    pub const ALL: [Self; 3] = [
        Self::LineLength,
        Self::TrailingWhitespace,
        Self::LeadingWhitespace,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LineLength => "line-length",
            Self::TrailingWhitespace => "trailing-whitespace",
            Self::LeadingWhitespace => "leading-whitespace",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| alloc::format!("Unknown rule: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    /// Upper-case prefix used by the console output (`WARNING: ...`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// Where a line came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Display name of the checked file (patch target name in patch mode).
    pub file: String,
    /// 1-based line number in the checked file.
    pub line: usize,
    /// 1-based line number in the input stream. Differs from `line` when
    /// the input is a patch.
    pub input_line: usize,
}

impl Location {
    #[must_use]
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
            input_line: line,
        }
    }

    #[must_use]
    pub const fn with_input_line(mut self, input_line: usize) -> Self {
        self.input_line = input_line;
        self
    }
}

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub rule: RuleId,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// The offending line, without its terminator.
    #[serde(default)]
    pub context: String,
}

impl Diagnostic {
    pub fn warning(rule: RuleId, message: impl Into<String>) -> Self {
        Self {
            rule,
            severity: Severity::Warning,
            message: message.into(),
            location: None,
            context: String::new(),
        }
    }

    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn with_context(mut self, line: &str) -> Self {
        self.context = line.trim_end_matches(['\r', '\n']).to_string();
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(
                f,
                "{}:{}: {}: {} [{}]",
                loc.file, loc.line, self.severity, self.message, self.rule
            ),
            None => write!(f, "{}: {} [{}]", self.severity, self.message, self.rule),
        }
    }
}
