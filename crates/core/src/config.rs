use serde::{Deserialize, Serialize};

use crate::diagnostic::RuleId;

/// Default column limit for the line-length rule.
pub const DEFAULT_MAX_LINE_LEN: usize = 79;

/// Which rules run and with what limit.
///
/// File-specific exemptions are applied by the caller, which hands a
/// narrowed copy to the checker for each file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOptions {
    /// Lines longer than this (in characters) are reported.
    pub max_line_length: usize,
    pub line_length: bool,
    pub trailing_whitespace: bool,
    pub leading_whitespace: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LEN,
            line_length: true,
            trailing_whitespace: true,
            leading_whitespace: true,
        }
    }
}

impl CheckOptions {
    #[must_use]
    pub const fn is_enabled(&self, rule: RuleId) -> bool {
        match rule {
            RuleId::LineLength => self.line_length,
            RuleId::TrailingWhitespace => self.trailing_whitespace,
            RuleId::LeadingWhitespace => self.leading_whitespace,
        }
    }

    #[must_use]
    pub const fn with_rule(mut self, rule: RuleId, enabled: bool) -> Self {
        match rule {
            RuleId::LineLength => self.line_length = enabled,
            RuleId::TrailingWhitespace => self.trailing_whitespace = enabled,
            RuleId::LeadingWhitespace => self.leading_whitespace = enabled,
        }
        self
    }

    #[must_use]
    pub const fn without(self, rule: RuleId) -> Self {
        self.with_rule(rule, false)
    }

    /// `true` when no rule is left to run.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        !(self.line_length || self.trailing_whitespace || self.leading_whitespace)
    }
}
