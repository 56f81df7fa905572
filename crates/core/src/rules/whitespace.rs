use alloc::string::{String, ToString};

use super::LineRule;
use crate::diagnostic::RuleId;

/// Flags whitespace (including a stray `\r` from CRLF endings) at the end
/// of a line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingWhitespaceRule;

impl TrailingWhitespaceRule {
    #[must_use]
    pub fn has_trailing_whitespace(line: &str) -> bool {
        line.ends_with(char::is_whitespace)
    }
}

impl LineRule for TrailingWhitespaceRule {
    fn id(&self) -> RuleId {
        RuleId::TrailingWhitespace
    }

    fn check(&self, line: &str) -> Option<String> {
        Self::has_trailing_whitespace(line).then(|| "Line has trailing whitespace".to_string())
    }
}

/// Flags indentation that is not made of plain spaces (tabs, form feeds).
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadingWhitespaceRule;

impl LeadingWhitespaceRule {
    #[must_use]
    pub fn leading_whitespace_is_spaces(line: &str) -> bool {
        let line = line.strip_suffix('\r').unwrap_or(line);
        line.chars()
            .take_while(|c| c.is_whitespace())
            .all(|c| c == ' ')
    }
}

impl LineRule for LeadingWhitespaceRule {
    fn id(&self) -> RuleId {
        RuleId::LeadingWhitespace
    }

    fn check(&self, line: &str) -> Option<String> {
        (!Self::leading_whitespace_is_spaces(line))
            .then(|| "Line has non-spaces leading whitespace".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_space_and_tab() {
        let rule = TrailingWhitespaceRule;
        assert!(rule.check("int x; ").is_some());
        assert!(rule.check("int x;\t").is_some());
        assert!(rule.check("int x;").is_none());
        assert!(rule.check("").is_none());
    }

    #[test]
    fn crlf_counts_as_trailing_whitespace() {
        assert!(TrailingWhitespaceRule.check("int x;\r").is_some());
    }

    #[test]
    fn tab_indent_is_flagged() {
        let rule = LeadingWhitespaceRule;
        assert_eq!(
            rule.check("\tint x;").as_deref(),
            Some("Line has non-spaces leading whitespace")
        );
        assert!(rule.check("  \tint x;").is_some());
    }

    #[test]
    fn space_indent_and_inner_tabs_are_fine() {
        let rule = LeadingWhitespaceRule;
        assert!(rule.check("    int x;").is_none());
        assert!(rule.check("int\tx;").is_none());
        assert!(rule.check("").is_none());
        assert!(rule.check("    ").is_none());
    }

    #[test]
    fn carriage_return_alone_is_not_indentation() {
        assert!(LeadingWhitespaceRule.check("\r").is_none());
    }
}
