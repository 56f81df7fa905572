//! Per-line style rules.
//!
//! Every rule looks at one line at a time (without its `\n`) and has no
//! memory of previous lines.

pub mod line_length;
pub mod whitespace;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::config::CheckOptions;
use crate::diagnostic::RuleId;
pub use line_length::LineLengthRule;
pub use whitespace::{LeadingWhitespaceRule, TrailingWhitespaceRule};

/// A single stateless check over one line of text.
pub trait LineRule: Send + Sync {
    fn id(&self) -> RuleId;

    /// Returns the warning message when `line` violates the rule.
    fn check(&self, line: &str) -> Option<String>;
}

impl LineRule for Box<dyn LineRule> {
    fn id(&self) -> RuleId {
        (**self).id()
    }

    fn check(&self, line: &str) -> Option<String> {
        (**self).check(line)
    }
}

fn new_box<T: LineRule + 'static>(rule: T) -> Box<dyn LineRule> {
    Box::new(rule)
}

/// Build the rules enabled in `options`, in [`RuleId::ALL`] order.
#[must_use]
pub fn enabled_rules(options: &CheckOptions) -> Vec<Box<dyn LineRule>> {
    RuleId::ALL
        .into_iter()
        .filter(|rule| options.is_enabled(*rule))
        .map(|rule| match rule {
            RuleId::LineLength => new_box(LineLengthRule::new(options.max_line_length)),
            RuleId::TrailingWhitespace => new_box(TrailingWhitespaceRule),
            RuleId::LeadingWhitespace => new_box(LeadingWhitespaceRule),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn enabled_rules_follow_options() {
        let opts = CheckOptions::default().without(RuleId::TrailingWhitespace);
        let ids: Vec<_> = enabled_rules(&opts).iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![RuleId::LineLength, RuleId::LeadingWhitespace]);
    }

    #[test]
    fn boxed_rule_delegates() {
        let rules = enabled_rules(&CheckOptions::default());
        let boxed = &rules[1];
        assert_eq!(boxed.id(), RuleId::TrailingWhitespace);
        assert!(boxed.check("x ").is_some());
        assert!(boxed.check("x").is_none());
    }
}
