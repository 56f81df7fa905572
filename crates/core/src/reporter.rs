//! Reporting sinks.
//!
//! Rules never print. They hand each [`Diagnostic`] to a [`Reporter`],
//! which may collect it, count it, forward it to a closure, or (in the
//! CLI) write it to the console.
//!
//! # Example
//!
//! ```rust
//! use colcheck_core::{Diagnostic, check_line_length};
//!
//! let mut found: Vec<Diagnostic> = Vec::new();
//! check_line_length(&"x".repeat(80), 79, &mut found);
//! assert_eq!(found.len(), 1);
//! ```

use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::diagnostic::{Diagnostic, RuleId, Severity};

/// Receiver of diagnostics.
pub trait Reporter {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl Reporter for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Adapter forwarding every diagnostic to a closure.
pub struct FnReporter<F>(pub F);

impl<F: FnMut(Diagnostic)> Reporter for FnReporter<F> {
    fn report(&mut self, diagnostic: Diagnostic) {
        (self.0)(diagnostic);
    }
}

/// Counting reporter: tallies diagnostics by severity and rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub warnings: usize,
    pub errors: usize,
    per_rule: HashMap<RuleId, usize>,
}

impl Tally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, diagnostic: &Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => self.warnings += 1,
            Severity::Error => self.errors += 1,
        }
        *self.per_rule.entry(diagnostic.rule).or_insert(0) += 1;
    }

    /// Number of diagnostics reported for `rule`.
    #[must_use]
    pub fn count(&self, rule: RuleId) -> usize {
        self.per_rule.get(&rule).copied().unwrap_or(0)
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.warnings + self.errors
    }

    /// Per-rule counts in [`RuleId::ALL`] order, rules with no hits omitted.
    pub fn by_rule(&self) -> impl Iterator<Item = (RuleId, usize)> + '_ {
        RuleId::ALL
            .into_iter()
            .map(|rule| (rule, self.count(rule)))
            .filter(|(_, n)| *n > 0)
    }

    pub fn merge(&mut self, other: &Self) {
        self.warnings += other.warnings;
        self.errors += other.errors;
        for (rule, n) in &other.per_rule {
            *self.per_rule.entry(*rule).or_insert(0) += n;
        }
    }
}

impl Reporter for Tally {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.record(&diagnostic);
    }
}
