// crates/engine/src/selection.rs
//! Which rules apply to which files.
//!
//! Some files legitimately break a rule: generated autotools inputs and
//! Python sources are exempt from the line-length rule, and makefiles need
//! tab indentation. The predicates here only look at the path; they never
//! read the file.

use colcheck_core::{CheckOptions, RuleId};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;
use std::sync::LazyLock;

use crate::error::{EngineError, Result};

/// Files exempt from the line-length rule unless defaults are disabled.
pub const DEFAULT_LINE_LENGTH_EXEMPT: &[&str] = &[
    "*.am",
    "*.at",
    "*.etc",
    "*.in",
    "*.m4",
    "*.mk",
    "*.patch",
    "*.py",
    "*.dl",
    "*debian/rules",
];

/// Files exempt from the leading-whitespace rule unless defaults are disabled.
pub const DEFAULT_LEADING_WHITESPACE_EXEMPT: &[&str] = &["*.am", "*.at", "*.mk", "*debian/rules"];

static DEFAULT_LINE_LENGTH: LazyLock<PathSet> = LazyLock::new(|| {
    PathSet::new(DEFAULT_LINE_LENGTH_EXEMPT.iter().copied())
        .expect("built-in line-length patterns are valid")
});

static DEFAULT_LEADING_WHITESPACE: LazyLock<PathSet> = LazyLock::new(|| {
    PathSet::new(DEFAULT_LEADING_WHITESPACE_EXEMPT.iter().copied())
        .expect("built-in leading-whitespace patterns are valid")
});

/// `true` when `path` is on the built-in line-length exemption list.
#[must_use]
pub fn is_line_length_exempt(path: &Path) -> bool {
    DEFAULT_LINE_LENGTH.is_match(path)
}

/// Whether the line-length rule should run for `path`, using the built-in
/// exemption list.
#[must_use]
pub fn should_check_line_length(path: &Path) -> bool {
    !is_line_length_exempt(path)
}

/// A compiled set of glob patterns matched against whole paths.
#[derive(Debug, Clone)]
pub struct PathSet {
    patterns: Vec<String>,
    set: GlobSet,
}

impl PathSet {
    /// # Errors
    /// Returns [`EngineError::Pattern`] for the first invalid glob.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut originals = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = Glob::new(pattern).map_err(|source| EngineError::Pattern {
                pattern: pattern.to_string(),
                source,
            })?;
            builder.add(glob);
            originals.push(pattern.to_string());
        }
        let set = builder.build().map_err(|source| EngineError::Pattern {
            pattern: originals.join(","),
            source,
        })?;
        Ok(Self {
            patterns: originals,
            set,
        })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            set: GlobSet::empty(),
        }
    }

    #[must_use]
    pub fn is_match(&self, path: &Path) -> bool {
        !self.patterns.is_empty() && self.set.is_match(path)
    }

    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    fn extended(&self, extra: &[String]) -> Result<Self> {
        if extra.is_empty() {
            return Ok(self.clone());
        }
        Self::new(self.patterns.iter().chain(extra))
    }
}

/// Narrows [`CheckOptions`] per file according to the exemption lists.
#[derive(Debug, Clone)]
pub struct RuleSelector {
    line_length_exempt: PathSet,
    leading_whitespace_exempt: PathSet,
}

impl Default for RuleSelector {
    fn default() -> Self {
        Self {
            line_length_exempt: DEFAULT_LINE_LENGTH.clone(),
            leading_whitespace_exempt: DEFAULT_LEADING_WHITESPACE.clone(),
        }
    }
}

impl RuleSelector {
    /// Build a selector from extra patterns, on top of the built-in lists
    /// when `use_defaults` is set.
    ///
    /// # Errors
    /// Returns an error if any extra pattern is not a valid glob.
    pub fn new(
        line_length_exempt: &[String],
        leading_whitespace_exempt: &[String],
        use_defaults: bool,
    ) -> Result<Self> {
        let (ll_base, lw_base) = if use_defaults {
            (DEFAULT_LINE_LENGTH.clone(), DEFAULT_LEADING_WHITESPACE.clone())
        } else {
            (PathSet::empty(), PathSet::empty())
        };
        Ok(Self {
            line_length_exempt: ll_base.extended(line_length_exempt)?,
            leading_whitespace_exempt: lw_base.extended(leading_whitespace_exempt)?,
        })
    }

    /// The rules to run for `path`, starting from `base`.
    #[must_use]
    pub fn options_for(&self, path: &Path, base: &CheckOptions) -> CheckOptions {
        let mut options = *base;
        if self.line_length_exempt.is_match(path) {
            options = options.without(RuleId::LineLength);
        }
        if self.leading_whitespace_exempt.is_match(path) {
            options = options.without(RuleId::LeadingWhitespace);
        }
        options
    }

    #[must_use]
    pub fn line_length_patterns(&self) -> &[String] {
        self.line_length_exempt.patterns()
    }
}
