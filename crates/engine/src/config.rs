use crate::options::InputMode;
use crate::selection::RuleSelector;
use colcheck_core::CheckOptions;
use derive_builder::Builder;
use std::path::PathBuf;

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct WalkOptions {
    #[builder(default)]
    pub roots: Vec<PathBuf>,
    #[builder(default = "1")]
    pub threads: usize,
    #[builder(default)]
    pub hidden: bool,
    #[builder(default = "true")]
    pub git_ignore: bool,
    #[builder(default)]
    pub max_depth: Option<usize>,
    #[builder(default)]
    pub follow_links: bool,
    /// gitignore-style patterns excluded from the walk.
    #[builder(default)]
    pub exclude: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            roots: vec![],
            threads: 1,
            hidden: false,
            git_ignore: true,
            max_depth: None,
            follow_links: false,
            exclude: vec![],
        }
    }
}

#[derive(Debug, Clone, Default, Builder)]
#[builder(setter(into))]
pub struct Config {
    #[builder(default)]
    pub walk: WalkOptions,
    #[builder(default)]
    pub mode: InputMode,
    #[builder(default)]
    pub check: CheckOptions,
    #[builder(default)]
    pub selector: RuleSelector,
    /// Fail the whole run on the first unreadable input.
    #[builder(default)]
    pub strict: bool,
}

impl Config {
    /// Rules to run for `path` after applying the exemption lists.
    #[must_use]
    pub fn options_for(&self, path: &std::path::Path) -> CheckOptions {
        self.selector.options_for(path, &self.check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colcheck_core::RuleId;
    use std::path::Path;

    #[test]
    fn builder_defaults_match_default() {
        let built = ConfigBuilder::default().build().unwrap();
        assert_eq!(built.check, CheckOptions::default());
        assert_eq!(built.mode, InputMode::Files);
        assert!(built.walk.git_ignore);
        assert_eq!(built.walk.threads, 1);
        assert!(!built.strict);
    }

    #[test]
    fn options_for_applies_selector() {
        let config = ConfigBuilder::default()
            .check(CheckOptions::default().without(RuleId::TrailingWhitespace))
            .build()
            .unwrap();
        let opts = config.options_for(Path::new("a.py"));
        assert!(!opts.line_length);
        assert!(!opts.trailing_whitespace);
        assert!(opts.leading_whitespace);
    }
}
