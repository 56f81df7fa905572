//! Optional YAML configuration file.
//!
//! ```yaml
//! max_line_length: 100
//! skip: [leading-whitespace]
//! line_length_exempt: ["*.md"]
//! ```
//!
//! Command-line flags take precedence over values loaded here.

use colcheck_core::{CheckOptions, RuleId};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, Result};

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = ".colcheck.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct FileConfig {
    pub max_line_length: Option<usize>,
    pub skip: Vec<RuleId>,
    pub line_length_exempt: Vec<String>,
    pub leading_whitespace_exempt: Vec<String>,
    /// Set to `false` to drop the built-in exemption lists.
    pub default_exemptions: Option<bool>,
    /// gitignore-style patterns excluded from directory walks.
    pub exclude: Vec<String>,
}

impl FileConfig {
    /// Parse YAML text. `origin` is only used in error messages.
    ///
    /// # Errors
    /// Returns [`EngineError::ConfigParse`] on malformed YAML or unknown keys.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|source| EngineError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text, path)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply the limit and skipped rules on top of `check`.
    #[must_use]
    pub fn apply_to(&self, check: CheckOptions) -> CheckOptions {
        let mut check = check;
        if let Some(max) = self.max_line_length {
            check.max_line_length = max;
        }
        self.skip.iter().fold(check, |c, rule| c.without(*rule))
    }
}

/// Locate [`DEFAULT_CONFIG_FILE`] in `dir`.
#[must_use]
pub fn discover(dir: &Path) -> Option<PathBuf> {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    candidate.is_file().then_some(candidate)
}
