use colcheck_core::{Diagnostic, Tally};
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

use crate::error::EngineError;

/// Name shown in output: the path without a leading `./`.
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.strip_prefix(".").unwrap_or(path).display().to_string()
}

#[allow(clippy::ptr_arg)]
fn serialize_display_name<S: Serializer>(path: &PathBuf, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&display_name(path))
}

/// Diagnostics for one checked file (or one file section of a patch).
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    #[serde(serialize_with = "serialize_display_name")]
    pub path: PathBuf,
    pub lines_checked: usize,
    pub is_binary: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lines_checked: 0,
            is_binary: false,
            diagnostics: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct RunResult {
    pub reports: Vec<FileReport>,
    pub errors: Vec<(PathBuf, EngineError)>,
}

impl RunResult {
    /// Sort reports by path so output does not depend on walk order.
    pub fn sort(&mut self) {
        self.reports.sort_by(|a, b| a.path.cmp(&b.path));
        self.errors.sort_by(|a, b| a.0.cmp(&b.0));
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        let mut tally = Tally::new();
        for d in self.reports.iter().flat_map(|r| &r.diagnostics) {
            tally.record(d);
        }
        Summary {
            files: self.reports.iter().filter(|r| !r.is_binary).count(),
            lines_checked: self.reports.iter().map(|r| r.lines_checked).sum(),
            warnings: tally.warnings,
            errors: tally.errors + self.errors.len(),
            tally,
        }
    }
}

/// Totals printed at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub files: usize,
    pub lines_checked: usize,
    pub warnings: usize,
    /// Error diagnostics plus files that could not be checked.
    pub errors: usize,
    pub tally: Tally,
}

impl Summary {
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.warnings == 0 && self.errors == 0
    }
}
