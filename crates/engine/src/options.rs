use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Human,
    Json,
    Jsonl,
}

/// How inputs are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    /// Inputs are source files or directories; every line is checked.
    #[default]
    Files,
    /// Inputs are unified diffs; only added lines are checked.
    Patch,
}
