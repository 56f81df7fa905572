use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// checkpatch-style `WARNING:` blocks
    #[default]
    Human,
    /// One JSON array of file reports
    Json,
    /// One diagnostic per line, then a total record
    Jsonl,
}
