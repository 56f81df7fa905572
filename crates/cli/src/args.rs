// crates/cli/src/args.rs
use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, ValueHint};

use crate::options::OutputFormat;
use crate::parsers::{parse_pattern, parse_positive_usize, parse_usize_1_to_512};

/// Top-level CLI arguments parsed via clap.
#[derive(Parser, Debug)]
#[command(
    name = "colcheck",
    version = crate::VERSION,
    about = "colcheck: line length and whitespace checker for source trees and patches"
)]
pub struct Args {
    /// Files or directories to check; in --patch mode, patch files (`-` or nothing reads stdin)
    #[arg(value_hint = ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub rules: RuleArgs,

    #[command(flatten)]
    pub scan: ScanArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub behavior: BehaviorArgs,
}

#[derive(ClapArgs, Debug, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct RuleArgs {
    /// Maximum line length in characters [default: 79]
    #[arg(long, value_parser = parse_positive_usize, help_heading = "Rules")]
    pub max_line_length: Option<usize>,

    /// Do not run the line-length rule
    #[arg(long, help_heading = "Rules")]
    pub skip_line_length: bool,

    /// Do not run the trailing-whitespace rule
    #[arg(long, help_heading = "Rules")]
    pub skip_trailing_whitespace: bool,

    /// Do not run the leading-whitespace rule
    #[arg(long, help_heading = "Rules")]
    pub skip_leading_whitespace: bool,

    /// Extra glob exempt from the line-length rule (repeatable, comma separated)
    #[arg(long, value_delimiter = ',', value_parser = parse_pattern, help_heading = "Rules")]
    pub exempt: Vec<String>,

    /// Drop the built-in exemption lists (*.py, *.mk, debian/rules, ...)
    #[arg(long, help_heading = "Rules")]
    pub no_default_exemptions: bool,
}

#[derive(ClapArgs, Debug, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ScanArgs {
    /// Treat inputs as unified diffs and check only added lines
    #[arg(long, help_heading = "Input")]
    pub patch: bool,

    /// Include hidden files and directories
    #[arg(long, help_heading = "Input")]
    pub hidden: bool,

    /// Do not honor .gitignore files
    #[arg(long, help_heading = "Input")]
    pub no_gitignore: bool,

    /// Follow symbolic links
    #[arg(long, help_heading = "Input")]
    pub follow: bool,

    /// Maximum directory depth to descend
    #[arg(long, help_heading = "Input")]
    pub max_depth: Option<usize>,

    /// gitignore-style pattern to leave out of directory walks (repeatable, comma separated)
    #[arg(long, value_delimiter = ',', value_parser = parse_pattern, help_heading = "Input")]
    pub exclude: Vec<String>,

    /// Number of walker threads [default: number of CPUs]
    #[arg(short, long, value_parser = parse_usize_1_to_512, help_heading = "Input")]
    pub jobs: Option<usize>,
}

#[derive(ClapArgs, Debug, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "human", help_heading = "Output")]
    pub format: OutputFormat,

    /// Do not print the summary line
    #[arg(short, long, help_heading = "Output")]
    pub quiet: bool,
}

#[derive(ClapArgs, Debug, Default)]
pub struct BehaviorArgs {
    /// YAML configuration file [default: ./.colcheck.yaml when present]
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "no_config", help_heading = "Behavior")]
    pub config: Option<PathBuf>,

    /// Ignore ./.colcheck.yaml
    #[arg(long, help_heading = "Behavior")]
    pub no_config: bool,

    /// Abort on the first unreadable input
    #[arg(long, help_heading = "Behavior")]
    pub strict: bool,
}
