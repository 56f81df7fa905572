// crates/cli/src/config.rs
use crate::args::Args;
use crate::error::Result;
use crate::options;
use colcheck_core::{CheckOptions, RuleId};
pub use colcheck_engine::config::{Config, ConfigBuilder, WalkOptions, WalkOptionsBuilder};
use colcheck_engine::config_file::{self, FileConfig};
use colcheck_engine::error::EngineError;
use colcheck_engine::options::{self as engine_options, InputMode};
use colcheck_engine::selection::RuleSelector;
use std::path::{Path, PathBuf};

/// Everything `main` needs: the engine configuration plus presentation flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub engine: Config,
    pub format: engine_options::OutputFormat,
    pub quiet: bool,
}

impl Settings {
    /// Merge the YAML config file (if any) with the command line.
    /// `cwd` is where `.colcheck.yaml` is looked up.
    ///
    /// # Errors
    /// Returns an error for an unreadable or invalid config file, or an
    /// invalid exemption pattern.
    pub fn resolve(args: Args, cwd: &Path) -> Result<Self> {
        let file = load_file_config(&args, cwd)?;

        let check = check_options_from(&args, &file);
        let selector = selector_from(&args, &file)?;
        let walk = walk_options_from(&args, &file)?;
        let mode = if args.scan.patch {
            InputMode::Patch
        } else {
            InputMode::Files
        };

        let engine = ConfigBuilder::default()
            .walk(walk)
            .mode(mode)
            .check(check)
            .selector(selector)
            .strict(args.behavior.strict)
            .build()
            .map_err(|e| EngineError::Config(e.to_string()))?;

        Ok(Self {
            engine,
            format: args.output.format.into(),
            quiet: args.output.quiet,
        })
    }
}

fn load_file_config(args: &Args, cwd: &Path) -> Result<FileConfig> {
    if args.behavior.no_config {
        return Ok(FileConfig::default());
    }
    let path = match &args.behavior.config {
        Some(path) => Some(path.clone()),
        None => config_file::discover(cwd),
    };
    Ok(path
        .map(|p| FileConfig::load(&p))
        .transpose()?
        .unwrap_or_default())
}

fn check_options_from(args: &Args, file: &FileConfig) -> CheckOptions {
    let rules = &args.rules;
    let mut check = file.apply_to(CheckOptions::default());
    if let Some(max) = rules.max_line_length {
        check.max_line_length = max;
    }
    [
        (rules.skip_line_length, RuleId::LineLength),
        (rules.skip_trailing_whitespace, RuleId::TrailingWhitespace),
        (rules.skip_leading_whitespace, RuleId::LeadingWhitespace),
    ]
    .into_iter()
    .filter(|(skip, _)| *skip)
    .fold(check, |c, (_, rule)| c.without(rule))
}

fn selector_from(args: &Args, file: &FileConfig) -> Result<RuleSelector> {
    let use_defaults = !args.rules.no_default_exemptions && file.default_exemptions.unwrap_or(true);
    let line_length: Vec<String> = file
        .line_length_exempt
        .iter()
        .chain(&args.rules.exempt)
        .cloned()
        .collect();
    Ok(RuleSelector::new(
        &line_length,
        &file.leading_whitespace_exempt,
        use_defaults,
    )?)
}

fn walk_options_from(args: &Args, file: &FileConfig) -> Result<WalkOptions> {
    let scan = &args.scan;

    let roots = if args.paths.is_empty() && !scan.patch {
        vec![PathBuf::from(".")]
    } else {
        args.paths.clone()
    };
    let exclude: Vec<String> = file.exclude.iter().chain(&scan.exclude).cloned().collect();

    Ok(WalkOptionsBuilder::default()
        .roots(roots)
        .threads(scan.jobs.unwrap_or_else(num_cpus::get))
        .hidden(scan.hidden)
        .git_ignore(!scan.no_gitignore)
        .max_depth(scan.max_depth)
        .follow_links(scan.follow)
        .exclude(exclude)
        .build()
        .map_err(|e| EngineError::Config(e.to_string()))?)
}

// From trait implementations for CLI -> Engine enum conversion

macro_rules! map_enum {
    ($from:ty, $to:ty, $($variant:ident),+ $(,)?) => {
        impl From<$from> for $to {
            fn from(f: $from) -> Self {
                match f {
                    $( <$from>::$variant => <$to>::$variant, )+
                }
            }
        }
    };
}

map_enum!(
    options::OutputFormat,
    engine_options::OutputFormat,
    Human,
    Json,
    Jsonl
);
