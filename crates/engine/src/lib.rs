// crates/engine/src/lib.rs
use rayon::prelude::*;
use std::io::BufRead;
use std::path::{Path, PathBuf};

pub mod config;
pub mod config_file;
pub mod error;
pub mod filesystem;
pub mod options;
pub mod patch;
pub mod processor;
pub mod selection;
pub mod stats;

use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::options::InputMode;
use crate::stats::{FileReport, RunResult};

/// Input name that stands for standard input in patch mode.
pub const STDIN_MARKER: &str = "-";

/// Run the checker over the configured inputs.
///
/// Returns a `RunResult` holding a report per checked file, sorted by path,
/// and any per-input errors.
///
/// # Errors
///
/// In strict mode the first per-input error aborts the run. Otherwise only
/// failures to start the walk are returned; individual read errors are
/// collected in `RunResult::errors`.
pub fn run(config: &Config) -> Result<RunResult> {
    let mut result = match config.mode {
        InputMode::Files => run_files(config)?,
        InputMode::Patch => run_patches(config)?,
    };
    result.sort();
    Ok(result)
}

/// Check a patch read from an arbitrary reader (stdin in the CLI).
///
/// # Errors
/// Returns an error if the reader fails or the patch is malformed.
pub fn run_patch_reader<R: BufRead>(reader: &mut R, config: &Config) -> Result<RunResult> {
    let reports = processor::check_patch(reader, Path::new(STDIN_MARKER), config)?;
    let mut result = RunResult {
        reports,
        errors: Vec::new(),
    };
    result.sort();
    Ok(result)
}

fn run_files(config: &Config) -> Result<RunResult> {
    let (tx, rx) = crossbeam_channel::bounded(1024);
    let (err_tx, err_rx) = crossbeam_channel::unbounded();

    let walk_cfg = config.walk.clone();

    std::thread::spawn(move || {
        if let Err(e) = crate::filesystem::walk_parallel(&walk_cfg, &tx, &err_tx) {
            let _ = err_tx.send(e);
        }
    });

    let iter = rx.into_iter().par_bridge();

    let mut result = if config.strict {
        // Strict mode: fail on first error
        let reports = iter
            .map(|path| processor::check_file(path, config))
            .collect::<Result<Vec<_>>>()?;
        RunResult {
            reports,
            errors: Vec::new(),
        }
    } else {
        let (reports, errors): (Vec<FileReport>, Vec<(PathBuf, EngineError)>) = iter
            .map(|path| {
                let origin = path.clone();
                processor::check_file(path, config).map_err(|e| (origin, e))
            })
            .partition_map(|r| match r {
                Ok(report) => rayon::iter::Either::Left(report),
                Err(failed) => rayon::iter::Either::Right(failed),
            });
        for (path, err) in &errors {
            log::warn!("{}: {err}", path.display());
        }
        RunResult { reports, errors }
    };

    // Walk errors (missing roots, unreadable entries) arrive on the side
    // channel; it closes when the walk thread finishes.
    for walk_err in err_rx {
        if config.strict {
            return Err(walk_err);
        }
        let path = walk_err
            .path()
            .map_or_else(|| PathBuf::from("<walk>"), Path::to_path_buf);
        result.errors.push((path, walk_err));
    }

    Ok(result)
}

fn run_patches(config: &Config) -> Result<RunResult> {
    let roots = &config.walk.roots;
    if roots.is_empty() || roots.iter().any(|r| r == Path::new(STDIN_MARKER)) {
        if roots.len() > 1 {
            return Err(EngineError::Config(
                "stdin ('-') cannot be combined with other patch inputs".to_string(),
            ));
        }
        return run_patch_reader(&mut std::io::stdin().lock(), config);
    }

    let outcomes: Vec<(PathBuf, Result<Vec<FileReport>>)> = roots
        .par_iter()
        .map(|path| (path.clone(), processor::check_patch_path(path, config)))
        .collect();

    let mut result = RunResult::default();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(reports) => result.reports.extend(reports),
            Err(e) if config.strict => return Err(e),
            Err(e) => {
                log::warn!("{}: {e}", path.display());
                result.errors.push((path, e));
            }
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigBuilder, WalkOptionsBuilder};
    use colcheck_core::RuleId;
    use std::fs;

    fn files_config(roots: Vec<PathBuf>, strict: bool) -> Config {
        ConfigBuilder::default()
            .walk(WalkOptionsBuilder::default().roots(roots).threads(2usize).build().unwrap())
            .strict(strict)
            .build()
            .unwrap()
    }

    #[test]
    fn run_checks_tree_and_sorts_reports() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.c"), format!("{}\n", "x".repeat(80))).unwrap();
        fs::write(dir.path().join("a.c"), "fine\n\tindented\n").unwrap();
        fs::write(dir.path().join("setup.py"), format!("{}\n", "x".repeat(200))).unwrap();

        let result = run(&files_config(vec![dir.path().to_path_buf()], false)).unwrap();
        let names: Vec<_> = result
            .reports
            .iter()
            .map(|r| r.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.c", "b.c", "setup.py"]);

        let summary = result.summary();
        assert_eq!(summary.lines_checked, 4);
        assert_eq!(summary.warnings, 2);
        assert_eq!(summary.tally.count(RuleId::LineLength), 1);
        assert_eq!(summary.tally.count(RuleId::LeadingWhitespace), 1);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn missing_root_is_collected_or_fatal() {
        let missing = vec![PathBuf::from("/nonexistent/colcheck-root")];

        let result = run(&files_config(missing.clone(), false)).unwrap();
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].0, missing[0]);
        assert_eq!(result.summary().errors, 1);

        assert!(run(&files_config(missing, true)).is_err());
    }

    #[test]
    fn missing_root_does_not_hide_other_roots() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/long.c"), format!("{}\n", "x".repeat(90))).unwrap();
        let roots = vec![dir.path().join("missing.c"), dir.path().join("src")];

        let result = run(&files_config(roots.clone(), false)).unwrap();
        assert_eq!(result.reports.len(), 1);
        assert_eq!(result.summary().warnings, 1);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].0, roots[0]);

        assert!(run(&files_config(roots, true)).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_walk_entries_count_as_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.c"), "fine\n").unwrap();
        std::os::unix::fs::symlink(dir.path().join("nowhere.c"), dir.path().join("dangling.c"))
            .unwrap();
        let config = |strict: bool| {
            ConfigBuilder::default()
                .walk(
                    WalkOptionsBuilder::default()
                        .roots(vec![dir.path().to_path_buf()])
                        .follow_links(true)
                        .build()
                        .unwrap(),
                )
                .strict(strict)
                .build()
                .unwrap()
        };

        let result = run(&config(false)).unwrap();
        assert_eq!(result.reports.len(), 1);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].0, dir.path().join("dangling.c"));
        assert_eq!(result.summary().errors, 1);

        assert!(run(&config(true)).is_err());
    }

    #[test]
    fn patch_mode_reads_patch_files() {
        let dir = tempfile::tempdir().unwrap();
        let patch = dir.path().join("0001.patch");
        fs::write(
            &patch,
            "--- a/x.c\n+++ b/x.c\n@@ -0,0 +1,2 @@\n+ok\n+trailing \n",
        )
        .unwrap();
        let config = ConfigBuilder::default()
            .mode(InputMode::Patch)
            .walk(WalkOptionsBuilder::default().roots(vec![patch]).build().unwrap())
            .build()
            .unwrap();

        let result = run(&config).unwrap();
        assert_eq!(result.reports.len(), 1);
        assert_eq!(result.reports[0].path, PathBuf::from("x.c"));
        let d = &result.reports[0].diagnostics;
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].rule, RuleId::TrailingWhitespace);
        assert_eq!(d[0].location.as_ref().unwrap().line, 2);
    }

    #[test]
    fn patch_reader_entry_point() {
        let patch = format!("--- a/y.c\n+++ b/y.c\n@@ -0,0 +1 @@\n+{}\n", "q".repeat(90));
        let result = run_patch_reader(&mut patch.as_bytes(), &Config::default()).unwrap();
        assert_eq!(result.summary().warnings, 1);
    }
}
