use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::patch::{PatchFile, PatchParser};
use crate::stats::{FileReport, display_name};
use colcheck_core::{LineChecker, Location};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Check every line of a single source file.
pub fn check_file(path: PathBuf, config: &Config) -> Result<FileReport> {
    let mut report = FileReport::new(path.clone());
    let options = config.options_for(&path);
    if options.is_noop() {
        log::debug!("{}: every rule is exempt, skipping", path.display());
        return Ok(report);
    }

    let file = File::open(&path).map_err(|e| EngineError::FileRead {
        path: path.clone(),
        source: e,
    })?;
    let mut reader = BufReader::new(file);

    // Binary check (Initial buffer check)
    {
        let buffer = reader.fill_buf().map_err(|e| EngineError::FileRead {
            path: path.clone(),
            source: e,
        })?;
        if buffer.is_empty() {
            return Ok(report);
        }
        if buffer.contains(&0) {
            log::warn!("{}: binary file, skipping", path.display());
            report.is_binary = true;
            return Ok(report);
        }
    }

    let checker = LineChecker::new(&options);
    let mut location = Location::new(display_name(&path), 0);
    let mut line_buf = Vec::new();

    loop {
        line_buf.clear();
        match reader.read_until(b'\n', &mut line_buf) {
            Ok(0) => break,
            Ok(_) => {
                report.lines_checked += 1;
                location.line = report.lines_checked;
                location.input_line = report.lines_checked;

                // Use lossy conversion to support non-UTF8 text files (mostly)
                let cow = String::from_utf8_lossy(&line_buf);
                let line = cow.strip_suffix('\n').unwrap_or(&*cow);
                checker.check_line(line, &location, &mut report.diagnostics);
            }
            Err(e) => {
                return Err(EngineError::FileRead {
                    path: path.clone(),
                    source: e,
                });
            }
        }
    }

    log::debug!(
        "{}: {} lines, {} diagnostics",
        path.display(),
        report.lines_checked,
        report.diagnostics.len()
    );
    Ok(report)
}

/// Check the added lines of a unified diff read from `reader`.
///
/// `origin` names the patch in error messages (`-` for stdin).
pub fn check_patch<R: BufRead>(
    reader: &mut R,
    origin: &Path,
    config: &Config,
) -> Result<Vec<FileReport>> {
    let mut parser = PatchParser::new();
    let mut line_buf = Vec::new();
    let mut input_line = 0;

    loop {
        line_buf.clear();
        let n = reader
            .read_until(b'\n', &mut line_buf)
            .map_err(|e| EngineError::FileRead {
                path: origin.to_path_buf(),
                source: e,
            })?;
        if n == 0 {
            break;
        }
        input_line += 1;
        let cow = String::from_utf8_lossy(&line_buf);
        let line = cow.strip_suffix('\n').unwrap_or(&*cow);
        parser.feed(input_line, line)?;
    }

    let reports: Vec<FileReport> = parser
        .finish()
        .into_iter()
        .map(|file| check_patch_file(file, config))
        .collect();
    log::debug!("{}: {} files in patch", origin.display(), reports.len());
    Ok(reports)
}

/// Open `path` and check it as a patch.
pub fn check_patch_path(path: &Path, config: &Config) -> Result<Vec<FileReport>> {
    let file = File::open(path).map_err(|e| EngineError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    check_patch(&mut BufReader::new(file), path, config)
}

fn check_patch_file(file: PatchFile, config: &Config) -> FileReport {
    let options = config.options_for(&file.path);
    let checker = LineChecker::new(&options);
    let mut report = FileReport::new(file.path);
    let name = display_name(&report.path);

    for added in &file.added {
        report.lines_checked += 1;
        let location = Location::new(name.as_str(), added.line).with_input_line(added.input_line);
        checker.check_line(&added.text, &location, &mut report.diagnostics);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use colcheck_core::RuleId;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(suffix: &str, content: &[u8]) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn reports_long_lines_with_numbers() {
        let content = format!("short\n{}\n{}\n", "x".repeat(79), "x".repeat(80));
        let file = write_temp(".c", content.as_bytes());
        let report = check_file(file.path().to_path_buf(), &Config::default()).unwrap();

        assert_eq!(report.lines_checked, 3);
        assert_eq!(report.diagnostics.len(), 1);
        let d = &report.diagnostics[0];
        assert_eq!(d.rule, RuleId::LineLength);
        assert_eq!(d.location.as_ref().unwrap().line, 3);
        assert_eq!(
            d.message,
            "Line is 80 characters long (recommended limit is 79)"
        );
    }

    #[test]
    fn exempt_suffix_skips_line_length() {
        let content = format!("{}\n", "x".repeat(120));
        let file = write_temp(".py", content.as_bytes());
        let report = check_file(file.path().to_path_buf(), &Config::default()).unwrap();
        assert_eq!(report.lines_checked, 1);
        assert!(report.is_clean());
    }

    #[test]
    fn configured_limit_is_used() {
        let config = ConfigBuilder::default()
            .check(colcheck_core::CheckOptions {
                max_line_length: 10,
                ..Default::default()
            })
            .build()
            .unwrap();
        let file = write_temp(".c", b"0123456789a\n0123456789\n");
        let report = check_file(file.path().to_path_buf(), &config).unwrap();
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.diagnostics[0].message.contains("11"));
    }

    #[test]
    fn binary_files_are_marked() {
        let file = write_temp(".c", b"\x7fELF\0\0\0    \n");
        let report = check_file(file.path().to_path_buf(), &Config::default()).unwrap();
        assert!(report.is_binary);
        assert_eq!(report.lines_checked, 0);
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = check_file(PathBuf::from("/nonexistent/x.c"), &Config::default()).unwrap_err();
        assert!(matches!(err, EngineError::FileRead { .. }));
    }

    #[test]
    fn patch_checks_only_added_lines() {
        let patch = format!(
            "--- a/lib/a.c\n+++ b/lib/a.c\n@@ -1,2 +1,2 @@\n-{old}\n+{new}\n {old}\n",
            old = "o".repeat(100),
            new = "n".repeat(81),
        );
        let reports =
            check_patch(&mut patch.as_bytes(), Path::new("-"), &Config::default()).unwrap();
        assert_eq!(reports.len(), 1);
        let r = &reports[0];
        assert_eq!(r.lines_checked, 1);
        assert_eq!(r.diagnostics.len(), 1);
        let loc = r.diagnostics[0].location.as_ref().unwrap();
        assert_eq!(loc.file, "lib/a.c");
        assert_eq!(loc.line, 1);
        assert_eq!(loc.input_line, 5);
    }

    #[test]
    fn patch_respects_exemptions_of_target() {
        let patch = format!(
            "--- a/Makefile.am\n+++ b/Makefile.am\n@@ -0,0 +1 @@\n+\t{}\n",
            "x".repeat(100)
        );
        let reports =
            check_patch(&mut patch.as_bytes(), Path::new("-"), &Config::default()).unwrap();
        assert!(reports[0].is_clean());
    }
}
