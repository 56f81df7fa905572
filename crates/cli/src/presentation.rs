// crates/cli/src/presentation.rs
use crate::config::Settings;
use crate::error::Result;
use colcheck_core::{Diagnostic, Reporter};
use colcheck_engine::error::EngineError;
use colcheck_engine::options::OutputFormat;
use colcheck_engine::stats::{RunResult, Summary};
use std::io::{self, Write};
use std::path::PathBuf;

/// Console reporter writing checkpatch-style blocks:
///
/// ```text
/// WARNING: Line is 80 characters long (recommended limit is 79)
/// #3 FILE: src/lib.c:3:
/// <the offending line>
/// ```
///
/// A diagnostic without a location prints only the first line.
/// Write errors are kept and returned by [`ConsoleReporter::finish`].
pub struct ConsoleReporter<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleReporter<W> {
    pub const fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flush and hand back the writer.
    ///
    /// # Errors
    /// Returns the first write error seen while reporting.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_diagnostic(&mut self, d: &Diagnostic) -> io::Result<()> {
        writeln!(self.out, "{}: {}", d.severity.label(), d.message)?;
        if let Some(loc) = &d.location {
            writeln!(self.out, "#{} FILE: {}:{}:", loc.input_line, loc.file, loc.line)?;
            writeln!(self.out, "{}", d.context)?;
            writeln!(self.out)?;
        }
        Ok(())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, diagnostic: Diagnostic) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.write_diagnostic(&diagnostic) {
            self.error = Some(e);
        }
    }
}

/// Print a run in the configured format.
///
/// # Errors
/// Returns an error if writing to `out` fails or serialization fails.
pub fn print_results<W: Write>(
    result: &RunResult,
    settings: &Settings,
    out: &mut W,
) -> Result<()> {
    let summary = result.summary();
    match settings.format {
        OutputFormat::Human => {
            print_human(result, out)?;
            if !settings.quiet {
                print_summary(&summary, out)?;
            }
        }
        OutputFormat::Json => print_json(result, out)?,
        OutputFormat::Jsonl => print_jsonl(result, &summary, out)?,
    }
    out.flush()?;
    Ok(())
}

fn print_human<W: Write>(result: &RunResult, out: &mut W) -> io::Result<()> {
    let mut reporter = ConsoleReporter::new(&mut *out);
    for d in result.reports.iter().flat_map(|r| &r.diagnostics) {
        reporter.report(d.clone());
    }
    reporter.finish()?;
    Ok(())
}

/// `Lines checked: N, Warnings: W, Errors: E`, then one line per rule hit.
///
/// # Errors
/// Returns an error if writing fails.
pub fn print_summary<W: Write>(summary: &Summary, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "Lines checked: {}, Warnings: {}, Errors: {}",
        summary.lines_checked, summary.warnings, summary.errors
    )?;
    for (rule, count) in summary.tally.by_rule() {
        writeln!(out, "  {rule}: {count}")?;
    }
    Ok(())
}

fn print_json<W: Write>(result: &RunResult, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &result.reports)?;
    writeln!(out)?;
    Ok(())
}

fn print_jsonl<W: Write>(result: &RunResult, summary: &Summary, out: &mut W) -> Result<()> {
    for d in result.reports.iter().flat_map(|r| &r.diagnostics) {
        let mut v = serde_json::to_value(d)?;
        if let Some(obj) = v.as_object_mut() {
            obj.insert("type".to_string(), "diagnostic".into());
        }
        writeln!(out, "{}", serde_json::to_string(&v)?)?;
    }

    let rules: serde_json::Map<String, serde_json::Value> = summary
        .tally
        .by_rule()
        .map(|(rule, n)| (rule.as_str().to_string(), n.into()))
        .collect();
    let total_obj = serde_json::json!({
        "type": "total",
        "version": crate::VERSION,
        "files": summary.files,
        "lines_checked": summary.lines_checked,
        "warnings": summary.warnings,
        "errors": summary.errors,
        "rules": rules,
    });
    writeln!(out, "{total_obj}")?;
    Ok(())
}

/// Report inputs that could not be checked.
///
/// # Errors
/// Returns an error if writing fails.
pub fn print_errors<W: Write>(errors: &[(PathBuf, EngineError)], out: &mut W) -> io::Result<()> {
    for (path, err) in errors {
        writeln!(out, "Error processing {}: {err}", path.display())?;
    }
    Ok(())
}
