// crates/engine/src/patch.rs
//! Unified diff reader.
//!
//! Extracts the added lines of each file in a patch (plain `diff -u`
//! output, `git diff`, or a `git format-patch` mail) together with their
//! line numbers in the new version of the file. Hunk line counts are
//! tracked so that added lines which happen to look like headers
//! (`+++ x`, `@@`) are still read as content.

use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::error::{EngineError, Result};

static HUNK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@")
        .expect("hunk header regex is valid")
});

/// A line added by the patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedLine {
    /// 1-based line number in the patched file.
    pub line: usize,
    /// 1-based line number in the patch itself.
    pub input_line: usize,
    /// Line text without the leading `+` and without `\n`.
    pub text: String,
}

/// Added lines for one target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchFile {
    pub path: PathBuf,
    pub added: Vec<AddedLine>,
}

#[derive(Debug, Clone, Copy)]
struct Hunk {
    old_left: usize,
    new_left: usize,
    next_line: usize,
}

impl Hunk {
    const fn is_done(&self) -> bool {
        self.old_left == 0 && self.new_left == 0
    }
}

/// Line-at-a-time patch parser.
#[derive(Debug, Default)]
pub struct PatchParser {
    files: Vec<PatchFile>,
    /// Set once a `+++` header was read, until the next `diff` line.
    in_file: bool,
    /// `false` while inside a file whose target is `/dev/null`.
    recording: bool,
    /// The previous line was a `--- ` header.
    after_old_header: bool,
    hunk: Option<Hunk>,
}

impl PatchParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next line of the patch (without its `\n`). `input_line` is
    /// the 1-based position of `line` in the patch.
    ///
    /// # Errors
    /// Returns [`EngineError::Patch`] for a malformed hunk header.
    pub fn feed(&mut self, input_line: usize, line: &str) -> Result<()> {
        if let Some(hunk) = self.hunk.as_mut() {
            if Self::feed_hunk(hunk, &mut self.files, self.recording, input_line, line) {
                if hunk.is_done() {
                    self.hunk = None;
                }
                self.after_old_header = false;
                return Ok(());
            }
            self.hunk = None;
        }
        self.feed_header(input_line, line)
    }

    /// Returns `false` when `line` is not hunk content.
    fn feed_hunk(
        hunk: &mut Hunk,
        files: &mut [PatchFile],
        recording: bool,
        input_line: usize,
        line: &str,
    ) -> bool {
        match line.as_bytes().first() {
            Some(b'+') if hunk.new_left > 0 => {
                if recording && let Some(file) = files.last_mut() {
                    file.added.push(AddedLine {
                        line: hunk.next_line,
                        input_line,
                        text: line[1..].to_string(),
                    });
                }
                hunk.new_left -= 1;
                hunk.next_line += 1;
            }
            Some(b'-') if hunk.old_left > 0 => hunk.old_left -= 1,
            // Some tools drop the single space of an empty context line.
            Some(b' ') | None => {
                hunk.old_left = hunk.old_left.saturating_sub(1);
                hunk.new_left = hunk.new_left.saturating_sub(1);
                hunk.next_line += 1;
            }
            Some(b'\\') => {}
            _ => return false,
        }
        true
    }

    fn feed_header(&mut self, input_line: usize, line: &str) -> Result<()> {
        let after_old_header =
            std::mem::replace(&mut self.after_old_header, line.starts_with("--- "));
        if line.starts_with("diff ") {
            self.in_file = false;
            self.recording = false;
        } else if after_old_header && let Some(target) = line.strip_prefix("+++ ") {
            self.start_file(target);
        } else if self.in_file && line.starts_with("@@ ") {
            self.hunk = Some(parse_hunk_header(input_line, line)?);
        }
        Ok(())
    }

    fn start_file(&mut self, target: &str) {
        let target = target.split('\t').next().unwrap_or(target).trim_end();
        self.in_file = true;
        if target == "/dev/null" {
            log::debug!("skipping deleted file in patch");
            self.recording = false;
            return;
        }
        let path = target.strip_prefix("b/").unwrap_or(target);
        self.files.push(PatchFile {
            path: PathBuf::from(path),
            added: Vec::new(),
        });
        self.recording = true;
    }

    #[must_use]
    pub fn finish(self) -> Vec<PatchFile> {
        self.files
    }
}

fn parse_hunk_header(input_line: usize, line: &str) -> Result<Hunk> {
    let malformed = |reason: &str| EngineError::Patch {
        line: input_line,
        reason: format!("{reason}: {line}"),
    };
    let caps = HUNK_HEADER
        .captures(line)
        .ok_or_else(|| malformed("bad hunk header"))?;
    let number = |idx: usize| -> Result<usize> {
        caps.get(idx).map_or(Ok(1), |m| {
            m.as_str()
                .parse()
                .map_err(|_| malformed("hunk range out of range"))
        })
    };
    Ok(Hunk {
        old_left: number(2)?,
        new_left: number(4)?,
        next_line: number(3)?,
    })
}

/// Parse a whole patch held in memory.
///
/// # Errors
/// Returns an error for a malformed hunk header.
pub fn parse_patch(text: &str) -> Result<Vec<PatchFile>> {
    let mut parser = PatchParser::new();
    for (idx, raw) in text.split_inclusive('\n').enumerate() {
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        parser.feed(idx + 1, line)?;
    }
    Ok(parser.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GIT_PATCH: &str = "\
From 1111 Mon Sep 17 00:00:00 2001
From: Dev <dev@example.org>
Subject: [PATCH] northd: Tidy.

+++ this line is commit text, not a header
---
 northd/lswitch.c | 3 ++-
 1 file changed

diff --git a/northd/lswitch.c b/northd/lswitch.c
index 1..2 100644
--- a/northd/lswitch.c
+++ b/northd/lswitch.c
@@ -10,3 +10,4 @@ lswitch_init(void)
 context one
-removed
+added one
+added two
 context two
@@ -40 +41 @@
-old
+new
--
2.43.0
";

    #[test]
    fn extracts_added_lines_with_numbers() {
        let files = parse_patch(GIT_PATCH).unwrap();
        assert_eq!(files.len(), 1);
        let f = &files[0];
        assert_eq!(f.path, PathBuf::from("northd/lswitch.c"));
        let got: Vec<_> = f.added.iter().map(|a| (a.line, a.text.as_str())).collect();
        assert_eq!(got, vec![(11, "added one"), (12, "added two"), (41, "new")]);
        assert_eq!(f.added[0].input_line, 17);
    }

    #[test]
    fn header_lookalikes_inside_hunk_are_content() {
        let patch = "\
--- a/x.c
+++ b/x.c
@@ -1,0 +1,3 @@
++++ not a header
+@@ nor this
+--- nor this
";
        let files = parse_patch(patch).unwrap();
        assert_eq!(files.len(), 1);
        let texts: Vec<_> = files[0].added.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, vec!["+++ not a header", "@@ nor this", "--- nor this"]);
    }

    #[test]
    fn deleted_files_are_skipped() {
        let patch = "\
diff --git a/gone.c b/gone.c
--- a/gone.c
+++ /dev/null
@@ -1,2 +0,0 @@
-a
-b
diff --git a/kept.c b/kept.c
--- a/kept.c
+++ b/kept.c
@@ -0,0 +1 @@
+hello
";
        let files = parse_patch(patch).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, PathBuf::from("kept.c"));
        assert_eq!(files[0].added[0].line, 1);
    }

    #[test]
    fn plain_diff_timestamps_are_stripped() {
        let patch = "--- old/a.c\t2024-01-01\n+++ new/a.c\t2024-01-02\n@@ -1 +1 @@\n-x\n+y\n";
        let files = parse_patch(patch).unwrap();
        assert_eq!(files[0].path, PathBuf::from("new/a.c"));
    }

    #[test]
    fn carriage_returns_survive() {
        let patch = "--- a/a.c\n+++ b/a.c\n@@ -0,0 +1 @@\n+x\r\n";
        let files = parse_patch(patch).unwrap();
        assert_eq!(files[0].added[0].text, "x\r");
    }

    #[test]
    fn malformed_hunk_header_is_an_error() {
        let err = parse_patch("--- a/a.c\n+++ b/a.c\n@@ bogus @@\n").unwrap_err();
        match err {
            EngineError::Patch { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn no_diff_means_no_files() {
        assert!(parse_patch("just some text\n").unwrap().is_empty());
        assert!(parse_patch("+++ lone\n@@ not a hunk\n").unwrap().is_empty());
    }
}
