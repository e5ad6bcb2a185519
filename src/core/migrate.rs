//! Per-file rewrite and run orchestration.
//!
//! Reads each discovered compose file into memory, applies the rule
//! table line by line, and writes the file back only when at least one
//! line actually changed. Failures are contained per file: a file that
//! cannot be read, parsed, or written contributes nothing to the
//! modified counts and the pass continues with the next file.

use std::fs::{self, OpenOptions};
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::locate;
use crate::rules;

/// Transformed line sequence plus the number of lines that differ from
/// the input.
#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    pub lines: Vec<String>,
    pub changed: usize,
}

/// Outcome for a single compose file within a run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOutcome {
    pub path: String,
    pub lines_changed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Run-level aggregate counters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrateSummary {
    pub files_found: usize,
    pub files_modified: usize,
    pub lines_changed: usize,
    pub files_failed: usize,
}

/// Full result of one migration pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrateResult {
    pub root: String,
    pub dry_run: bool,
    pub files: Vec<FileOutcome>,
    pub summary: MigrateSummary,
}

/// Apply the rule table to a full line sequence.
///
/// The output has exactly one line per input line, in order. A line
/// counts as changed only when its transformed text differs from the
/// original, so a pass over already-migrated content reports zero.
pub fn rewrite_lines(lines: &[String]) -> Result<RewriteOutcome> {
    let mut out = Vec::with_capacity(lines.len());
    let mut changed = 0;

    for line in lines {
        match rules::rewrite_line(line)? {
            Some(new_line) => {
                if new_line != *line {
                    changed += 1;
                }
                out.push(new_line);
            }
            None => out.push(line.clone()),
        }
    }

    Ok(RewriteOutcome { lines: out, changed })
}

/// Split file content into lines, each retaining its terminator.
fn split_lines(content: &str) -> Vec<String> {
    content.split_inclusive('\n').map(str::to_string).collect()
}

/// Probe that the file is both readable and writable before touching it.
fn check_read_write(path: &Path) -> Result<()> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map(|_| ())
        .map_err(|e| Error::file_permission_denied(path.to_string_lossy(), e.to_string()))
}

/// Rewrite a single compose file, returning the changed-line count.
///
/// The file is overwritten only when at least one line changed and
/// `dry_run` is off; otherwise its bytes and mtime are left alone.
pub fn process_file(path: &Path, dry_run: bool) -> Result<usize> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::file_io_failed(path.to_string_lossy(), "read", e.to_string()))?;

    let lines = split_lines(&content);
    let outcome = rewrite_lines(&lines)?;

    if outcome.changed > 0 && !dry_run {
        fs::write(path, outcome.lines.concat())
            .map_err(|e| Error::file_io_failed(path.to_string_lossy(), "write", e.to_string()))?;
    }

    Ok(outcome.changed)
}

/// Run a full migration pass under `root`.
///
/// Fatal only when the root is missing or not a directory; every
/// per-file failure is recorded in that file's outcome and the pass
/// moves on. Counters live in the returned result, never in shared
/// state.
pub fn run(root: &Path, dry_run: bool) -> Result<MigrateResult> {
    let compose_files = locate::find_compose_files(root)?;

    let mut files = Vec::with_capacity(compose_files.len());
    let mut files_modified = 0;
    let mut lines_changed = 0;
    let mut files_failed = 0;

    for path in &compose_files {
        log_status!("migrate", "Processing: {}", path.display());

        let result = check_read_write(path).and_then(|_| process_file(path, dry_run));

        match result {
            Ok(changed) => {
                if changed > 0 {
                    files_modified += 1;
                    lines_changed += changed;
                    log_status!(
                        "migrate",
                        "Modified {} lines in {}",
                        changed,
                        path.display()
                    );
                }
                files.push(FileOutcome {
                    path: path.to_string_lossy().to_string(),
                    lines_changed: changed,
                    error: None,
                });
            }
            Err(err) => {
                files_failed += 1;
                log_status!("migrate", "Failed: {}", err);
                files.push(FileOutcome {
                    path: path.to_string_lossy().to_string(),
                    lines_changed: 0,
                    error: Some(err.to_string()),
                });
            }
        }
    }

    Ok(MigrateResult {
        root: root.to_string_lossy().to_string(),
        dry_run,
        summary: MigrateSummary {
            files_found: files.len(),
            files_modified,
            lines_changed,
            files_failed,
        },
        files,
    })
}
