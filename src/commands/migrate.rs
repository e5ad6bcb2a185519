use std::path::Path;

use clap::Args;
use serde::Serialize;

use lostack_migrate::{locate, migrate};

use crate::commands::CmdResult;
use crate::tty;

#[derive(Args)]
pub struct MigrateArgs {
    /// Root directory to scan for docker-compose.yml files
    #[arg(long, default_value = "packages")]
    pub root: String,

    /// Compute and report changes without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Emit the run result as a JSON envelope on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum MigrateOutput {
    #[serde(rename = "migrate.run")]
    Run {
        root: String,
        dry_run: bool,
        files_found: usize,
        files_modified: usize,
        lines_changed: usize,
        files_failed: usize,
        files: Vec<FileSummary>,
    },
}

#[derive(Serialize)]
pub struct FileSummary {
    pub path: String,
    pub lines_changed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn run(args: &MigrateArgs) -> CmdResult<MigrateOutput> {
    tty::info("Starting to process docker-compose.yml files...");

    let result = migrate::run(Path::new(&args.root), args.dry_run)?;

    if result.files.is_empty() {
        tty::warning(&format!(
            "No {} files found in {}/ subdirectories",
            locate::COMPOSE_FILE_NAME,
            result.root
        ));
    }

    for file in &result.files {
        match &file.error {
            Some(cause) => tty::error(&format!("Error processing {}: {}", file.path, cause)),
            None if file.lines_changed > 0 => tty::info(&format!(
                "Processed: {} ({} lines changed)",
                file.path, file.lines_changed
            )),
            None => tty::info(&format!("Processed: {}", file.path)),
        }
    }

    tty::info("=== SUMMARY ===");
    tty::info(&format!("Files found: {}", result.summary.files_found));
    tty::info(&format!(
        "Files modified: {}",
        result.summary.files_modified
    ));
    tty::info(&format!(
        "Total lines changed: {}",
        result.summary.lines_changed
    ));
    if args.dry_run {
        tty::info("Dry run: no files were written.");
    }

    Ok((
        MigrateOutput::Run {
            root: result.root,
            dry_run: result.dry_run,
            files_found: result.summary.files_found,
            files_modified: result.summary.files_modified,
            lines_changed: result.summary.lines_changed,
            files_failed: result.summary.files_failed,
            files: result
                .files
                .into_iter()
                .map(|f| FileSummary {
                    path: f.path,
                    lines_changed: f.lines_changed,
                    error: f.error,
                })
                .collect(),
        },
        0,
    ))
}
