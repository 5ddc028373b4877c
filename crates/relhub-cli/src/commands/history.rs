//! Revision history command.

use std::path::PathBuf;

use clap::Args;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use relhub_core::config::AppConfig;
use relhub_core::error::AppError;
use relhub_service::{ReleaseHistory, RevisionHistoryEntry};

/// Arguments for the history command
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Release name, e.g. `tooling-0.2.1`
    pub release: String,

    /// Also list the changed paths of every revision
    #[arg(long)]
    pub files: bool,
}

/// One line of the history table
#[derive(Debug, Tabled)]
struct HistoryRow {
    #[tabled(rename = "Revision")]
    revision: String,
    #[tabled(rename = "Phase")]
    phase: &'static str,
    #[tabled(rename = "Parent")]
    parent: String,
    #[tabled(rename = "+")]
    added: usize,
    #[tabled(rename = "-")]
    removed: usize,
    #[tabled(rename = "~")]
    modified: usize,
    #[tabled(rename = "Flags")]
    flags: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "By")]
    asfuid: String,
}

impl From<&RevisionHistoryEntry> for HistoryRow {
    fn from(entry: &RevisionHistoryEntry) -> Self {
        let mut flags = Vec::new();
        if entry.is_latest {
            flags.push("latest");
        }
        if entry.modifiable {
            flags.push("modifiable");
        }
        if entry.snapshot_missing {
            flags.push("missing");
        }

        Self {
            revision: entry.revision.display_label(),
            phase: entry.phase_key(),
            parent: entry.parent_number().unwrap_or("-").to_string(),
            added: entry.files.added.len(),
            removed: entry.files.removed.len(),
            modified: entry.files.modified.len(),
            flags: flags.join(","),
            created: entry.revision.created_display(),
            asfuid: entry.revision.asfuid.clone(),
        }
    }
}

/// Execute the history command
pub async fn execute(
    args: &HistoryArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::Services::connect(config).await?;
    let cancel = super::cancel_on_interrupt();

    let result = services.history.history(&args.release, &cancel).await;
    services.close().await;
    let history = result?;

    match format {
        OutputFormat::Json => output::print_json(&history)?,
        OutputFormat::Table => print_table(&history, args.files),
    }
    Ok(())
}

fn print_table(history: &ReleaseHistory, with_files: bool) {
    println!(
        "{} ({})",
        history.release.short_display_name(),
        history.release.phase.short_key()
    );

    let rows: Vec<HistoryRow> = history.entries.iter().map(HistoryRow::from).collect();
    output::print_table(&rows);

    for entry in &history.entries {
        if entry.snapshot_missing {
            output::print_warning(&format!(
                "Snapshot of revision {} is missing on disk",
                entry.revision.number
            ));
        }
    }

    if !with_files {
        return;
    }
    for entry in history.entries.iter().filter(|e| !e.files.is_empty()) {
        println!();
        println!("Revision {}", entry.revision.display_label());
        print_paths('+', &entry.files.added);
        print_paths('-', &entry.files.removed);
        print_paths('~', &entry.files.modified);
    }
}

fn print_paths(marker: char, paths: &[PathBuf]) {
    for path in paths {
        println!("  {marker} {}", path.display());
    }
}
