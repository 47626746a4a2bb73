//! Scan command - report orphaned thumbnails

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::thread;

use crate::config::PROGRESS_INTERVAL;
use crate::core::ProgressInfo;
use crate::session::ScanSession;
use crate::ui;

#[derive(Serialize)]
struct JsonReport<'a> {
    root: &'a Path,
    progress: &'a ProgressInfo,
    orphans: &'a [PathBuf],
    elapsed_ms: u128,
}

pub fn run(list: bool, json: bool) -> Result<()> {
    if json {
        ui::Log::set_stderr(true);
    }
    let mut session = ScanSession::with_default_root();

    if json {
        session.start()?;
        let progress = session.wait()?;
        let orphans = session.orphans();
        let report = JsonReport {
            root: session.root(),
            progress: &progress,
            orphans: &orphans,
            elapsed_ms: session.elapsed().as_millis(),
        };
        println!("{}", serde_json::to_string_pretty(&report).context("Failed to serialize report")?);
        return Ok(());
    }

    let progress = scan_with_progress(&mut session)?;
    summary(&progress, &session);

    if list {
        for path in session.orphans() {
            println!("  {}", ui::path_link(&path).dimmed());
        }
        println!();
    }

    Ok(())
}

/// Start the session and redraw the progress line until the walk is over
pub(crate) fn scan_with_progress(session: &mut ScanSession) -> Result<ProgressInfo> {
    ui::info(&format!("Scanning: {}", session.root().display()));

    session.start()?;
    while session.is_running() {
        ui::progress(&session.snapshot());
        thread::sleep(PROGRESS_INTERVAL);
    }
    let progress = session.wait()?;
    ui::progress(&progress);
    println!();

    Ok(progress)
}

fn summary(progress: &ProgressInfo, session: &ScanSession) {
    ui::header("Summary");

    println!("  {} {} ({})", "Thumbnails:".bright_blue(), progress.total_files, ui::human_size(progress.total_bytes));
    println!(
        "  {} {} ({})",
        "Orphaned:".yellow(),
        progress.orphan_count,
        ui::human_size(progress.orphan_bytes)
    );
    println!("  {} {}", "Valid:".bright_blue(), progress.statuses.valid);
    if progress.statuses.invalid > 0 {
        println!("  {} {}", "Invalid:".dimmed(), progress.statuses.invalid);
    }
    if progress.statuses.external > 0 {
        println!("  {} {}", "External:".dimmed(), progress.statuses.external);
    }
    println!("  {} {:.2}s", "Duration:".bright_blue(), session.elapsed().as_secs_f32());
    println!();

    if progress.orphan_count == 0 {
        ui::success("No outdated thumbnails");
    } else {
        ui::warn(&format!(
            "{} outdated thumbnails, {}",
            progress.orphan_count,
            ui::human_size(progress.orphan_bytes)
        ));
    }
}
