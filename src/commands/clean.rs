//! Clean command - remove orphaned thumbnails

use anyhow::Result;
use std::io::{self, Write};

use crate::session::ScanSession;
use crate::ui;

pub fn run(auto_confirm: bool) -> Result<()> {
    let mut session = ScanSession::with_default_root();
    let progress = super::scan::scan_with_progress(&mut session)?;

    if progress.orphan_count == 0 {
        ui::success("No orphaned thumbnails found");
        return Ok(());
    }

    ui::warn(&format!(
        "Found {} orphaned thumbnails ({})",
        progress.orphan_count,
        ui::human_size(progress.orphan_bytes)
    ));

    if !auto_confirm {
        print!("\nDelete these thumbnails? [y/N]: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            ui::info("Cancelled");
            return Ok(());
        }
    }

    let deletion = session.delete_all();

    ui::success(&format!(
        "{} outdated thumbnails, {} removed",
        deletion.deleted,
        ui::human_size(deletion.bytes_freed)
    ));
    if deletion.failed > 0 {
        ui::warn(&format!("{} could not be deleted", deletion.failed));
    }

    Ok(())
}
