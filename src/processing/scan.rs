//! Thumbnail cache walking and orphan detection

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::{DirEntry, WalkDir};

use crate::core::{read_uri, ProgressInfo, Status};
use crate::ui;

/// Result of a complete walk
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub progress: ProgressInfo,
    pub orphans: Vec<PathBuf>,
    pub elapsed: Duration,
}

/// Walks a thumbnail cache and classifies every file in it
#[derive(Debug, Clone)]
pub struct ThumbnailScanner {
    root: PathBuf,
}

impl ThumbnailScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Scanner for `~/.thumbnails`; without a home directory it scans nothing
    pub fn default_root() -> Self {
        match crate::config::thumbnail_root() {
            Some(root) => Self::new(root),
            None => {
                ui::warn("No home directory, nothing to scan");
                Self::new(PathBuf::new())
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run both passes, reporting progress after the count and after each file
    pub fn scan<F>(&self, mut on_progress: F) -> ScanReport
    where
        F: FnMut(&ProgressInfo),
    {
        let start = Instant::now();
        let mut progress = ProgressInfo { running: true, ..Default::default() };
        let mut orphans = Vec::new();

        if self.root.as_os_str().is_empty() || !self.root.is_dir() {
            ui::debug(&format!("Thumbnail cache not found: {}", self.root.display()));
        } else {
            progress.total_files = self.thumbnails().count() as u64;
            on_progress(&progress);
            ui::debug(&format!("{} thumbnails to check", progress.total_files));

            for entry in self.thumbnails() {
                let path = entry.into_path();
                let status = Status::classify(read_uri(&path).as_deref());
                let size = file_size(&path);

                progress.record(status, size);
                if status != Status::Valid {
                    ui::debug(&format!("[{}] {}", status, path.display()));
                }
                if status.is_deletable() {
                    orphans.push(path);
                }

                on_progress(&progress);
            }

            if progress.current_file != progress.total_files {
                ui::debug(&format!(
                    "Cache changed during scan ({} counted, {} visited)",
                    progress.total_files, progress.current_file
                ));
                progress.total_files = progress.current_file;
            }
        }

        progress.running = false;
        on_progress(&progress);

        let elapsed = start.elapsed();
        ui::debug(&format!("Scanned in {:.2}s", elapsed.as_secs_f32()));

        ScanReport { progress, orphans, elapsed }
    }

    fn thumbnails(&self) -> impl Iterator<Item = DirEntry> {
        WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    ui::debug(&format!("Skipped unreadable entry: {}", e));
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
    }
}

fn file_size(path: &Path) -> Option<u64> {
    match fs::metadata(path) {
        Ok(meta) => Some(meta.len()),
        Err(e) => {
            ui::debug(&format!("No size for {}: {}", path.display(), e));
            None
        }
    }
}
