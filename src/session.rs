//! # Scan Session
//!
//! Runs a [`ThumbnailScanner`] on a background worker thread and exposes its
//! progress to any number of observers. Once the walk is over, the session
//! owns the orphan list and deletes it one file at a time, so callers can
//! report progress or stop between removals.

use serde::Serialize;
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;

use crate::config::WORKER_THREAD_NAME;
use crate::core::ProgressInfo;
use crate::processing::ThumbnailScanner;
use crate::ui;

/// Session lifecycle, it only ever moves forward
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
	#[default]
	ReadyToScan,
	Scanning,
	ReadyToDelete,
	Deleting,
	Finished,
}

#[derive(Debug, Error)]
pub enum SessionError {
	#[error("scan has already been started")]
	AlreadyRunning,
	#[error("scan has not been started")]
	NotStarted,
	#[error("failed to spawn scan worker: {0}")]
	Spawn(#[from] io::Error),
	#[error("scan worker panicked")]
	WorkerPanicked,
}

/// Running totals of the deletion step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeletionSummary {
	pub deleted: u64,
	pub failed: u64,
	pub bytes_freed: u64,
}

#[derive(Debug, Default)]
struct Shared {
	progress: ProgressInfo,
	state: SessionState,
	orphans: VecDeque<PathBuf>,
	elapsed: Duration,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
	shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Ends the scan if the worker unwinds, so pollers of `is_running` stop
struct PanicGuard<'a>(&'a Mutex<Shared>);

impl Drop for PanicGuard<'_> {
	fn drop(&mut self) {
		if thread::panicking() {
			let mut shared = lock(self.0);
			shared.progress.running = false;
			shared.state = SessionState::Finished;
			shared.orphans.clear();
		}
	}
}

pub struct ScanSession {
	scanner: ThumbnailScanner,
	shared: Arc<Mutex<Shared>>,
	worker: Option<JoinHandle<()>>,
	deletion: DeletionSummary,
}

impl ScanSession {
	pub fn new(scanner: ThumbnailScanner) -> Self {
		Self {
			scanner,
			shared: Arc::new(Mutex::new(Shared::default())),
			worker: None,
			deletion: DeletionSummary::default(),
		}
	}

	pub fn with_default_root() -> Self {
		Self::new(ThumbnailScanner::default_root())
	}

	pub fn root(&self) -> &Path {
		self.scanner.root()
	}

	/// Start the background walk and return immediately
	pub fn start(&mut self) -> Result<(), SessionError> {
		{
			let mut shared = lock(&self.shared);
			if self.worker.is_some() || shared.state != SessionState::ReadyToScan {
				return Err(SessionError::AlreadyRunning);
			}
			shared.state = SessionState::Scanning;
			shared.progress.running = true;
		}

		let scanner = self.scanner.clone();
		let shared = Arc::clone(&self.shared);

		let spawned = thread::Builder::new()
			.name(WORKER_THREAD_NAME.to_string())
			.spawn(move || {
				let _guard = PanicGuard(&shared);
				let report = scanner.scan(|progress| {
					// `running` only drops together with the orphan list below
					lock(&shared).progress = ProgressInfo { running: true, ..progress.clone() };
				});

				let mut shared = lock(&shared);
				shared.state = if report.orphans.is_empty() {
					SessionState::Finished
				} else {
					SessionState::ReadyToDelete
				};
				shared.orphans = report.orphans.into();
				shared.elapsed = report.elapsed;
				shared.progress = report.progress;
			});

		match spawned {
			Ok(handle) => {
				self.worker = Some(handle);
				ui::debug(&format!("Scan started: {}", self.root().display()));
				Ok(())
			}
			Err(e) => {
				let mut shared = lock(&self.shared);
				shared.state = SessionState::ReadyToScan;
				shared.progress.running = false;
				Err(SessionError::Spawn(e))
			}
		}
	}

	/// Copy of the current progress, never waits for the walk
	pub fn snapshot(&self) -> ProgressInfo {
		lock(&self.shared).progress.clone()
	}

	pub fn is_running(&self) -> bool {
		lock(&self.shared).progress.running
	}

	pub fn state(&self) -> SessionState {
		lock(&self.shared).state
	}

	/// Orphans still pending deletion, empty until the walk is over
	pub fn orphans(&self) -> Vec<PathBuf> {
		lock(&self.shared).orphans.iter().cloned().collect()
	}

	/// Duration of the completed walk
	pub fn elapsed(&self) -> Duration {
		lock(&self.shared).elapsed
	}

	pub fn deletion(&self) -> DeletionSummary {
		self.deletion
	}

	/// Block until the walk is over and return the final progress
	pub fn wait(&mut self) -> Result<ProgressInfo, SessionError> {
		match self.worker.take() {
			Some(handle) => {
				if handle.join().is_err() {
					let mut shared = lock(&self.shared);
					shared.progress.running = false;
					shared.state = SessionState::Finished;
					return Err(SessionError::WorkerPanicked);
				}
				Ok(self.snapshot())
			}
			None if self.state() == SessionState::ReadyToScan => Err(SessionError::NotStarted),
			None => Ok(self.snapshot()),
		}
	}

	/// Delete the next pending orphan, `false` once there is nothing left to delete
	pub fn delete_one(&mut self) -> bool {
		let next = {
			let mut shared = lock(&self.shared);
			if !matches!(shared.state, SessionState::ReadyToDelete | SessionState::Deleting) {
				return false;
			}
			let next = shared.orphans.pop_front();
			shared.state = if shared.orphans.is_empty() {
				SessionState::Finished
			} else {
				SessionState::Deleting
			};
			next
		};

		let Some(path) = next else { return false };
		self.remove(&path);
		true
	}

	/// Delete every pending orphan
	pub fn delete_all(&mut self) -> DeletionSummary {
		while self.delete_one() {}
		self.deletion
	}

	fn remove(&mut self, path: &Path) {
		let size = fs::symlink_metadata(path).map(|m| m.len()).unwrap_or(0);

		match fs::remove_file(path) {
			Ok(()) => {
				self.deletion.deleted += 1;
				self.deletion.bytes_freed += size;
				ui::debug(&format!("Deleted: {}", path.display()));
			}
			Err(e) if e.kind() == io::ErrorKind::NotFound => {
				self.deletion.deleted += 1;
				ui::debug(&format!("Already gone: {}", path.display()));
			}
			Err(e) => {
				self.deletion.failed += 1;
				ui::warn(&format!("Failed to delete {}: {}", path.display(), e));
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::URI_MARKER;

	fn thumbnail(uri: &str) -> Vec<u8> {
		let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
		data.extend_from_slice(&((URI_MARKER.len() + 1 + uri.len()) as u32).to_be_bytes());
		data.extend_from_slice(b"tEXt");
		data.extend_from_slice(URI_MARKER);
		data.push(0);
		data.extend_from_slice(uri.as_bytes());
		data
	}

	fn cache_with_orphans(count: usize) -> (tempfile::TempDir, PathBuf) {
		let dir = tempfile::tempdir().unwrap();
		let cache = dir.path().join(".thumbnails/normal");
		fs::create_dir_all(&cache).unwrap();
		for i in 0..count {
			fs::write(cache.join(format!("{i}.png")), thumbnail(&format!("file:///gone/{i}.jpg"))).unwrap();
		}
		let root = dir.path().join(".thumbnails");
		(dir, root)
	}

	#[test]
	fn initial_state() {
		let session = ScanSession::new(ThumbnailScanner::new("/nonexistent"));

		assert_eq!(session.state(), SessionState::ReadyToScan);
		assert!(!session.is_running());
		assert_eq!(session.snapshot(), ProgressInfo::default());
		assert!(session.orphans().is_empty());
	}

	#[test]
	fn panicking_worker_stops_running() {
		let shared = Arc::new(Mutex::new(Shared::default()));
		{
			let mut state = lock(&shared);
			state.progress.running = true;
			state.state = SessionState::Scanning;
		}

		let worker_shared = Arc::clone(&shared);
		let joined = thread::spawn(move || {
			let _guard = PanicGuard(&worker_shared);
			panic!("walk failed");
		})
		.join();

		assert!(joined.is_err());
		let state = lock(&shared);
		assert!(!state.progress.running);
		assert_eq!(state.state, SessionState::Finished);
	}

	#[test]
	fn wait_before_start_fails() {
		let mut session = ScanSession::new(ThumbnailScanner::new("/nonexistent"));
		assert!(matches!(session.wait(), Err(SessionError::NotStarted)));
	}

	#[test]
	fn second_start_is_rejected() {
		let (_dir, root) = cache_with_orphans(1);
		let mut session = ScanSession::new(ThumbnailScanner::new(root));

		session.start().unwrap();
		assert!(matches!(session.start(), Err(SessionError::AlreadyRunning)));

		session.wait().unwrap();
		assert!(matches!(session.start(), Err(SessionError::AlreadyRunning)));
	}

	#[test]
	fn delete_before_scan_does_nothing() {
		let (_dir, root) = cache_with_orphans(2);
		let mut session = ScanSession::new(ThumbnailScanner::new(root));

		assert!(!session.delete_one());
		assert_eq!(session.state(), SessionState::ReadyToScan);
	}

	#[test]
	fn snapshot_is_stable_after_completion() {
		let (_dir, root) = cache_with_orphans(3);
		let mut session = ScanSession::new(ThumbnailScanner::new(root));
		session.start().unwrap();
		session.wait().unwrap();

		let first = session.snapshot();
		assert_eq!(first, session.snapshot());
		assert_eq!(first.current_file, 3);
		assert_eq!(first.fraction(), Some(1.0));
	}

	#[test]
	fn incremental_deletion_walks_states() {
		let (_dir, root) = cache_with_orphans(3);
		let mut session = ScanSession::new(ThumbnailScanner::new(root));
		session.start().unwrap();
		session.wait().unwrap();

		assert_eq!(session.state(), SessionState::ReadyToDelete);
		let orphans = session.orphans();
		assert_eq!(orphans.len(), 3);

		assert!(session.delete_one());
		assert_eq!(session.state(), SessionState::Deleting);
		assert!(!orphans[0].exists());
		assert_eq!(session.orphans(), orphans[1..].to_vec());

		// stopping here leaves the rest untouched
		assert!(orphans[1].exists() && orphans[2].exists());

		assert!(session.delete_one());
		assert!(session.delete_one());
		assert_eq!(session.state(), SessionState::Finished);
		assert!(!session.delete_one());
		assert_eq!(session.deletion().deleted, 3);
	}

	#[test]
	fn failed_removal_is_counted_and_skipped() {
		let (_dir, root) = cache_with_orphans(2);
		let mut session = ScanSession::new(ThumbnailScanner::new(root));
		session.start().unwrap();
		session.wait().unwrap();

		let orphans = session.orphans();
		fs::remove_file(&orphans[0]).unwrap();
		fs::create_dir(&orphans[0]).unwrap();

		let summary = session.delete_all();

		assert_eq!(summary.failed, 1);
		assert_eq!(summary.deleted, 1);
		assert!(!orphans[1].exists());
		assert!(session.orphans().is_empty());
		assert_eq!(session.state(), SessionState::Finished);
	}

	#[test]
	fn vanished_orphan_counts_as_deleted() {
		let (_dir, root) = cache_with_orphans(1);
		let mut session = ScanSession::new(ThumbnailScanner::new(root));
		session.start().unwrap();
		session.wait().unwrap();

		fs::remove_file(&session.orphans()[0]).unwrap();
		let summary = session.delete_all();

		assert_eq!(summary, DeletionSummary { deleted: 1, failed: 0, bytes_freed: 0 });
	}

	#[test]
	fn no_orphans_finishes_directly() {
		let dir = tempfile::tempdir().unwrap();
		let mut session = ScanSession::new(ThumbnailScanner::new(dir.path()));
		session.start().unwrap();
		session.wait().unwrap();

		assert_eq!(session.state(), SessionState::Finished);
		assert!(!session.delete_one());
	}
}
