//! Scan progress record shared between the scanner and its observers

use serde::Serialize;

use super::Status;

/// Number of thumbnails per classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
	pub valid: u64,
	pub orphan: u64,
	pub invalid: u64,
	pub external: u64,
}

impl StatusCounts {
	pub fn record(&mut self, status: Status) {
		match status {
			Status::Valid => self.valid += 1,
			Status::Orphan => self.orphan += 1,
			Status::Invalid => self.invalid += 1,
			Status::External => self.external += 1,
		}
	}

	pub fn total(&self) -> u64 {
		self.valid + self.orphan + self.invalid + self.external
	}
}

/// Live scan statistics
///
/// `total_files` is known once the enumeration pass is over, after which
/// `current_file` advances from 0 to `total_files`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProgressInfo {
	pub running: bool,
	pub current_file: u64,
	pub total_files: u64,
	pub total_bytes: u64,
	pub orphan_count: u64,
	pub orphan_bytes: u64,
	pub statuses: StatusCounts,
}

impl ProgressInfo {
	/// Completed share in `[0.0, 1.0]`, `None` while the tree is still being walked
	pub fn fraction(&self) -> Option<f64> {
		if self.total_files == 0 {
			return None;
		}
		Some((self.current_file as f64 / self.total_files as f64).min(1.0))
	}

	/// Account for one visited thumbnail
	pub(crate) fn record(&mut self, status: Status, size: Option<u64>) {
		self.current_file += 1;
		self.total_files = self.total_files.max(self.current_file);

		let size = size.unwrap_or(0);
		self.total_bytes += size;
		self.statuses.record(status);

		if status.is_deletable() {
			self.orphan_count += 1;
			self.orphan_bytes += size;
		}
	}
}
