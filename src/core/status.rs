//! Thumbnail classification

use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Outcome of checking a thumbnail against its source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
	/// Source file still exists
	Valid,
	/// Source file is gone, thumbnail can be deleted
	Orphan,
	/// No usable metadata
	Invalid,
	/// Source is not a local file and cannot be verified
	External,
}

/// Source reference recovered from a thumbnail URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceUri {
	/// `file://` URI or a bare path
	Local(PathBuf),
	/// Any other scheme
	Remote(String),
	/// Has the look of a URI but could not be parsed
	Unparseable,
}

impl SourceUri {
	pub fn parse(uri: &str) -> Self {
		match Url::parse(uri) {
			Ok(url) if url.scheme() == "file" => match decode_path(url.path()) {
				Some(path) => Self::Local(path),
				None => Self::Unparseable,
			},
			Ok(url) => Self::Remote(url.scheme().to_string()),
			// bare paths are not URIs, they are taken verbatim
			Err(url::ParseError::RelativeUrlWithoutBase) => Self::Local(PathBuf::from(uri)),
			Err(_) => Self::Unparseable,
		}
	}
}

/// Percent-decode a `file://` path to raw bytes, file names need not be UTF-8
#[cfg(unix)]
fn decode_path(raw: &str) -> Option<PathBuf> {
	use std::ffi::OsString;
	use std::os::unix::ffi::OsStringExt;

	let bytes = urlencoding::decode_binary(raw.as_bytes()).into_owned();
	Some(PathBuf::from(OsString::from_vec(bytes)))
}

#[cfg(not(unix))]
fn decode_path(raw: &str) -> Option<PathBuf> {
	let bytes = urlencoding::decode_binary(raw.as_bytes()).into_owned();
	String::from_utf8(bytes).ok().map(PathBuf::from)
}

/// Existence check that does not follow symlinks, a dangling link still exists
pub fn path_exists(path: &Path) -> bool {
	fs::symlink_metadata(path).is_ok()
}

impl Status {
	/// Classify a thumbnail from its extracted URI
	pub fn classify(uri: Option<&str>) -> Self {
		Self::classify_with(uri, path_exists)
	}

	pub fn classify_with(uri: Option<&str>, exists: impl Fn(&Path) -> bool) -> Self {
		let Some(uri) = uri.filter(|u| !u.is_empty()) else {
			return Status::Invalid;
		};

		match SourceUri::parse(uri) {
			SourceUri::Local(path) if path.as_os_str().is_empty() => Status::Invalid,
			SourceUri::Local(path) if !exists(&path) => Status::Orphan,
			SourceUri::Local(_) => Status::Valid,
			SourceUri::Remote(_) | SourceUri::Unparseable => Status::External,
		}
	}

	pub fn is_deletable(self) -> bool {
		self == Status::Orphan
	}
}

impl std::fmt::Display for Status {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Status::Valid => "valid",
			Status::Orphan => "orphan",
			Status::Invalid => "invalid",
			Status::External => "external",
		};
		write!(f, "{}", name)
	}
}
