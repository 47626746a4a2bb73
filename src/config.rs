//! Application configuration and constants

use std::path::PathBuf;
use std::time::Duration;

// === Thumbnail Cache ===
pub const THUMBNAIL_DIR: &str = ".thumbnails";

// === Metadata ===
/// Keyword of the text chunk holding the source URI
pub const URI_MARKER: &[u8] = b"Thumb::URI";
/// The URI chunk always sits in the first KB, no need to read the image data
pub const HEADER_READ_LIMIT: usize = 1024;
/// Distance from the chunk length field to the chunk keyword (length + type)
pub const CHUNK_PREFIX_LEN: usize = 8;

// === Session ===
pub const WORKER_THREAD_NAME: &str = "thumbnail-scan";
pub const PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Thumbnail cache root (`~/.thumbnails`), `None` when there is no home directory
pub fn thumbnail_root() -> Option<PathBuf> {
	let root = dirs::home_dir().map(|home| home.join(THUMBNAIL_DIR));

	if let Some(path) = &root {
		crate::ui::debug(&format!("Thumbnail cache: {}", path.display()));
	}

	root
}
