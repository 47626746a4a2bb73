//! Source URI extraction from thumbnail metadata
//!
//! Thumbnails store the URI of the original file in a PNG text chunk keyed
//! `Thumb::URI`. The chunk layout is `length (u32 BE) | type | keyword | NUL | text`,
//! where `length` covers the keyword, separator and text. Only the header is read.

use memchr::memmem;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::config::{CHUNK_PREFIX_LEN, HEADER_READ_LIMIT, URI_MARKER};
use crate::ui;

/// Read the source URI stored in a thumbnail, `None` if absent or malformed
pub fn read_uri(path: &Path) -> Option<String> {
	match read_header(path) {
		Ok(header) => uri_from_header(&header),
		Err(e) => {
			ui::debug(&format!("Unreadable thumbnail {}: {}", path.display(), e));
			None
		}
	}
}

fn read_header(path: &Path) -> std::io::Result<Vec<u8>> {
	let file = File::open(path)?;
	let mut header = Vec::with_capacity(HEADER_READ_LIMIT);
	file.take(HEADER_READ_LIMIT as u64).read_to_end(&mut header)?;
	Ok(header)
}

/// Parse the URI chunk out of the first bytes of a thumbnail
pub fn uri_from_header(header: &[u8]) -> Option<String> {
	let header = &header[..header.len().min(HEADER_READ_LIMIT)];

	let marker_pos = memmem::find(header, URI_MARKER)?;
	let length_pos = marker_pos.checked_sub(CHUNK_PREFIX_LEN)?;
	let length_bytes: [u8; 4] = header.get(length_pos..length_pos + 4)?.try_into().ok()?;
	let declared = u32::from_be_bytes(length_bytes) as usize;

	// keyword + NUL separator
	let skip = URI_MARKER.len() + 1;
	let payload_len = declared.checked_sub(skip)?;
	let start = marker_pos + skip;
	let end = start.checked_add(payload_len)?;

	let payload = header.get(start..end)?;
	if payload.is_empty() {
		return None;
	}

	Some(String::from_utf8_lossy(payload).into_owned())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn chunk(uri: &str) -> Vec<u8> {
		let mut data = Vec::new();
		let length = (URI_MARKER.len() + 1 + uri.len()) as u32;
		data.extend_from_slice(&length.to_be_bytes());
		data.extend_from_slice(b"tEXt");
		data.extend_from_slice(URI_MARKER);
		data.push(0);
		data.extend_from_slice(uri.as_bytes());
		data.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
		data
	}

	fn png_with(uri: &str) -> Vec<u8> {
		let mut data = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x80\0\0\0\x80\x08\x06\0\0\0\xc3>a\xcb".to_vec();
		data.extend(chunk(uri));
		data.extend_from_slice(b"\0\0\0\0IDAT");
		data
	}

	#[test]
	fn extracts_embedded_uri() {
		let uri = "file:///home/user/Pictures/holiday%20photo.jpg";
		assert_eq!(uri_from_header(&png_with(uri)).as_deref(), Some(uri));
	}

	#[test]
	fn missing_marker_is_none() {
		assert_eq!(uri_from_header(b"\x89PNG\r\n\x1a\nno metadata here"), None);
		assert_eq!(uri_from_header(&[]), None);
	}

	#[test]
	fn marker_too_close_to_start_is_none() {
		let mut data = b"tEXt".to_vec();
		data.extend_from_slice(URI_MARKER);
		data.extend_from_slice(b"\0file:///x");
		assert_eq!(uri_from_header(&data), None);
	}

	#[test]
	fn declared_length_past_buffer_is_none() {
		let mut data = png_with("file:///tmp/a.jpg");
		let pos = memmem::find(&data, URI_MARKER).unwrap() - CHUNK_PREFIX_LEN;
		data[pos..pos + 4].copy_from_slice(&(HEADER_READ_LIMIT as u32 * 2).to_be_bytes());
		assert_eq!(uri_from_header(&data), None);
	}

	#[test]
	fn declared_length_shorter_than_keyword_is_none() {
		let mut data = png_with("file:///tmp/a.jpg");
		let pos = memmem::find(&data, URI_MARKER).unwrap() - CHUNK_PREFIX_LEN;
		data[pos..pos + 4].copy_from_slice(&3u32.to_be_bytes());
		assert_eq!(uri_from_header(&data), None);
	}

	#[test]
	fn marker_beyond_first_kilobyte_is_ignored() {
		let mut data = vec![0u8; HEADER_READ_LIMIT];
		data.extend(chunk("file:///tmp/late.jpg"));
		assert_eq!(uri_from_header(&data), None);
	}

	#[test]
	fn read_uri_on_missing_file_is_none() {
		assert_eq!(read_uri(Path::new("/nonexistent/thumbnail/abc.png")), None);
	}
}
