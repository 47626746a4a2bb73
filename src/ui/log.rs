//! Unified logging system

use chrono::Local;
use colored::*;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::core::ProgressInfo;

static VERBOSE: AtomicBool = AtomicBool::new(false);
static TO_STDERR: AtomicBool = AtomicBool::new(false);

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}

	/// Keep stdout for machine-readable output, log lines go to stderr
	pub fn set_stderr(enabled: bool) {
		TO_STDERR.store(enabled, Ordering::Relaxed);
	}

	pub fn is_stderr() -> bool {
		TO_STDERR.load(Ordering::Relaxed)
	}
}

fn emit(icon: ColoredString, msg: ColoredString) {
	if Log::is_stderr() {
		eprintln!("[{}] {} {}", timestamp(), icon, msg);
	} else {
		println!("[{}] {} {}", timestamp(), icon, msg);
	}
}

fn timestamp() -> ColoredString {
	Local::now().format("%H:%M:%S").to_string().dimmed()
}

pub fn info(msg: &str) {
	emit("ℹ".bright_blue().bold(), msg.bright_white());
}

pub fn success(msg: &str) {
	emit("✓".bright_green().bold(), msg.bright_white());
}

pub fn warn(msg: &str) {
	emit("⚠".bright_yellow().bold(), msg.bright_white());
}

pub fn error(msg: &str) {
	eprintln!("[{}] {} {}", timestamp(), "✗".bright_red().bold(), msg.bright_white());
}

pub fn debug(msg: &str) {
	if Log::is_verbose() {
		emit("⚙".bright_black().bold(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	println!("\n{}", format!("─── {} ───", text).bright_blue().bold());
}

/// Rewrite the current terminal line with scan progress
pub fn progress(info: &ProgressInfo) {
	let message = match info.fraction() {
		None => "walking...".to_string(),
		Some(fraction) => format!(
			"{:.1}% ({}/{})",
			fraction * 100.0,
			info.current_file,
			info.total_files
		),
	};
	print!("\r {} {}", "scanning...".bright_blue(), message);
	let _ = io::stdout().flush();
}

/// Byte count as "X.Y GB/MB/KB", plain bytes below one KB
pub fn human_size(size: u64) -> String {
	const UNITS: [(u64, &str); 3] = [(1024 * 1024 * 1024, "GB"), (1024 * 1024, "MB"), (1024, "KB")];

	for (unit, name) in UNITS {
		if size > unit {
			return format!("{:.1} {}", size as f64 / unit as f64, name);
		}
	}
	format!("{} B", size)
}

/// Clickable file path (OSC 8 terminal hyperlink)
pub fn path_link(path: &std::path::Path) -> String {
	let uri = if cfg!(windows) {
		let path_str = path.to_string_lossy();
		let cleaned = path_str.strip_prefix(r"\\?\").unwrap_or(&path_str);
		format!("file:///{}", cleaned.replace('\\', "/"))
	} else {
		format!("file://{}", path.display())
	};

	format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", uri, path.display())
}
