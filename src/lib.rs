//! # thumbclean Library
//!
//! Finds thumbnails in the per-user thumbnail cache whose source file no
//! longer exists and removes them. The scan runs in the background through a
//! [`session::ScanSession`] that observers can poll for progress.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod processing;
pub mod session;
pub mod ui;

pub use crate::core::{ProgressInfo, Status};
pub use processing::{ScanReport, ThumbnailScanner};
pub use session::{DeletionSummary, ScanSession, SessionError, SessionState};
