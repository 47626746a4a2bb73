//! # User Interface
//!
//! Colored terminal output, progress line and size formatting.

pub mod log;

pub use log::{debug, error, header, human_size, info, path_link, progress, success, warn, Log};
