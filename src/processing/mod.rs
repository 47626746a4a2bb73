//! Thumbnail cache processing

pub mod scan;

pub use scan::{ScanReport, ThumbnailScanner};
