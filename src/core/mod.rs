//! Core domain types

pub mod metadata;
pub mod progress;
pub mod status;

pub use metadata::{read_uri, uri_from_header};
pub use progress::{ProgressInfo, StatusCounts};
pub use status::{path_exists, SourceUri, Status};
