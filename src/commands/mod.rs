//! # Command Implementations
//!
//! Each submodule handles one CLI command. Both drive a [`ScanSession`](crate::session::ScanSession).

pub mod clean;
pub mod scan;
