//! Core types shared by the almanac crates.
//!
//! This crate provides the data structures used by the directory scanner:
//! entries, scan options and the scan error taxonomy.

mod config;
mod entry;
mod error;

pub use config::{DEFAULT_PACKAGE_PATTERNS, ScanOptions, ScanOptionsBuilder};
pub use entry::{DirectoryEntry, EntryKind};
pub use error::ScanError;
