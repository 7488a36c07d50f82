//! Directory tree scanning for almanac.
//!
//! This crate lists the entries under a root directory using jwalk for
//! traversal.
//!
//! # Overview
//!
//! - **Shallow or deep** listings controlled by [`ScanOptions`]
//! - **Hidden entries** (dot-prefixed names) skipped unless requested
//! - **Packages** (`*.app`, `*.bundle`, ...) yielded as opaque leaves on deep scans
//! - **Root-relative paths** on request, resolved against the canonical root
//! - **Progress updates** via broadcast channels
//!
//! # Example
//!
//! ```rust,no_run
//! use almanac_scan::{recursive_scan, ScanOptions, DirectoryScanner};
//!
//! // Every descendant, relative to the root, packages as leaves.
//! let paths = recursive_scan("/path/to/scan", false, false).unwrap();
//! println!("{} entries", paths.len());
//!
//! // The same, keeping entry kinds and depths.
//! let scanner = DirectoryScanner::new();
//! let entries = scanner.scan("/path/to/scan", &ScanOptions::deep()).unwrap();
//! let dirs = entries.iter().filter(|e| e.is_dir()).count();
//! println!("{dirs} directories");
//! ```

mod package;
mod paths;
mod progress;
mod scanner;

pub use package::PackageMatcher;
pub use paths::relativize;
pub use progress::ScanProgress;
pub use scanner::{DirectoryScanner, quick_scan, recursive_scan, scan};

// Re-export core types for convenience
pub use almanac_core::{
    DEFAULT_PACKAGE_PATTERNS, DirectoryEntry, EntryKind, ScanError, ScanOptions,
    ScanOptionsBuilder,
};
