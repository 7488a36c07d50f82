//! Directory entry types produced by scanning.

use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Binary classification of a scanned entry.
///
/// Anything that is not a directory (regular files, unfollowed symlinks,
/// sockets, devices) is reported as a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Anything that is not a directory.
    File,
    /// Directory, including packages yielded as leaves.
    Directory,
}

impl EntryKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Directory)
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, EntryKind::File)
    }
}

/// A single location found by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Path of the entry, absolute or relative to the scan root.
    pub path: PathBuf,

    /// Final path component.
    pub name: CompactString,

    /// File or directory.
    pub kind: EntryKind,

    /// Depth below the scan root (immediate children are at depth 1).
    pub depth: usize,
}

impl DirectoryEntry {
    /// Create a new entry.
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind, depth: usize) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| CompactString::new(n.to_string_lossy()))
            .unwrap_or_default();
        Self {
            path,
            name,
            kind,
            depth,
        }
    }

    /// Create a file entry.
    pub fn file(path: impl Into<PathBuf>, depth: usize) -> Self {
        Self::new(path, EntryKind::File, depth)
    }

    /// Create a directory entry.
    pub fn directory(path: impl Into<PathBuf>, depth: usize) -> Self {
        Self::new(path, EntryKind::Directory, depth)
    }

    /// Check if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Borrow the entry path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consume the entry, keeping only its path.
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}
