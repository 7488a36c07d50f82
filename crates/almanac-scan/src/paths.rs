//! Root-relative path rewriting.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use almanac_core::ScanError;

/// Rewrite `resolved` relative to `root`.
///
/// Both paths must already be fully resolved. The root prefix is removed
/// together with exactly one separator. A path outside the root (a followed
/// symlink escaping it) is returned unchanged.
pub fn relativize(root: &Path, resolved: &Path) -> PathBuf {
    match resolved.strip_prefix(root) {
        Ok(rest) if !rest.as_os_str().is_empty() => rest.to_path_buf(),
        _ => resolved.to_path_buf(),
    }
}

/// Fully resolve a walked path.
///
/// Broken symlinks cannot be resolved and keep their walked path. Any other
/// failure (the entry vanished, permission denied) is an error.
pub(crate) fn resolve(path: &Path) -> Result<PathBuf, ScanError> {
    match std::fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == ErrorKind::NotFound && is_symlink(path) => Ok(path.to_path_buf()),
        Err(e) => Err(ScanError::io(path, e)),
    }
}

fn is_symlink(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
}
