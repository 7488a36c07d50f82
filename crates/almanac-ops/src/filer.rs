//! Creating, removing, moving and copying items.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::operation::{OperationError, validate_filename};

/// Create a directory and any missing parents.
///
/// Succeeds when the directory already exists. Returns the canonical path.
pub fn create_directory(path: impl AsRef<Path>) -> Result<PathBuf, OperationError> {
    let path = path.as_ref();
    if !path.is_dir() {
        fs::create_dir_all(path).map_err(|e| OperationError::io(path, e))?;
        info!(path = %path.display(), "created directory");
    }
    path.canonicalize().map_err(|e| OperationError::io(path, e))
}

/// Permanently delete a file or directory tree.
///
/// A missing path is not an error.
pub fn remove_item(path: impl AsRef<Path>) -> Result<(), OperationError> {
    let path = path.as_ref();
    let Some(metadata) = existing(path) else {
        debug!(path = %path.display(), "nothing to remove");
        return Ok(());
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| OperationError::io(path, e))?;

    info!(path = %path.display(), "removed");
    Ok(())
}

/// Move a file or directory to the platform trash.
///
/// A missing path is not an error.
pub fn trash_item(path: impl AsRef<Path>) -> Result<(), OperationError> {
    let path = path.as_ref();
    if existing(path).is_none() {
        debug!(path = %path.display(), "nothing to trash");
        return Ok(());
    }

    trash::delete(path).map_err(|e| OperationError::Trash {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    info!(path = %path.display(), "moved to trash");
    Ok(())
}

/// Where `source` lands inside `directory`.
///
/// With a preferred name the source's extension is kept (`draft.md` with
/// preferred name `final` becomes `final.md`). Without one the source's own
/// file name is used.
pub fn destination_for(
    source: &Path,
    directory: &Path,
    preferred_name: Option<&str>,
) -> Result<PathBuf, OperationError> {
    let file_name = match preferred_name.filter(|n| !n.is_empty()) {
        Some(name) => {
            validate_filename(name)?;
            match source.extension() {
                Some(ext) => format!("{name}.{}", ext.to_string_lossy()),
                None => name.to_string(),
            }
        }
        None => source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| OperationError::InvalidName {
                name: source.display().to_string(),
                reason: "source has no file name".to_string(),
            })?,
    };
    Ok(directory.join(file_name))
}

/// Move `source` into `directory`, optionally renaming it.
///
/// Returns `Ok(None)` when the source does not exist, otherwise the new
/// location. The directory is created when missing. An existing item at the
/// destination is never replaced.
pub fn move_item(
    source: impl AsRef<Path>,
    directory: impl AsRef<Path>,
    preferred_name: Option<&str>,
) -> Result<Option<PathBuf>, OperationError> {
    let source = source.as_ref();
    let Some(metadata) = existing(source) else {
        debug!(source = %source.display(), "move source missing");
        return Ok(None);
    };
    let dest = prepare_destination(source, directory.as_ref(), preferred_name)?;

    // Rename first (fast path for same filesystem)
    if let Err(err) = fs::rename(source, &dest) {
        warn!(
            source = %source.display(),
            error = %err,
            "rename failed, falling back to copy and delete"
        );
        if metadata.is_dir() {
            copy_dir_recursive(source, &dest)?;
            fs::remove_dir_all(source).map_err(|e| OperationError::io(source, e))?;
        } else {
            fs::copy(source, &dest).map_err(|e| OperationError::io(&dest, e))?;
            fs::remove_file(source).map_err(|e| OperationError::io(source, e))?;
        }
    }

    info!(source = %source.display(), dest = %dest.display(), "moved");
    Ok(Some(dest))
}

/// Copy `source` into `directory`, optionally renaming it.
///
/// Returns `Ok(None)` when the source does not exist, otherwise the location
/// of the copy. Directories are copied recursively.
pub fn copy_item(
    source: impl AsRef<Path>,
    directory: impl AsRef<Path>,
    preferred_name: Option<&str>,
) -> Result<Option<PathBuf>, OperationError> {
    let source = source.as_ref();
    if existing(source).is_none() {
        debug!(source = %source.display(), "copy source missing");
        return Ok(None);
    }
    let dest = prepare_destination(source, directory.as_ref(), preferred_name)?;

    if source.is_dir() {
        copy_dir_recursive(source, &dest)?;
    } else {
        fs::copy(source, &dest).map_err(|e| OperationError::io(&dest, e))?;
    }

    info!(source = %source.display(), dest = %dest.display(), "copied");
    Ok(Some(dest))
}

fn existing(path: &Path) -> Option<fs::Metadata> {
    fs::symlink_metadata(path).ok()
}

fn prepare_destination(
    source: &Path,
    directory: &Path,
    preferred_name: Option<&str>,
) -> Result<PathBuf, OperationError> {
    let dest = destination_for(source, directory, preferred_name)?;
    if existing(&dest).is_some() {
        return Err(OperationError::AlreadyExists { path: dest });
    }
    if !directory.is_dir() {
        fs::create_dir_all(directory).map_err(|e| OperationError::io(directory, e))?;
    }
    Ok(dest)
}

/// Recursively copy a directory.
fn copy_dir_recursive(source: &Path, dest: &Path) -> Result<(), OperationError> {
    fs::create_dir_all(dest).map_err(|e| OperationError::io(dest, e))?;

    let entries = fs::read_dir(source).map_err(|e| OperationError::io(source, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| OperationError::io(source, e))?;
        let path = entry.path();
        let dest_path = dest.join(entry.file_name());

        if path.is_dir() {
            copy_dir_recursive(&path, &dest_path)?;
        } else {
            fs::copy(&path, &dest_path).map_err(|e| OperationError::io(&path, e))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_keeps_extension() {
        let dir = Path::new("/out");
        assert_eq!(
            destination_for(Path::new("/in/draft.md"), dir, Some("final")).unwrap(),
            PathBuf::from("/out/final.md")
        );
        assert_eq!(
            destination_for(Path::new("/in/Makefile"), dir, Some("Build")).unwrap(),
            PathBuf::from("/out/Build")
        );
    }

    #[test]
    fn test_destination_defaults_to_source_name() {
        let dir = Path::new("/out");
        assert_eq!(
            destination_for(Path::new("/in/draft.md"), dir, None).unwrap(),
            PathBuf::from("/out/draft.md")
        );
        assert_eq!(
            destination_for(Path::new("/in/draft.md"), dir, Some("")).unwrap(),
            PathBuf::from("/out/draft.md")
        );
    }

    #[test]
    fn test_destination_rejects_bad_names() {
        let result = destination_for(Path::new("/in/a.txt"), Path::new("/out"), Some("../b"));
        assert!(matches!(result, Err(OperationError::InvalidName { .. })));
    }
}
