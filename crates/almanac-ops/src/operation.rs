//! Operation error type and name validation.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// An error that occurred during a file operation.
#[derive(Debug, Error)]
pub enum OperationError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// The destination is already taken.
    #[error("Destination already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The platform trash refused the item.
    #[error("Failed to move {path} to trash: {message}")]
    Trash { path: PathBuf, message: String },

    /// A file name that cannot be used for a new item.
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
}

impl OperationError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            _ => Self::Io { path, source },
        }
    }

    /// The path the error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::PermissionDenied { path }
            | Self::AlreadyExists { path }
            | Self::Io { path, .. }
            | Self::Trash { path, .. } => Some(path),
            Self::InvalidName { .. } => None,
        }
    }
}

/// Validate a single path component for a new item.
pub fn validate_filename(name: &str) -> Result<(), OperationError> {
    let reject = |reason: &str| {
        Err(OperationError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.is_empty() {
        return reject("name cannot be empty");
    }
    if name.len() > 255 {
        return reject("name is too long (max 255 bytes)");
    }
    if name == "." || name == ".." {
        return reject("'.' and '..' are reserved names");
    }
    if name.contains('/') || name.contains('\0') {
        return reject("name cannot contain '/' or NUL");
    }

    #[cfg(target_os = "windows")]
    {
        if name.contains(['\\', ':', '*', '?', '"', '<', '>', '|']) {
            return reject("name contains a reserved character");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_classification() {
        let err = OperationError::io(
            "/x",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, OperationError::PermissionDenied { .. }));

        let err = OperationError::io(
            "/x",
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "exists"),
        );
        assert!(matches!(err, OperationError::AlreadyExists { .. }));

        let err = OperationError::io("/x", std::io::Error::other("boom"));
        assert!(matches!(err, OperationError::Io { .. }));
        assert_eq!(err.path(), Some(Path::new("/x")));
    }

    #[test]
    fn test_validate_filename() {
        assert!(validate_filename("report.txt").is_ok());
        assert!(validate_filename(".config").is_ok());
        assert!(validate_filename("").is_err());
        assert!(validate_filename("..").is_err());
        assert!(validate_filename("a/b").is_err());
        assert!(validate_filename(&"x".repeat(256)).is_err());
    }
}
