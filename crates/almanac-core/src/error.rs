//! Error types for scanning operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during scanning.
///
/// A scan is all-or-nothing: any of these aborts the whole operation and no
/// partial listing is returned.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found (usually an entry removed mid-scan).
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The directory walker failed without an underlying I/O error.
    #[error("Walk failed at {path}: {message}")]
    Walk { path: PathBuf, message: String },

    /// Invalid scan options.
    #[error("Invalid scan options: {message}")]
    InvalidOptions { message: String },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// The path the error refers to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::PermissionDenied { path }
            | Self::NotFound { path }
            | Self::Io { path, .. }
            | Self::Walk { path, .. } => Some(path),
            Self::InvalidOptions { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_io() {
        let err = ScanError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ScanError::PermissionDenied { .. }));

        let err = ScanError::io(
            "/test/gone",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, ScanError::NotFound { .. }));

        let err = ScanError::io("/test/other", std::io::Error::other("boom"));
        assert!(matches!(err, ScanError::Io { .. }));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_scan_error_path() {
        let err = ScanError::Walk {
            path: PathBuf::from("/a/b"),
            message: "loop".to_string(),
        };
        assert_eq!(err.path(), Some(std::path::Path::new("/a/b")));

        let err = ScanError::InvalidOptions {
            message: "bad".to_string(),
        };
        assert!(err.path().is_none());
    }
}
