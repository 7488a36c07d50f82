//! Package (bundle) detection.

use std::ffi::OsStr;
use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use almanac_core::{ScanError, ScanOptions};

/// Decides which directories are packages.
///
/// A directory is a package when its name matches one of the configured
/// glob patterns, compared case-insensitively (`Preview.APP` matches
/// `*.app`). The scanner only consults it for directories.
#[derive(Debug, Clone)]
pub struct PackageMatcher {
    set: GlobSet,
}

impl PackageMatcher {
    /// Compile a matcher from glob patterns.
    pub fn new<I, S>(patterns: I) -> Result<Self, globset::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = GlobBuilder::new(pattern.as_ref())
                .case_insensitive(true)
                .literal_separator(true)
                .build()?;
            builder.add(glob);
        }
        Ok(Self {
            set: builder.build()?,
        })
    }

    /// Compile the matcher configured by scan options.
    pub fn from_options(options: &ScanOptions) -> Result<Self, ScanError> {
        Self::new(&options.package_patterns).map_err(|e| ScanError::InvalidOptions {
            message: e.to_string(),
        })
    }

    /// Whether a directory with this name is a package.
    pub fn matches_name(&self, name: &OsStr) -> bool {
        self.set.is_match(Path::new(name))
    }
}
