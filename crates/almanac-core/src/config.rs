//! Scan option types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Directory name patterns treated as packages when none are configured.
///
/// A package is a directory that is conventionally handled as a single
/// opaque unit (application bundles, frameworks, document packages).
pub const DEFAULT_PACKAGE_PATTERNS: &[&str] = &[
    "*.app",
    "*.bundle",
    "*.framework",
    "*.plugin",
    "*.kext",
    "*.pkg",
    "*.xcodeproj",
    "*.xcworkspace",
    "*.playground",
    "*.photoslibrary",
    "*.rtfd",
];

/// Options controlling a directory scan.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanOptions {
    /// Descend into subdirectories.
    #[builder(default = "false")]
    #[serde(default)]
    pub deep: bool,

    /// Include dot-prefixed entries.
    #[builder(default = "false")]
    #[serde(default)]
    pub include_hidden: bool,

    /// Descend into packages instead of yielding them as leaves.
    /// Only has an effect on deep scans.
    #[builder(default = "false")]
    #[serde(default)]
    pub include_package_contents: bool,

    /// Rewrite result paths relative to the scan root.
    #[builder(default = "false")]
    #[serde(default)]
    pub relative_paths: bool,

    /// Follow symbolic links while walking.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Glob patterns matched against directory names to detect packages.
    #[builder(default = "default_package_patterns()")]
    #[serde(default = "default_package_patterns")]
    pub package_patterns: Vec<String>,

    /// Number of threads for deep scans (0 = auto-detect).
    #[builder(default = "0")]
    #[serde(default)]
    pub threads: usize,
}

fn default_package_patterns() -> Vec<String> {
    DEFAULT_PACKAGE_PATTERNS
        .iter()
        .map(|p| p.to_string())
        .collect()
}

impl ScanOptionsBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref patterns) = self.package_patterns {
            for pattern in patterns {
                if pattern.is_empty() {
                    return Err("Package pattern cannot be empty".to_string());
                }
                globset::Glob::new(pattern)
                    .map_err(|e| format!("Invalid package pattern '{pattern}': {e}"))?;
            }
        }
        Ok(())
    }
}

impl ScanOptions {
    /// Create a new scan options builder.
    pub fn builder() -> ScanOptionsBuilder {
        ScanOptionsBuilder::default()
    }

    /// Options for listing immediate children with absolute paths.
    pub fn shallow() -> Self {
        Self {
            deep: false,
            include_hidden: false,
            include_package_contents: false,
            relative_paths: false,
            follow_symlinks: false,
            package_patterns: default_package_patterns(),
            threads: 0,
        }
    }

    /// Options for a recursive listing with root-relative paths.
    pub fn deep() -> Self {
        Self {
            deep: true,
            relative_paths: true,
            ..Self::shallow()
        }
    }

    /// Whether packages act as opaque leaves during this scan.
    ///
    /// Shallow scans never descend, so packages are only relevant when deep.
    pub fn stops_at_packages(&self) -> bool {
        self.deep && !self.include_package_contents
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::shallow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = ScanOptions::builder()
            .deep(true)
            .include_hidden(true)
            .threads(4usize)
            .build()
            .unwrap();

        assert!(options.deep);
        assert!(options.include_hidden);
        assert!(!options.relative_paths);
        assert_eq!(options.threads, 4);
        assert_eq!(options.package_patterns.len(), DEFAULT_PACKAGE_PATTERNS.len());
    }

    #[test]
    fn test_options_builder_rejects_bad_pattern() {
        let result = ScanOptions::builder()
            .package_patterns(vec!["[unclosed".to_string()])
            .build();
        assert!(result.is_err());

        let result = ScanOptions::builder()
            .package_patterns(vec![String::new()])
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_presets() {
        let shallow = ScanOptions::shallow();
        assert!(!shallow.deep);
        assert!(!shallow.relative_paths);

        let deep = ScanOptions::deep();
        assert!(deep.deep);
        assert!(deep.relative_paths);
        assert!(!deep.include_hidden);
    }

    #[test]
    fn test_package_contents_only_matter_when_deep() {
        let mut options = ScanOptions::shallow();
        assert!(!options.stops_at_packages());

        options.deep = true;
        assert!(options.stops_at_packages());

        options.include_package_contents = true;
        assert!(!options.stops_at_packages());
    }
}
