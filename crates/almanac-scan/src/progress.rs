//! Scan progress reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Progress information during a scan.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Number of entries yielded so far.
    pub entries_scanned: u64,
    /// Number of those entries that are directories.
    pub dirs_scanned: u64,
    /// Number of packages yielded as leaves instead of being descended.
    pub packages_skipped: u64,
    /// Most recent path seen.
    pub current_path: PathBuf,
    /// Time elapsed since scan started.
    pub elapsed: Duration,
    /// Whether this is the final snapshot of the scan.
    pub finished: bool,
}

impl ScanProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            entries_scanned: 0,
            dirs_scanned: 0,
            packages_skipped: 0,
            current_path: PathBuf::new(),
            elapsed: Duration::ZERO,
            finished: false,
        }
    }

    /// Calculate scan rate in entries per second.
    pub fn entries_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.entries_scanned as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Number of non-directory entries.
    pub fn files_scanned(&self) -> u64 {
        self.entries_scanned - self.dirs_scanned
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates() {
        let mut progress = ScanProgress::new();
        assert_eq!(progress.entries_per_second(), 0.0);

        progress.entries_scanned = 10;
        progress.dirs_scanned = 4;
        progress.elapsed = Duration::from_secs(2);
        assert_eq!(progress.entries_per_second(), 5.0);
        assert_eq!(progress.files_scanned(), 6);
    }
}
