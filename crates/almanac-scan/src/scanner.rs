//! JWalk-based directory scanner.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use jwalk::{Parallelism, WalkDir};
use rayon::prelude::*;
use tokio::sync::broadcast;
use tracing::debug;

use almanac_core::{DirectoryEntry, EntryKind, ScanError, ScanOptions};

use crate::package::PackageMatcher;
use crate::paths::{relativize, resolve};
use crate::progress::ScanProgress;

/// Entries between progress broadcasts.
const PROGRESS_INTERVAL: u64 = 256;

/// Directory scanner using jwalk for traversal.
///
/// The scanner holds no per-scan state, so one instance can run any number
/// of scans, including concurrently from several threads.
pub struct DirectoryScanner {
    progress_tx: broadcast::Sender<ScanProgress>,
}

impl DirectoryScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self { progress_tx }
    }

    /// Subscribe to scan progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// List the entries under `root`.
    ///
    /// The root itself is never part of the result. A root that does not
    /// exist or is not a directory yields an empty list. Any failure while
    /// walking aborts the scan; no partial listing is returned.
    ///
    /// Entry order is unspecified.
    pub fn scan(
        &self,
        root: impl AsRef<Path>,
        options: &ScanOptions,
    ) -> Result<Vec<DirectoryEntry>, ScanError> {
        let parallelism = match options.threads {
            0 => Parallelism::RayonDefaultPool {
                busy_timeout: Duration::from_millis(100),
            },
            1 => Parallelism::Serial,
            n => Parallelism::RayonNewPool(n),
        };
        self.scan_with(root.as_ref(), options, parallelism)
    }

    fn scan_with(
        &self,
        root: &Path,
        options: &ScanOptions,
        parallelism: Parallelism,
    ) -> Result<Vec<DirectoryEntry>, ScanError> {
        let start = Instant::now();

        if !std::fs::metadata(root).is_ok_and(|m| m.is_dir()) {
            debug!(root = %root.display(), "scan root is not a directory");
            return Ok(Vec::new());
        }
        let root_path = root.canonicalize().map_err(|e| ScanError::io(root, e))?;

        let packages = if options.stops_at_packages() {
            Some(PackageMatcher::from_options(options)?)
        } else {
            None
        };

        debug!(
            root = %root_path.display(),
            deep = options.deep,
            include_hidden = options.include_hidden,
            include_package_contents = options.include_package_contents,
            "starting scan"
        );

        let mut walker = WalkDir::new(&root_path)
            .parallelism(parallelism)
            .skip_hidden(!options.include_hidden)
            .follow_links(options.follow_symlinks)
            .min_depth(0);

        if !options.deep {
            walker = walker.max_depth(1);
        }

        if let Some(matcher) = packages.clone() {
            // Packages are still yielded, their children are never read.
            walker = walker.process_read_dir(move |_depth, _path, _state, children| {
                for entry in children.iter_mut().flatten() {
                    if entry.file_type.is_dir() && matcher.matches_name(&entry.file_name) {
                        entry.read_children_path = None;
                    }
                }
            });
        }

        let mut entries = Vec::new();
        let mut progress = ScanProgress::new();

        for entry_result in walker {
            let mut entry = entry_result.map_err(|e| walk_error(e, &root_path))?;

            // jwalk records unreadable directories on the entry and keeps going.
            if let Some(err) = entry.read_children_error.take() {
                return Err(walk_error(err, &entry.path()));
            }
            // The root is walked so its read errors surface, but never listed.
            if entry.depth == 0 {
                continue;
            }

            let walked = entry.path();
            let is_dir = entry.file_type().is_dir();
            let kind = if is_dir {
                EntryKind::Directory
            } else {
                EntryKind::File
            };

            progress.entries_scanned += 1;
            if is_dir {
                progress.dirs_scanned += 1;
                if packages
                    .as_ref()
                    .is_some_and(|m| m.matches_name(&entry.file_name))
                {
                    progress.packages_skipped += 1;
                }
            }

            let resolved = if options.follow_symlinks {
                resolve(&walked)?
            } else {
                walked
            };

            let path = if options.relative_paths {
                relativize(&root_path, &resolved)
            } else {
                resolved
            };

            if progress.entries_scanned % PROGRESS_INTERVAL == 0 {
                progress.current_path = path.clone();
                progress.elapsed = start.elapsed();
                let _ = self.progress_tx.send(progress.clone());
            }

            entries.push(DirectoryEntry::new(path, kind, entry.depth()));
        }

        progress.elapsed = start.elapsed();
        progress.finished = true;
        let _ = self.progress_tx.send(progress.clone());

        debug!(
            root = %root_path.display(),
            entries = progress.entries_scanned,
            dirs = progress.dirs_scanned,
            packages = progress.packages_skipped,
            elapsed_ms = progress.elapsed.as_millis() as u64,
            "scan complete"
        );

        Ok(entries)
    }

    /// Scan several roots in parallel.
    ///
    /// Results are returned in the order of `roots`. Each root succeeds or
    /// fails independently.
    pub fn scan_all<P>(
        &self,
        roots: &[P],
        options: &ScanOptions,
    ) -> Vec<Result<Vec<DirectoryEntry>, ScanError>>
    where
        P: AsRef<Path> + Sync,
    {
        // Roots already occupy the rayon pool, so each walk runs serially.
        roots
            .par_iter()
            .map(|root| self.scan_with(root.as_ref(), options, Parallelism::Serial))
            .collect()
    }
}

impl Default for DirectoryScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn walk_error(err: jwalk::Error, fallback: &Path) -> ScanError {
    let path = err.path().unwrap_or(fallback).to_path_buf();
    match err.io_error() {
        Some(io) => ScanError::io(path, std::io::Error::new(io.kind(), io.to_string())),
        None => ScanError::Walk {
            path,
            message: err.to_string(),
        },
    }
}

/// List the paths under `root`.
pub fn scan(root: impl AsRef<Path>, options: &ScanOptions) -> Result<Vec<PathBuf>, ScanError> {
    let entries = DirectoryScanner::new().scan(root, options)?;
    Ok(entries.into_iter().map(DirectoryEntry::into_path).collect())
}

/// Immediate children of `root` as absolute paths.
pub fn quick_scan(root: impl AsRef<Path>, include_hidden: bool) -> Result<Vec<PathBuf>, ScanError> {
    let options = ScanOptions {
        include_hidden,
        ..ScanOptions::shallow()
    };
    scan(root, &options)
}

/// Every descendant of `root` as a root-relative path.
pub fn recursive_scan(
    root: impl AsRef<Path>,
    include_hidden: bool,
    include_package_contents: bool,
) -> Result<Vec<PathBuf>, ScanError> {
    let options = ScanOptions {
        include_hidden,
        include_package_contents,
        ..ScanOptions::deep()
    };
    scan(root, &options)
}
