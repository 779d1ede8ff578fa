//! Directory scanning and file record production.
//!
//! Walks a directory tree recursively, keeps regular files whose extension is
//! on the application allow-list, and hashes each candidate in parallel. The
//! returned record sequence is sorted by path so downstream grouping and
//! categorization are deterministic regardless of filesystem walk order.

use crate::hasher;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use walkdir::WalkDir;

/// File extensions (without leading dot) considered application files.
/// Matched case-insensitively against the file's extension.
pub const APP_EXTENSIONS: &[&str] = &[
    "exe", "msi", "apk", "sh", "app", "deb", "rpm", "dmg", "pkg", "appx", "snap",
];

static CANCEL_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Requests that the in-progress scan abort at the next per-file checkpoint.
/// Safe to call from a signal handler.
pub fn request_cancellation() {
    CANCEL_REQUESTED.store(true, Ordering::SeqCst);
}

/// Returns true once cancellation has been requested.
pub fn cancellation_requested() -> bool {
    CANCEL_REQUESTED.load(Ordering::SeqCst)
}

/// Clears the cancellation flag so a new run can start fresh.
pub fn reset_cancellation_flag() {
    CANCEL_REQUESTED.store(false, Ordering::SeqCst);
}

/// One discovered application file with its content digest.
///
/// Created at scan time and immutable thereafter; categorization attaches a
/// label through an augmentation struct rather than mutating the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// Full path to the file.
    pub path: PathBuf,
    /// Base name of the file.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// SHA-256 content digest as 64 lowercase hex chars. Never empty: files
    /// that cannot be read in full are dropped, not kept with a blank digest.
    pub digest: String,
    /// Lowercase extension including the leading dot (e.g. ".exe").
    pub extension: String,
}

/// Errors that can abort a scan outright.
#[derive(Debug)]
pub enum ScanError {
    /// The root directory does not exist, so no partial scan is reported.
    RootNotFound(PathBuf),
    /// Cancellation was requested; partial results are discarded.
    Cancelled,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::RootNotFound(path) => {
                write!(f, "Directory does not exist: {}", path.display())
            }
            ScanError::Cancelled => write!(f, "Scan cancelled"),
        }
    }
}

impl std::error::Error for ScanError {}

/// Observer for hashing progress. `begin` is called once with the candidate
/// count before hashing starts, `tick` after each file, and `finish` when
/// hashing ends, including a cancelled run.
pub trait ScanProgress: Sync {
    fn begin(&self, _total: u64) {}
    fn tick(&self) {}
    fn finish(&self) {}
}

/// Observer used when no progress display is wanted.
pub struct NoProgress;

impl ScanProgress for NoProgress {}

/// The result of a completed scan.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Successfully hashed records, sorted by path.
    pub records: Vec<FileRecord>,
    /// Files that matched the allow-list but could not be read or hashed,
    /// with the reason. Surfaced as log lines by the caller; these are not
    /// error entries, the found-count simply undercounts.
    pub skipped: Vec<(PathBuf, String)>,
}

/// Returns true if the path carries an allow-listed application extension.
fn has_app_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| APP_EXTENSIONS.contains(&ext.as_str()))
}

/// Recursively scans `root` for application files and hashes each one.
///
/// Only regular files are considered: directories, symlinks and other
/// special entries are skipped, not followed. Files whose hash fails are
/// excluded from the result and reported on the outcome's `skipped` list.
/// Hashing runs on the rayon thread pool; the final record order is sorted
/// by path so it is stable for a fixed filesystem snapshot.
pub fn scan(root: &Path) -> Result<ScanOutcome, ScanError> {
    scan_with_progress(root, &NoProgress)
}

/// Like [`scan`], reporting hashing progress to the given observer.
pub fn scan_with_progress(
    root: &Path,
    progress: &dyn ScanProgress,
) -> Result<ScanOutcome, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }

    let mut candidates: Vec<(PathBuf, u64)> = Vec::new();
    let mut skipped: Vec<(PathBuf, String)> = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        if cancellation_requested() {
            return Err(ScanError::Cancelled);
        }
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                skipped.push((path, err.to_string()));
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_app_extension(entry.path()) {
            continue;
        }
        match entry.metadata() {
            Ok(metadata) => candidates.push((entry.path().to_path_buf(), metadata.len())),
            Err(err) => skipped.push((entry.path().to_path_buf(), err.to_string())),
        }
    }

    progress.begin(candidates.len() as u64);
    let hashed: Vec<Result<FileRecord, (PathBuf, String)>> = candidates
        .par_iter()
        .map(|(path, size)| {
            if cancellation_requested() {
                return Err((path.clone(), "cancelled".to_string()));
            }
            let result = match hasher::hash_file(path) {
                Ok(digest) => Ok(build_record(path, *size, digest)),
                Err(err) => Err((path.clone(), err.to_string())),
            };
            progress.tick();
            result
        })
        .collect();
    progress.finish();

    if cancellation_requested() {
        return Err(ScanError::Cancelled);
    }

    let mut records = Vec::with_capacity(hashed.len());
    for result in hashed {
        match result {
            Ok(record) => records.push(record),
            Err(skip) => skipped.push(skip),
        }
    }

    records.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(ScanOutcome { records, skipped })
}

fn build_record(path: &Path, size: u64, digest: String) -> FileRecord {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default();

    FileRecord {
        path: path.to_path_buf(),
        name,
        size,
        digest,
        extension,
    }
}
