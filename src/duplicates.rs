//! Duplicate detection by content digest.
//!
//! Records sharing a digest are byte-identical, so grouping is purely digest
//! equality. Groups are recomputed from each scan rather than persisted.

use crate::scanner::FileRecord;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// A set of two or more records sharing one content digest.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroup {
    /// The shared content digest.
    pub digest: String,
    /// Size in bytes, taken from the first member. All members have the same
    /// size since they have the same content; recorded for display.
    pub size: u64,
    /// Member records in discovery order.
    pub files: Vec<FileRecord>,
}

/// Partitions records by digest and returns the groups with two or more
/// members, in first-seen-digest order. A digest seen only once is not a
/// group. Deterministic for a fixed input order.
pub fn group_duplicates(records: &[FileRecord]) -> Vec<DuplicateGroup> {
    let mut members: HashMap<&str, Vec<FileRecord>> = HashMap::new();
    let mut digest_order: Vec<&str> = Vec::new();

    for record in records {
        let entry = members.entry(record.digest.as_str()).or_default();
        if entry.is_empty() {
            digest_order.push(record.digest.as_str());
        }
        entry.push(record.clone());
    }

    digest_order
        .into_iter()
        .filter_map(|digest| {
            let files = members.remove(digest)?;
            if files.len() < 2 {
                return None;
            }
            Some(DuplicateGroup {
                digest: digest.to_string(),
                size: files[0].size,
                files,
            })
        })
        .collect()
}

/// Resolves 1-based (group index, file index) pairs to file paths.
///
/// Pairs whose group index or file index is out of range are silently
/// skipped rather than erroring, so a stale selection never aborts a
/// deletion batch.
pub fn resolve_selection(groups: &[DuplicateGroup], pairs: &[(usize, usize)]) -> Vec<PathBuf> {
    pairs
        .iter()
        .filter_map(|&(group_idx, file_idx)| {
            if group_idx == 0 || file_idx == 0 {
                return None;
            }
            let group = groups.get(group_idx - 1)?;
            let file = group.files.get(file_idx - 1)?;
            Some(file.path.clone())
        })
        .collect()
}
