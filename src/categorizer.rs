//! Applies the rule engine to a scan and produces the category partition.

use crate::rules::{self, CategorizationRule};
use crate::scanner::FileRecord;
use serde::Serialize;

/// A record with its assigned category. The record itself stays untouched;
/// the category is attached alongside it.
#[derive(Debug, Clone, Serialize)]
pub struct CategorizedFile {
    #[serde(flatten)]
    pub record: FileRecord,
    pub category: String,
}

/// Category name → files, with per-category insertion order preserved.
///
/// Categories appear in first-assignment order except the
/// [`rules::UNCATEGORIZED`] bucket, which always comes last. Every scanned
/// record lands in exactly one bucket.
#[derive(Debug, Default)]
pub struct CategorizedMapping {
    buckets: Vec<(String, Vec<CategorizedFile>)>,
}

impl CategorizedMapping {
    /// Number of categories with at least one file.
    pub fn category_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of files across all categories.
    pub fn file_count(&self) -> usize {
        self.buckets.iter().map(|(_, files)| files.len()).sum()
    }

    /// The files assigned to `category`, if any.
    pub fn get(&self, category: &str) -> Option<&[CategorizedFile]> {
        self.buckets
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, files)| files.as_slice())
    }

    /// Iterates buckets in category order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CategorizedFile])> {
        self.buckets
            .iter()
            .map(|(name, files)| (name.as_str(), files.as_slice()))
    }

    fn push(&mut self, file: CategorizedFile) {
        if let Some((_, files)) = self
            .buckets
            .iter_mut()
            .find(|(name, _)| *name == file.category)
        {
            files.push(file);
        } else {
            let category = file.category.clone();
            self.buckets.push((category, vec![file]));
        }
    }
}

/// Classifies every record and groups the results by category.
///
/// Total and exclusive: each input record appears in exactly one bucket,
/// with records matching no enabled rule collected under
/// [`rules::UNCATEGORIZED`].
pub fn categorize(records: &[FileRecord], rules: &[CategorizationRule]) -> CategorizedMapping {
    let mut mapping = CategorizedMapping::default();
    let mut uncategorized: Vec<CategorizedFile> = Vec::new();

    for record in records {
        let category = rules::classify(record, rules);
        let file = CategorizedFile {
            record: record.clone(),
            category,
        };
        if file.category == rules::UNCATEGORIZED {
            uncategorized.push(file);
        } else {
            mapping.push(file);
        }
    }

    // The sentinel bucket always sorts after the named categories.
    for file in uncategorized {
        mapping.push(file);
    }

    mapping
}
