//! Report generation: a full-detail JSON report and a flattened CSV report.
//!
//! The summary struct holds references into the pipeline's results; the
//! writers serialize it without copying the record set.

use crate::categorizer::CategorizedMapping;
use crate::duplicates::DuplicateGroup;
use crate::scanner::FileRecord;
use serde_json::json;
use std::fs;
use std::io;
use std::path::Path;

/// Everything a run produced, handed off for serialization.
#[derive(Debug)]
pub struct ScanSummary<'a> {
    /// ISO 8601 timestamp of when the run completed.
    pub generated_at: String,
    pub records: &'a [FileRecord],
    pub duplicate_groups: &'a [DuplicateGroup],
    pub categorized: &'a CategorizedMapping,
}

impl<'a> ScanSummary<'a> {
    pub fn new(
        records: &'a [FileRecord],
        duplicate_groups: &'a [DuplicateGroup],
        categorized: &'a CategorizedMapping,
    ) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            records,
            duplicate_groups,
            categorized,
        }
    }

    /// Writes the full-detail JSON report.
    pub fn save_json(&self, path: &Path) -> io::Result<()> {
        let mut categorized = serde_json::Map::new();
        for (category, files) in self.categorized.iter() {
            categorized.insert(category.to_string(), json!(files));
        }

        let report = json!({
            "timestamp": self.generated_at,
            "summary": {
                "total_files": self.records.len(),
                "duplicate_groups": self.duplicate_groups.len(),
                "categories": self.categorized.category_count(),
            },
            "scanned_files": self.records,
            "duplicate_groups": self.duplicate_groups,
            "categorized_files": categorized,
        });

        let json_string = serde_json::to_string_pretty(&report)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, json_string)
    }

    /// Writes the flattened CSV report: one row per classified file.
    pub fn save_csv(&self, path: &Path) -> io::Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["File Name", "Path", "Hash", "Category", "Size (MB)"])?;

        for (category, files) in self.categorized.iter() {
            for file in files {
                let path = file.record.path.to_string_lossy();
                let size_mb = format!("{:.2}", file.record.size as f64 / (1024.0 * 1024.0));
                writer.write_record([
                    file.record.name.as_str(),
                    path.as_ref(),
                    file.record.digest.as_str(),
                    category,
                    size_mb.as_str(),
                ])?;
            }
        }

        writer.flush()
    }
}
