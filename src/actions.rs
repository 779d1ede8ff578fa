//! Destructive and constructive actions: duplicate deletion and
//! category-partitioned organization.
//!
//! Both actions respect the run configuration's dry-run flag. Dry-run never
//! touches the filesystem; it only reports what would happen. In real mode,
//! per-file failures are recorded and processing continues with the next
//! file; a batch never aborts on the first error. The one exception is
//! directory creation during organize, which aborts the whole organize
//! operation with a single error.

use crate::categorizer::CategorizedMapping;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of a deletion batch.
#[derive(Debug)]
pub struct DeleteOutcome {
    /// Files deleted. In dry-run this is the number of requested paths,
    /// without checking they exist.
    pub deleted_count: usize,
    /// One entry per failed path.
    pub errors: Vec<String>,
    /// Whether this outcome came from a dry run.
    pub dry_run: bool,
}

/// Result of an organize run.
#[derive(Debug)]
pub struct OrganizeOutcome {
    /// Files copied (or, in dry-run, that would be copied).
    pub organized_count: usize,
    /// Per-file copy failures, or the single directory-creation failure.
    pub errors: Vec<String>,
    /// Whether this outcome came from a dry run.
    pub dry_run: bool,
    /// Category subdirectory names, in mapping order.
    pub category_dirs: Vec<String>,
}

/// Directory name for a category: spaces become underscores.
pub fn category_dir_name(category: &str) -> String {
    category.replace(' ', "_")
}

/// Deletes the selected duplicate files.
///
/// In dry-run mode nothing is touched and the reported count equals the
/// number of requested paths. In real mode each path is handled
/// independently: a missing file records a "File not found" error, an OS
/// failure records the underlying error, and the batch continues either way.
pub fn delete_selected(paths: &[PathBuf], dry_run: bool) -> DeleteOutcome {
    if dry_run {
        return DeleteOutcome {
            deleted_count: paths.len(),
            errors: Vec::new(),
            dry_run: true,
        };
    }

    let mut deleted_count = 0;
    let mut errors = Vec::new();

    for path in paths {
        if !path.exists() {
            errors.push(format!("File not found: {}", path.display()));
            continue;
        }
        match fs::remove_file(path) {
            Ok(()) => deleted_count += 1,
            Err(err) => errors.push(format!("Failed to delete {}: {}", path.display(), err)),
        }
    }

    DeleteOutcome {
        deleted_count,
        errors,
        dry_run: false,
    }
}

/// Copies categorized files into `output_dir`, one subdirectory per
/// category.
///
/// Files are COPIED, never moved; originals stay in place. The copy carries
/// the source's permission bits but not its timestamps. Category
/// subdirectories are created if absent (`create_dir_all` is idempotent, so
/// concurrent creation of the same directory is safe). A per-file copy
/// failure is recorded and the run continues; a directory-creation failure
/// aborts the whole organize with that single error.
pub fn organize(
    mapping: &CategorizedMapping,
    output_dir: &Path,
    dry_run: bool,
) -> OrganizeOutcome {
    let category_dirs: Vec<String> = mapping
        .iter()
        .map(|(category, _)| category_dir_name(category))
        .collect();

    if dry_run {
        return OrganizeOutcome {
            organized_count: mapping.file_count(),
            errors: Vec::new(),
            dry_run: true,
            category_dirs,
        };
    }

    let mut organized_count = 0;
    let mut errors = Vec::new();

    if let Err(err) = fs::create_dir_all(output_dir) {
        errors.push(format!(
            "Failed to create output directory {}: {}",
            output_dir.display(),
            err
        ));
        return OrganizeOutcome {
            organized_count,
            errors,
            dry_run: false,
            category_dirs,
        };
    }

    for (category, files) in mapping.iter() {
        let category_dir = output_dir.join(category_dir_name(category));
        if let Err(err) = fs::create_dir_all(&category_dir) {
            errors.push(format!(
                "Failed to create output directory {}: {}",
                category_dir.display(),
                err
            ));
            return OrganizeOutcome {
                organized_count,
                errors,
                dry_run: false,
                category_dirs,
            };
        }

        for file in files {
            let destination = category_dir.join(&file.record.name);
            match fs::copy(&file.record.path, &destination) {
                Ok(_) => organized_count += 1,
                Err(err) => errors.push(format!(
                    "Failed to organize {}: {}",
                    file.record.path.display(),
                    err
                )),
            }
        }
    }

    OrganizeOutcome {
        organized_count,
        errors,
        dry_run: false,
        category_dirs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorizer::categorize;
    use crate::rules::CategorizationRule;
    use crate::scanner::FileRecord;
    use tempfile::TempDir;

    fn record_for(path: &Path) -> FileRecord {
        FileRecord {
            path: path.to_path_buf(),
            name: path.file_name().unwrap().to_string_lossy().to_string(),
            size: 1,
            digest: "d".repeat(64),
            extension: ".exe".to_string(),
        }
    }

    fn keyword_rule(category: &str, keyword: &str) -> CategorizationRule {
        CategorizationRule {
            category: category.to_string(),
            keywords: vec![keyword.to_string()],
            path_patterns: Vec::new(),
            enabled: true,
        }
    }

    fn snapshot(dir: &Path) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        for entry in walkdir::WalkDir::new(dir) {
            paths.push(entry.expect("walk failed").path().to_path_buf());
        }
        paths.sort();
        paths
    }

    #[test]
    fn test_delete_dry_run_reports_optimistic_count_without_touching_disk() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let existing = temp_dir.path().join("a.exe");
        fs::write(&existing, b"bytes").expect("Failed to write file");
        let missing = temp_dir.path().join("ghost.exe");

        let before = snapshot(temp_dir.path());
        let outcome = delete_selected(&[existing.clone(), missing], true);
        let after = snapshot(temp_dir.path());

        assert!(outcome.dry_run);
        // Optimistic: counts both paths even though one doesn't exist.
        assert_eq!(outcome.deleted_count, 2);
        assert!(outcome.errors.is_empty());
        assert_eq!(before, after);
        assert!(existing.exists());
    }

    #[test]
    fn test_delete_removes_files_in_real_mode() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let target = temp_dir.path().join("a.exe");
        let kept = temp_dir.path().join("b.exe");
        fs::write(&target, b"bytes").expect("Failed to write target");
        fs::write(&kept, b"bytes").expect("Failed to write kept");

        let outcome = delete_selected(&[target.clone()], false);

        assert_eq!(outcome.deleted_count, 1);
        assert!(outcome.errors.is_empty());
        assert!(!target.exists());
        assert!(kept.exists());
    }

    #[test]
    fn test_delete_records_missing_files_and_continues() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("ghost.exe");
        let real = temp_dir.path().join("real.exe");
        fs::write(&real, b"bytes").expect("Failed to write file");

        let outcome = delete_selected(&[missing, real.clone()], false);

        assert_eq!(outcome.deleted_count, 1);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("File not found"));
        assert!(!real.exists(), "batch continued past the missing file");
    }

    #[test]
    fn test_organize_dry_run_reports_dirs_without_touching_disk() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("game.exe");
        fs::write(&source, b"bytes").expect("Failed to write file");

        let mapping = categorize(
            &[record_for(&source)],
            &[keyword_rule("Fun Stuff", "game")],
        );
        let output_dir = temp_dir.path().join("out");

        let before = snapshot(temp_dir.path());
        let outcome = organize(&mapping, &output_dir, true);
        let after = snapshot(temp_dir.path());

        assert!(outcome.dry_run);
        assert_eq!(outcome.organized_count, 1);
        assert_eq!(outcome.category_dirs, vec!["Fun_Stuff"]);
        assert!(outcome.errors.is_empty());
        assert_eq!(before, after);
        assert!(!output_dir.exists());
    }

    #[test]
    fn test_organize_copies_and_keeps_originals() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("game.exe");
        fs::write(&source, b"game bytes").expect("Failed to write file");

        let mapping = categorize(&[record_for(&source)], &[keyword_rule("Games", "game")]);
        let output_dir = temp_dir.path().join("out");

        let outcome = organize(&mapping, &output_dir, false);

        assert_eq!(outcome.organized_count, 1);
        assert!(outcome.errors.is_empty());
        assert!(source.exists(), "organize copies, never moves");
        let copied = output_dir.join("Games").join("game.exe");
        assert!(copied.exists());
        assert_eq!(
            fs::read(&copied).expect("Failed to read copy"),
            b"game bytes"
        );
    }

    #[test]
    fn test_organize_replaces_spaces_in_category_dirs() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("monitor.exe");
        fs::write(&source, b"bytes").expect("Failed to write file");

        let mapping = categorize(
            &[record_for(&source)],
            &[keyword_rule("System Utilities", "monitor")],
        );
        let output_dir = temp_dir.path().join("out");

        let outcome = organize(&mapping, &output_dir, false);

        assert_eq!(outcome.organized_count, 1);
        assert!(output_dir.join("System_Utilities").join("monitor.exe").exists());
    }

    #[test]
    fn test_organize_records_per_file_failures_and_continues() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let good = temp_dir.path().join("good.exe");
        fs::write(&good, b"bytes").expect("Failed to write file");
        // Record for a file that no longer exists, so the copy fails.
        let gone = temp_dir.path().join("gone.exe");

        let mapping = categorize(
            &[record_for(&gone), record_for(&good)],
            &[keyword_rule("Apps", "exe")],
        );
        let output_dir = temp_dir.path().join("out");

        let outcome = organize(&mapping, &output_dir, false);

        assert_eq!(outcome.organized_count, 1);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("gone.exe"));
        assert!(output_dir.join("Apps").join("good.exe").exists());
    }

    #[test]
    fn test_organize_aborts_when_output_dir_cannot_be_created() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("game.exe");
        fs::write(&source, b"bytes").expect("Failed to write file");

        let mapping = categorize(&[record_for(&source)], &[keyword_rule("Games", "game")]);
        // A regular file where the output directory should go.
        let output_dir = temp_dir.path().join("blocked");
        fs::write(&output_dir, b"not a directory").expect("Failed to write blocker");

        let outcome = organize(&mapping, &output_dir, false);

        assert_eq!(outcome.organized_count, 0);
        assert_eq!(outcome.errors.len(), 1, "abort with exactly one error");
        assert!(outcome.errors[0].contains("Failed to create output directory"));
        assert!(source.exists());
    }

    #[test]
    fn test_organize_aborts_when_category_dir_cannot_be_created() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("game.exe");
        fs::write(&source, b"bytes").expect("Failed to write file");

        let mapping = categorize(&[record_for(&source)], &[keyword_rule("Games", "game")]);
        let output_dir = temp_dir.path().join("out");
        fs::create_dir_all(&output_dir).expect("Failed to create output dir");
        // A regular file where the category subdirectory should go.
        fs::write(output_dir.join("Games"), b"not a directory").expect("Failed to write blocker");

        let outcome = organize(&mapping, &output_dir, false);

        assert_eq!(outcome.organized_count, 0);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("Failed to create output directory"));
    }

    #[cfg(unix)]
    #[test]
    fn test_organize_copies_permission_bits() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("tool.sh");
        fs::write(&source, b"#!/bin/sh\n").expect("Failed to write file");
        fs::set_permissions(&source, fs::Permissions::from_mode(0o755))
            .expect("Failed to set permissions");

        let mapping = categorize(&[record_for(&source)], &[keyword_rule("Scripts", "tool")]);
        let output_dir = temp_dir.path().join("out");
        let outcome = organize(&mapping, &output_dir, false);
        assert_eq!(outcome.organized_count, 1);

        let copied = output_dir.join("Scripts").join("tool.sh");
        let mode = fs::metadata(&copied)
            .expect("Failed to stat copy")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_organize_empty_mapping_creates_nothing_but_output_dir() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let output_dir = temp_dir.path().join("out");

        let mapping = categorize(&[], &[]);
        let outcome = organize(&mapping, &output_dir, false);

        assert_eq!(outcome.organized_count, 0);
        assert!(outcome.errors.is_empty());
        assert!(output_dir.exists());
    }
}
