//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output, including colored
//! output, progress tracking, and formatted tables. This module abstracts
//! away output details, making it easy to change formatting globally.

use crate::duplicates::DuplicateGroup;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Manages all CLI output with consistent styling and formatting.
///
/// This struct provides methods for:
/// - Success messages (green with ✓)
/// - Error messages (red with ✗)
/// - Warning messages (yellow with ⚠)
/// - Info messages (cyan)
/// - Progress bars for hashing
/// - Category and duplicate-group summary listings
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates and returns a progress bar for hashing operations.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Prints a summary table of file counts per category, in category
    /// order.
    pub fn category_table(category_counts: &[(String, usize)]) {
        Self::header("CATEGORIES");

        let max_category_len = category_counts
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max(8); // At least "Category" width

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = max_category_len
        );
        println!("{}", "-".repeat(max_category_len + 10));

        let mut total_files = 0;
        for (category, count) in category_counts {
            total_files += count;
            let file_word = if *count == 1 { "file" } else { "files" };
            println!(
                "{:<width$} | {} {}",
                category,
                count.to_string().green(),
                file_word,
                width = max_category_len
            );
        }

        println!("{}", "-".repeat(max_category_len + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total_files.to_string().green().bold(),
            if total_files == 1 { "file" } else { "files" },
            width = max_category_len
        );
    }

    /// Prints duplicate groups with 1-based group and file indices, the
    /// numbering used by the `--delete-duplicates GROUP:FILE` selection.
    pub fn duplicate_groups(groups: &[DuplicateGroup]) {
        Self::header("DUPLICATE GROUPS");

        for (group_idx, group) in groups.iter().enumerate() {
            let digest_prefix: String = group.digest.chars().take(8).collect();
            println!(
                "\nGroup {} (hash: {}..., {} bytes each):",
                group_idx + 1,
                digest_prefix,
                group.size
            );
            for (file_idx, file) in group.files.iter().enumerate() {
                println!(
                    "  {}. {} ({})",
                    file_idx + 1,
                    file.name,
                    file.path.display()
                );
            }
        }
    }
}
