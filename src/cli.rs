//! Command-line interface module for appkeeper.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing and validation
//! - Pipeline orchestration (scan → duplicates → categorize → act)
//! - Duplicate selection parsing for deletion
//! - Report generation
//!
//! Each pipeline stage takes the previous stage's output as an argument and
//! returns its own result; no stage reads another's state out-of-band.

use crate::actions;
use crate::categorizer;
use crate::config::{ConfigOverrides, RunConfig};
use crate::duplicates;
use crate::output::OutputFormatter;
use crate::report::ScanSummary;
use crate::rules;
use crate::scanner::{self, ScanError, ScanProgress};
use clap::Parser;
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};

/// Inventory application installer files, find byte-identical duplicates,
/// and organize them into category folders.
#[derive(Parser, Debug)]
#[command(name = "appkeeper", version, about, long_about = None)]
pub struct Args {
    /// Directory to scan
    #[arg(short = 'd', long)]
    pub directory: PathBuf,

    /// Configuration file path
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Perform a dry run without making changes
    #[arg(long)]
    pub dry_run: bool,

    /// Copy categorized files into the output directory
    #[arg(long)]
    pub organize: bool,

    /// Duplicate files to delete, as comma-separated 1-based GROUP:FILE
    /// pairs (e.g. "1:2,3:1")
    #[arg(long, value_name = "GROUP:FILE[,GROUP:FILE...]")]
    pub delete_duplicates: Option<String>,

    /// Output directory for organized files
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Rules file path
    #[arg(long)]
    pub rules_file: Option<PathBuf>,

    /// Enable verbose per-file output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            source_directory: Some(self.directory.clone()),
            output_directory: self.output_dir.clone(),
            rules_file: self.rules_file.clone(),
            dry_run: if self.dry_run { Some(true) } else { None },
        }
    }
}

/// Drives the hashing progress bar from the scanner's observer hooks. The
/// bar is created before the candidate count is known and sized at `begin`.
struct HashProgress(ProgressBar);

impl ScanProgress for HashProgress {
    fn begin(&self, total: u64) {
        self.0.set_length(total);
    }

    fn tick(&self) {
        self.0.inc(1);
    }

    fn finish(&self) {
        self.0.finish_and_clear();
    }
}

/// Installs the interrupt handler that requests a clean scan abort.
pub fn install_interrupt_handler() {
    if let Err(err) = ctrlc::set_handler(scanner::request_cancellation) {
        OutputFormatter::warning(&format!("Could not install interrupt handler: {}", err));
    }
}

/// Parses a duplicate selection like "1:2,3:1" into 1-based
/// (group, file) index pairs.
///
/// Malformed input is a usage error; out-of-range indices are not: those
/// are silently skipped later when the selection is resolved against the
/// actual groups.
pub fn parse_selection(selection: &str) -> Result<Vec<(usize, usize)>, String> {
    selection
        .split(',')
        .map(|pair| {
            let (group, file) = pair
                .trim()
                .split_once(':')
                .ok_or_else(|| format!("Invalid selection '{}': expected GROUP:FILE", pair))?;
            let group = group
                .trim()
                .parse::<usize>()
                .map_err(|_| format!("Invalid group index '{}'", group))?;
            let file = file
                .trim()
                .parse::<usize>()
                .map_err(|_| format!("Invalid file index '{}'", file))?;
            Ok((group, file))
        })
        .collect()
}

/// Runs the full pipeline for the given arguments.
///
/// A run with no files found (including a missing root directory) reports a
/// warning and returns Ok; an interrupted run returns Ok without writing any
/// report. Unexpected failures come back as Err and exit non-zero in main.
pub fn run_cli(args: &Args) -> Result<(), String> {
    let config = RunConfig::load(args.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?
        .merge(&args.overrides());

    // Fail usage errors before touching the filesystem.
    let selection = match &args.delete_duplicates {
        Some(raw) => Some(parse_selection(raw)?),
        None => None,
    };

    OutputFormatter::info(&format!(
        "Scanning directory: {}",
        config.source_directory.display()
    ));

    let progress = HashProgress(OutputFormatter::create_progress_bar(0));
    let outcome = match scanner::scan_with_progress(&config.source_directory, &progress) {
        Ok(outcome) => outcome,
        Err(ScanError::Cancelled) => {
            OutputFormatter::info("Operation cancelled");
            return Ok(());
        }
        Err(err @ ScanError::RootNotFound(_)) => {
            OutputFormatter::error(&err.to_string());
            OutputFormatter::warning("No application files found");
            return Ok(());
        }
    };

    for (path, reason) in &outcome.skipped {
        OutputFormatter::warning(&format!("Skipped {}: {}", path.display(), reason));
    }

    if outcome.records.is_empty() {
        OutputFormatter::warning("No application files found");
        return Ok(());
    }

    let records = outcome.records;
    let groups = duplicates::group_duplicates(&records);

    let loaded = rules::load_rules(&config.rules_file);
    for warning in &loaded.warnings {
        OutputFormatter::warning(warning);
    }
    let mapping = categorizer::categorize(&records, &loaded.rules);

    OutputFormatter::header("SCAN RESULTS");
    OutputFormatter::plain(&format!("Total files found: {}", records.len()));
    OutputFormatter::plain(&format!("Duplicate groups: {}", groups.len()));
    OutputFormatter::plain(&format!("Categories: {}", mapping.category_count()));

    if args.verbose {
        for (category, files) in mapping.iter() {
            for file in files {
                OutputFormatter::plain(&format!(
                    " - {} [{}] ({})",
                    file.record.name,
                    category,
                    file.record.path.display()
                ));
            }
        }
    }

    if !groups.is_empty() {
        OutputFormatter::duplicate_groups(&groups);
    }

    let category_counts: Vec<(String, usize)> = mapping
        .iter()
        .map(|(name, files)| (name.to_string(), files.len()))
        .collect();
    OutputFormatter::category_table(&category_counts);

    if let Some(pairs) = selection {
        let paths = duplicates::resolve_selection(&groups, &pairs);
        let outcome = actions::delete_selected(&paths, config.dry_run);
        if outcome.dry_run {
            OutputFormatter::dry_run_notice(&format!(
                "Would delete {} file(s):",
                outcome.deleted_count
            ));
            for path in &paths {
                OutputFormatter::plain(&format!("  - {}", path.display()));
            }
        } else {
            OutputFormatter::success(&format!("Deleted {} file(s)", outcome.deleted_count));
        }
        for error in &outcome.errors {
            OutputFormatter::error(error);
        }
    }

    if args.organize {
        let outcome = actions::organize(&mapping, &config.output_directory, config.dry_run);
        if outcome.dry_run {
            OutputFormatter::dry_run_notice(&format!(
                "Would organize {} file(s) into:",
                outcome.organized_count
            ));
            for dir in &outcome.category_dirs {
                OutputFormatter::plain(&format!(
                    "  - {}",
                    config.output_directory.join(dir).display()
                ));
            }
        } else {
            OutputFormatter::success(&format!(
                "Organized {} file(s) into {}",
                outcome.organized_count,
                config.output_directory.display()
            ));
        }
        for error in &outcome.errors {
            OutputFormatter::error(error);
        }
    }

    let summary = ScanSummary::new(&records, &groups, &mapping);
    write_reports(&summary);

    Ok(())
}

/// Writes report.json and report.csv to the current directory. Report
/// failures are warnings; they never fail the run.
fn write_reports(summary: &ScanSummary<'_>) {
    match summary.save_json(Path::new("report.json")) {
        Ok(()) => OutputFormatter::success("Generated report.json"),
        Err(err) => OutputFormatter::warning(&format!("Failed to generate JSON report: {}", err)),
    }
    match summary.save_csv(Path::new("report.csv")) {
        Ok(()) => OutputFormatter::success("Generated report.csv"),
        Err(err) => OutputFormatter::warning(&format!("Failed to generate CSV report: {}", err)),
    }
}
