//! appkeeper - an application-file inventory and organization utility
//!
//! This library provides utilities for scanning directory trees for
//! application installer files, detecting byte-identical duplicates via
//! content hashing, classifying files with a configurable rule set, and
//! copying classified files into a category-partitioned output tree, with
//! dry-run support and JSON/CSV reporting.

pub mod actions;
pub mod categorizer;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod hasher;
pub mod output;
pub mod report;
pub mod rules;
pub mod scanner;

pub use actions::{DeleteOutcome, OrganizeOutcome, delete_selected, organize};
pub use categorizer::{CategorizedFile, CategorizedMapping, categorize};
pub use config::{ConfigError, ConfigOverrides, RunConfig};
pub use duplicates::{DuplicateGroup, group_duplicates, resolve_selection};
pub use report::ScanSummary;
pub use rules::{CategorizationRule, UNCATEGORIZED, classify, default_rules, load_rules};
pub use scanner::{FileRecord, ScanError, ScanOutcome, ScanProgress, scan, scan_with_progress};

pub use cli::{Args, run_cli};
