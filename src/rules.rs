//! Categorization rule store and classification engine.
//!
//! Rules live in a JSON file (`{ "rules": [...] }`). When the store is
//! absent or unreadable a built-in default set is used instead, and the
//! defaults are written back to the store so the next run can be edited;
//! failure to persist is a warning, never a load failure.
//!
//! Classification is an ordered linear scan with early exit: the first
//! enabled rule whose keywords or path patterns match wins. This is a design
//! choice, not an optimization: later rules are unreachable for a file once
//! an earlier one matches it, so overlapping keyword sets across categories
//! should be resolved by the rule-set author, not the engine.

use crate::scanner::FileRecord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Sentinel category for records matching no enabled rule.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One classification policy: a category plus its match criteria.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizationRule {
    /// Category name assigned when this rule matches.
    pub category: String,

    /// Keyword substrings matched case-insensitively against the base name.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Path substrings matched case-insensitively against the full path.
    #[serde(default)]
    pub path_patterns: Vec<String>,

    /// Disabled rules are skipped during classification.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// On-disk shape of the rule store.
#[derive(Debug, Serialize, Deserialize)]
struct RuleStore {
    rules: Vec<CategorizationRule>,
}

/// Rules loaded for a run, plus any non-fatal warnings hit along the way.
#[derive(Debug)]
pub struct LoadedRules {
    pub rules: Vec<CategorizationRule>,
    pub warnings: Vec<String>,
}

fn rule(category: &str, keywords: &[&str], path_patterns: &[&str]) -> CategorizationRule {
    CategorizationRule {
        category: category.to_string(),
        keywords: keywords.iter().map(|s| s.to_string()).collect(),
        path_patterns: path_patterns.iter().map(|s| s.to_string()).collect(),
        enabled: true,
    }
}

/// The built-in rule set used when no store exists.
pub fn default_rules() -> Vec<CategorizationRule> {
    vec![
        rule(
            "Developer Tools",
            &[
                "code", "studio", "dev", "git", "npm", "node", "python", "java", "ide",
            ],
            &[
                "/Developer",
                "/Applications/Developer",
                "Program Files/Microsoft Visual Studio",
            ],
        ),
        rule(
            "Productivity",
            &[
                "office", "word", "excel", "powerpoint", "notes", "calendar", "mail",
            ],
            &["/Applications/Office", "Program Files/Microsoft Office"],
        ),
        rule(
            "Entertainment",
            &["game", "media", "player", "music", "video", "steam"],
            &["/Games", "/Applications/Games", "Program Files/Steam"],
        ),
        rule(
            "System Utilities",
            &["system", "utility", "cleaner", "monitor", "backup"],
            &["/System", "/usr/bin"],
        ),
    ]
}

/// Loads the rule set from `store_path`.
///
/// An absent or unparsable store falls back to [`default_rules`], and the
/// defaults are then written to the store for future runs. Both the fallback
/// and any write-back failure are reported on the outcome's warnings list.
pub fn load_rules(store_path: &Path) -> LoadedRules {
    let mut warnings = Vec::new();

    if store_path.exists() {
        match fs::read_to_string(store_path) {
            Ok(content) => match serde_json::from_str::<RuleStore>(&content) {
                Ok(store) => {
                    return LoadedRules {
                        rules: store.rules,
                        warnings,
                    };
                }
                Err(err) => warnings.push(format!(
                    "Could not parse rules from {}: {}. Using defaults.",
                    store_path.display(),
                    err
                )),
            },
            Err(err) => warnings.push(format!(
                "Could not read rules from {}: {}. Using defaults.",
                store_path.display(),
                err
            )),
        }
    }

    let rules = default_rules();
    if let Err(err) = persist_rules(store_path, &rules) {
        warnings.push(format!(
            "Could not write default rules file {}: {}",
            store_path.display(),
            err
        ));
    }

    LoadedRules { rules, warnings }
}

/// Writes the rule set to the store in pretty JSON.
fn persist_rules(store_path: &Path, rules: &[CategorizationRule]) -> std::io::Result<()> {
    if let Some(parent) = store_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let store = RuleStore {
        rules: rules.to_vec(),
    };
    let json = serde_json::to_string_pretty(&store)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    fs::write(store_path, json)
}

/// Classifies a record against the rules in order.
///
/// A rule matches if ANY keyword is a case-insensitive substring of the
/// record's base name, OR ANY path pattern is a case-insensitive substring
/// of its full path. Matching is plain substring, not whole-word or glob.
/// The first matching enabled rule wins; with no match the record gets the
/// [`UNCATEGORIZED`] sentinel.
pub fn classify(record: &FileRecord, rules: &[CategorizationRule]) -> String {
    let name = record.name.to_lowercase();
    let path = record.path.to_string_lossy().to_lowercase();

    for rule in rules {
        if !rule.enabled {
            continue;
        }

        let keyword_match = rule
            .keywords
            .iter()
            .any(|keyword| name.contains(&keyword.to_lowercase()));
        let path_match = rule
            .path_patterns
            .iter()
            .any(|pattern| path.contains(&pattern.to_lowercase()));

        if keyword_match || path_match {
            return rule.category.clone();
        }
    }

    UNCATEGORIZED.to_string()
}
