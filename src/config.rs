//! Run configuration.
//!
//! Configuration is stored in TOML format with the following structure:
//!
//! ```toml
//! source_directory = "."
//! output_directory = "./output"
//! rules_file = "./rules.json"
//! dry_run = false
//! ```
//!
//! Every field has a documented default, and command-line overrides are
//! merged in through a pure function. A missing config file is never an
//! error unless it was explicitly requested.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur during configuration loading.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the explicitly specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration for a single run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Directory to scan. Defaults to the current directory.
    #[serde(default = "default_source_directory")]
    pub source_directory: PathBuf,

    /// Directory organized files are copied into. Defaults to "./output".
    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,

    /// Path to the JSON rule store. Defaults to "./rules.json".
    #[serde(default = "default_rules_file")]
    pub rules_file: PathBuf,

    /// When true, delete and organize report their intended actions without
    /// mutating the filesystem. Defaults to false.
    #[serde(default)]
    pub dry_run: bool,
}

fn default_source_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("./output")
}

fn default_rules_file() -> PathBuf {
    PathBuf::from("./rules.json")
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            source_directory: default_source_directory(),
            output_directory: default_output_directory(),
            rules_file: default_rules_file(),
            dry_run: false,
        }
    }
}

/// Command-line overrides applied on top of a loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub source_directory: Option<PathBuf>,
    pub output_directory: Option<PathBuf>,
    pub rules_file: Option<PathBuf>,
    pub dry_run: Option<bool>,
}

impl RunConfig {
    /// Load configuration, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `appkeeper.toml` in the current directory
    /// 3. Fall back to default configuration
    ///
    /// # Errors
    ///
    /// Returns an error only if a configuration file is explicitly provided
    /// but cannot be read or parsed.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from("appkeeper.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Returns a new configuration with the overrides applied. Fields left
    /// unset in `overrides` keep their loaded value.
    pub fn merge(self, overrides: &ConfigOverrides) -> Self {
        Self {
            source_directory: overrides
                .source_directory
                .clone()
                .unwrap_or(self.source_directory),
            output_directory: overrides
                .output_directory
                .clone()
                .unwrap_or(self.output_directory),
            rules_file: overrides.rules_file.clone().unwrap_or(self.rules_file),
            dry_run: overrides.dry_run.unwrap_or(self.dry_run),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.source_directory, PathBuf::from("."));
        assert_eq!(config.output_directory, PathBuf::from("./output"));
        assert_eq!(config.rules_file, PathBuf::from("./rules.json"));
        assert!(!config.dry_run);
    }

    #[test]
    fn test_load_from_explicit_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            "source_directory = \"/apps\"\ndry_run = true\n",
        )
        .expect("Failed to write config");

        let config = RunConfig::load(Some(&config_path)).expect("Failed to load config");
        assert_eq!(config.source_directory, PathBuf::from("/apps"));
        assert!(config.dry_run);
        // Unspecified fields keep their defaults.
        assert_eq!(config.output_directory, PathBuf::from("./output"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let result = RunConfig::load(Some(Path::new("/non/existent/config.toml")));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "not [valid toml").expect("Failed to write config");

        let result = RunConfig::load(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::ConfigInvalid(_))));
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let config = RunConfig::default();
        let overrides = ConfigOverrides {
            source_directory: Some(PathBuf::from("/scan/here")),
            output_directory: None,
            rules_file: None,
            dry_run: Some(true),
        };

        let merged = config.merge(&overrides);
        assert_eq!(merged.source_directory, PathBuf::from("/scan/here"));
        assert_eq!(merged.output_directory, PathBuf::from("./output"));
        assert!(merged.dry_run);
    }

    #[test]
    fn test_merge_with_empty_overrides_is_identity() {
        let config = RunConfig::default();
        let merged = config.clone().merge(&ConfigOverrides::default());
        assert_eq!(merged.source_directory, config.source_directory);
        assert_eq!(merged.output_directory, config.output_directory);
        assert_eq!(merged.rules_file, config.rules_file);
        assert_eq!(merged.dry_run, config.dry_run);
    }
}
