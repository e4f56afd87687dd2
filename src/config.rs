use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SmartCommitError};

/// Name of the project-local configuration file.
pub const CONFIG_FILE_NAME: &str = "smartcommit.toml";

/// Represents the complete configuration for smartcommit.
///
/// Contains changelog location, release tagging, commit reporting and
/// classifier extension settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub commit: CommitConfig,

    #[serde(default)]
    pub classifier: ClassifierConfig,
}

fn default_changelog_path() -> PathBuf {
    PathBuf::from("CHANGELOG.md")
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

fn default_max_listed_files() -> usize {
    5
}

/// Where the changelog lives.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default = "default_changelog_path")]
    pub path: PathBuf,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            path: default_changelog_path(),
        }
    }
}

/// Release tagging settings.
///
/// Tags are named `<tag_prefix><version>`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            tag_prefix: default_tag_prefix(),
        }
    }
}

/// Commit mode reporting settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommitConfig {
    /// How many staged files are listed before collapsing into "... and N more"
    #[serde(default = "default_max_listed_files")]
    pub max_listed_files: usize,
}

impl Default for CommitConfig {
    fn default() -> Self {
        CommitConfig {
            max_listed_files: default_max_listed_files(),
        }
    }
}

/// Extra classifier patterns keyed by category name ("feat", "fix", ...).
///
/// Extra patterns are tried after the built-in ones of the same category.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub patterns: BTreeMap<String, Vec<String>>,
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `smartcommit.toml` in current directory
/// 3. `~/.config/.smartcommit.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if local.exists() {
        local
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user_path.exists() {
            user_path
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path)?;
    parse_config(&config_str)
        .map_err(|e| SmartCommitError::config(format!("{}: {}", path.display(), e)))
}

/// Parses configuration from TOML text.
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| SmartCommitError::config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.changelog.path, PathBuf::from("CHANGELOG.md"));
        assert_eq!(config.release.tag_prefix, "v");
        assert_eq!(config.commit.max_listed_files, 5);
        assert!(config.classifier.patterns.is_empty());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config("[release]\ntag_prefix = \"release-\"\n").unwrap();
        assert_eq!(config.release.tag_prefix, "release-");
        assert_eq!(config.changelog.path, PathBuf::from("CHANGELOG.md"));
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let err = parse_config("[changelog\npath = 1").unwrap_err();
        assert!(matches!(err, SmartCommitError::Config(_)));
    }
}
