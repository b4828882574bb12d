//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use rapport_gatekeeper::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Boundary validation rules
    #[serde(default)]
    pub validation: ValidationSettings,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Validation section of the config file.
///
/// `preset` picks a base rule set; the optional overrides then flip single
/// rules on top of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSettings {
    /// `default`, `permissive` or `strict`
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Override for mutual-follow mismatches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_mutual_follow_mismatch: Option<bool>,

    /// Override for status mismatches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_status_mismatch: Option<bool>,

    /// Override for action mismatches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_action_mismatch: Option<bool>,

    /// Override for unknown friendship statuses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_unknown_friendship_status: Option<bool>,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".rapport").join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from a file, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Build the gatekeeper rules, optionally forcing a preset.
    pub fn validation_config(&self, preset: Option<&str>) -> Result<ValidationConfig> {
        let name = preset.unwrap_or(&self.validation.preset);
        let mut config = ValidationConfig::preset(name)
            .ok_or_else(|| CliError::Config(format!("Unknown validation preset '{}'", name)))?;

        let overrides = &self.validation;
        if let Some(value) = overrides.reject_mutual_follow_mismatch {
            config.reject_mutual_follow_mismatch = value;
        }
        if let Some(value) = overrides.reject_status_mismatch {
            config.reject_status_mismatch = value;
        }
        if let Some(value) = overrides.reject_action_mismatch {
            config.reject_action_mismatch = value;
        }
        if let Some(value) = overrides.reject_unknown_friendship_status {
            config.reject_unknown_friendship_status = value;
        }

        Ok(config)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            log_level: default_log_level(),
        }
    }
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            reject_mutual_follow_mismatch: None,
            reject_status_mismatch: None,
            reject_action_mismatch: None,
            reject_unknown_friendship_status: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_preset() -> String {
    "default".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.validation.preset, "default");
    }

    #[test]
    fn test_load_written_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.settings.format = OutputFormat::Json;
        config.validation.preset = "strict".to_string();
        config.validation.reject_action_mismatch = Some(false);
        fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[validation]\npreset = \"permissive\"\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(loaded.settings.color);
        assert_eq!(
            loaded.validation_config(None).unwrap(),
            ValidationConfig::permissive()
        );
    }

    #[test]
    fn test_overrides_apply_on_top_of_preset() {
        let mut config = Config::default();
        config.validation.reject_status_mismatch = Some(true);

        let rules = config.validation_config(None).unwrap();
        assert!(rules.reject_status_mismatch);
        assert!(!rules.reject_action_mismatch);

        let forced = config.validation_config(Some("permissive")).unwrap();
        assert!(forced.reject_status_mismatch);
        assert!(!forced.reject_unknown_friendship_status);
    }

    #[test]
    fn test_unknown_preset() {
        let config = Config::default();
        assert!(matches!(
            config.validation_config(Some("paranoid")),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[settings\ncolor = ").unwrap();

        assert!(matches!(Config::load_from(&path), Err(CliError::Toml(_))));
    }
}
