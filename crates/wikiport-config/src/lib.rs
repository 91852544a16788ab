//! Configuration for wikiport.
//!
//! Parses `wikiport.toml` files with serde and provides auto-discovery of
//! config files in parent directories. CLI flags take precedence over file
//! values via [`CliSettings`]; everything has a working default, so running
//! without any config file is fine.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "wikiport.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the flat-wiki separator.
    pub flat_separator: Option<String>,
    /// Override strict mode.
    pub strict: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source tree options.
    pub tree: TreeConfig,
    /// Export options.
    pub export: ExportConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Source tree configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Stem of the conventional entry page at the tree root.
    pub entry_page: String,
    /// Directory names the walker skips entirely.
    pub exclude: Vec<String>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            entry_page: "home".to_owned(),
            exclude: Vec::new(),
        }
    }
}

/// Export configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Treat recoverable diagnostics as fatal at exit.
    pub strict: bool,
    /// String joining route segments under the flat-wiki convention.
    pub flat_separator: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            strict: false,
            flat_separator: "-".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `wikiport.toml` in current directory and parents,
    /// falling back to defaults when nothing is found.
    ///
    /// CLI settings are applied after loading and the merged result is
    /// validated, so an invalid separator is rejected no matter where it
    /// came from.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist, parsing
    /// fails, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(separator) = &settings.flat_separator {
            self.export.flat_separator.clone_from(separator);
        }
        if let Some(strict) = settings.strict {
            self.export.strict = strict;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically at the end of [`Config::load`], after CLI
    /// settings have been merged.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_tree()?;
        self.validate_export()?;
        Ok(())
    }

    /// Validate source tree configuration.
    fn validate_tree(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.tree.entry_page, "tree.entry_page")?;

        for name in &self.tree.exclude {
            if name.is_empty() {
                return Err(ConfigError::Validation(
                    "tree.exclude entries cannot be empty".to_owned(),
                ));
            }
            // Exclusion matches single directory names during the walk,
            // not paths.
            if name.contains(['/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "tree.exclude entry '{name}' must be a bare directory name"
                )));
            }
        }

        Ok(())
    }

    /// Validate export configuration.
    fn validate_export(&self) -> Result<(), ConfigError> {
        let separator = &self.export.flat_separator;
        require_non_empty(separator, "export.flat_separator")?;

        if separator.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(
                "export.flat_separator cannot contain whitespace".to_owned(),
            ));
        }
        // "." and ".." would produce flattened names that walk back out of
        // the destination; "/" is allowed and keeps the hierarchy.
        if separator == "." || separator == ".." {
            return Err(ConfigError::Validation(format!(
                "export.flat_separator cannot be '{separator}'"
            )));
        }
        if separator.contains('\\') {
            return Err(ConfigError::Validation(
                "export.flat_separator cannot contain backslashes".to_owned(),
            ));
        }

        Ok(())
    }
}
