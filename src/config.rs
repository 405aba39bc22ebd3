//! # Configuration Module
//!
//! This module provides configuration support for reheader. A project can
//! pin its license file, header title, mode and traversal rules in a
//! `.reheader.toml` file instead of repeating them on the command line.
//!
//! Configuration can be specified in a `.reheader.toml` file in the root, via
//! the `REHEADER_CONFIG` environment variable, or with `--config`.
//!
//! ```toml
//! license-file = "LICENSE-HEADER.txt"
//! title = "GPL v3 License Header"
//! mode = "full-regeneration"
//! exclude-dirs = ["generated"]
//! ignore = ["*.Designer.cs"]
//!
//! [variables]
//! owner = "Example Corp"
//!
//! [[sections]]
//! title = "French version"
//! file = "LICENSE-HEADER.fr.txt"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::splicer::Mode;
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".reheader.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "REHEADER_CONFIG";

/// A nested header section backed by a text file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
  /// Title placed after the region directive
  pub title: String,
  /// File holding the section body
  pub file: PathBuf,
}

/// Main configuration struct for reheader.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  /// License body template
  pub license_file: Option<PathBuf>,

  /// Title used in the opening region line
  pub title: Option<String>,

  pub mode: Option<Mode>,

  /// Directory names pruned in addition to the defaults
  #[serde(default)]
  pub exclude_dirs: Vec<String>,

  /// Glob patterns for files to skip
  #[serde(default)]
  pub ignore: Vec<String>,

  /// Template variables; `--var` overrides entries with the same name
  #[serde(default)]
  pub variables: BTreeMap<String, String>,

  /// Nested sections, rendered in order
  #[serde(default)]
  pub sections: Vec<SectionConfig>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A value passed parsing but cannot be used.
  #[error("Invalid value for '{key}': {message}")]
  InvalidValue { key: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// Relative paths inside the file are resolved against the directory that
  /// contains it.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(config.resolve_paths(base_dir))
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - `title` and section titles are single non-empty lines
  /// - `exclude-dirs` entries are bare directory names
  /// - variable names are valid placeholder identifiers
  fn validate(&self) -> Result<(), ConfigError> {
    if let Some(title) = &self.title {
      check_title("title", title)?;
    }

    for (index, section) in self.sections.iter().enumerate() {
      check_title(&format!("sections[{}].title", index), &section.title)?;
    }

    for name in &self.exclude_dirs {
      if name.trim().is_empty() || name.contains(['/', '\\']) {
        return Err(ConfigError::InvalidValue {
          key: "exclude-dirs".to_string(),
          message: format!("'{}' must be a bare directory name", name),
        });
      }
    }

    for name in self.variables.keys() {
      if !is_identifier(name) {
        return Err(ConfigError::InvalidValue {
          key: format!("variables.{}", name),
          message: "variable names must start with a letter or '_' and contain only letters, digits and '_'"
            .to_string(),
        });
      }
    }

    Ok(())
  }

  fn resolve_paths(mut self, base_dir: &Path) -> Self {
    self.license_file = self.license_file.map(|file| base_dir.join(file));
    for section in &mut self.sections {
      section.file = base_dir.join(&section.file);
    }
    self
  }
}

fn check_title(key: &str, title: &str) -> Result<(), ConfigError> {
  if title.trim().is_empty() || title.contains('\n') {
    return Err(ConfigError::InvalidValue {
      key: key.to_string(),
      message: "must be a non-empty single line".to_string(),
    });
  }
  Ok(())
}

/// Whether `name` can be used as a `{{name}}` placeholder.
pub fn is_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  chars
    .next()
    .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `REHEADER_CONFIG` environment variable
/// 3. `.reheader.toml` in the root directory
///
/// An explicit path is returned even if it does not exist, so that loading
/// it reports the problem.
pub fn discover_config_path(explicit_path: Option<&Path>, root: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    verbose_log!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let root_config = root.join(DEFAULT_CONFIG_FILENAME);
  if root_config.exists() {
    verbose_log!("Using root config: {}", root_config.display());
    return Some(root_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// Returns `None` when `no_config` is set or no config file is found.
pub fn load_config(explicit_path: Option<&Path>, root: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, root) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
