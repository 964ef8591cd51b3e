//! Content configuration module.
//!
//! Handles loading, validating, and merging `content.toml`. Stock defaults
//! form the base layer; a `content.toml` at the content root overrides them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [locale]
//! default_language = "en"       # Language used when none is requested
//!
//! [queries]
//! recent_limit = 5              # Default size of "recent" listings
//! related_limit = 3             # Default size of "related" listings
//!
//! [layout]
//! overrides_dir = "custom"      # Override registry inside each collection dir
//! authors_file = "authors.json" # Author directory at the content root
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want.
//!
//! ```toml
//! [locale]
//! default_language = "hu"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::locale::Language;
use crate::query::{DEFAULT_RECENT_LIMIT, DEFAULT_RELATED_LIMIT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name of the configuration at the content root.
pub const CONFIG_FILE: &str = "content.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Content configuration loaded from `content.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    pub locale: LocaleConfig,
    pub queries: QueriesConfig,
    pub layout: LayoutConfig,
}

impl ContentConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queries.recent_limit == 0 {
            return Err(ConfigError::Validation(
                "queries.recent_limit must be at least 1".into(),
            ));
        }
        if self.queries.related_limit == 0 {
            return Err(ConfigError::Validation(
                "queries.related_limit must be at least 1".into(),
            ));
        }
        if self.layout.overrides_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "layout.overrides_dir must not be empty".into(),
            ));
        }
        if self.layout.authors_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "layout.authors_file must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocaleConfig {
    /// Language used for display when the caller does not ask for one.
    /// Unsupported codes fail deserialization.
    pub default_language: Language,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default_language: Language::canonical(),
        }
    }
}

/// Default listing sizes. Library calls always pass limits explicitly;
/// these feed the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueriesConfig {
    pub recent_limit: usize,
    pub related_limit: usize,
}

impl Default for QueriesConfig {
    fn default() -> Self {
        Self {
            recent_limit: DEFAULT_RECENT_LIMIT,
            related_limit: DEFAULT_RELATED_LIMIT,
        }
    }
}

/// Where the loader finds things under the content root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Directory inside each collection directory holding override records.
    pub overrides_dir: String,
    /// Author directory file, relative to the content root.
    pub authors_file: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            overrides_dir: "custom".to_string(),
            authors_file: "authors.json".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(ContentConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `content.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `content.toml`.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ContentConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ContentConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `content.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<ContentConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `content.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Site Content Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file at the content root as content.toml.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Localization
# ---------------------------------------------------------------------------
[locale]
# Language used for display when none is requested (en, hu, de).
# Text missing in this language falls back to English.
default_language = "en"

# ---------------------------------------------------------------------------
# Query defaults
# ---------------------------------------------------------------------------
[queries]
# Number of items in "recent" listings (newest first).
recent_limit = 5

# Number of items in "related content" listings.
related_limit = 3

# ---------------------------------------------------------------------------
# Content tree layout
# ---------------------------------------------------------------------------
[layout]
# Sub-directory of each collection directory holding override records.
# Overrides replace a base record with the same id as a whole.
overrides_dir = "custom"

# Author directory, relative to the content root.
authors_file = "authors.json"
"##
}
