//! Generator configuration.
//!
//! Handles loading, validating, and layering `config.toml`. Values are
//! resolved in three layers, each overriding the previous:
//!
//! ```text
//! stock defaults  →  config.toml (optional)  →  command-line flags
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_root = "content/docs"     # Directory walked for .mdx pages
//! base_url = "https://s.ee/docs"    # Absolute URL the content root is served at
//!
//! [sitemap]
//! output = "public/sitemap.xml"     # Sitemap file, replaced atomically
//!
//! [export]
//! output_dir = "public/llms.mdx"    # Markdown export directory
//!
//! [processing]
//! max_processes = 4                 # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Generator configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory walked for `.mdx` pages.
    pub content_root: String,
    /// Absolute URL at which the content root is published.
    pub base_url: String,
    /// Sitemap output settings.
    pub sitemap: SitemapConfig,
    /// Markdown export settings.
    pub export: ExportConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_root: "content/docs".to_string(),
            base_url: "https://s.ee/docs".to_string(),
            sitemap: SitemapConfig::default(),
            export: ExportConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content_root.trim().is_empty() {
            return Err(ConfigError::Validation(
                "content_root must not be empty".into(),
            ));
        }
        validate_base_url(&self.base_url)?;
        if self.sitemap.output.trim().is_empty() {
            return Err(ConfigError::Validation(
                "sitemap.output must not be empty".into(),
            ));
        }
        if self.export.output_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "export.output_dir must not be empty".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(base_url)
        .map_err(|e| ConfigError::Validation(format!("base_url {base_url:?} is invalid: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Validation(format!(
            "base_url must use http or https, got {:?}",
            parsed.scheme()
        )));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ConfigError::Validation(
            "base_url must not carry a query or fragment".into(),
        ));
    }
    Ok(())
}

/// Sitemap output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    /// Path of the generated sitemap file.
    pub output: String,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            output: "public/sitemap.xml".to_string(),
        }
    }
}

/// Markdown export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Directory receiving one `.md` file per page.
    pub output_dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: "public/llms.mdx".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers for timestamp reads and page parsing.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
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

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge overlays onto a base value in order, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config_path` layered over stock defaults.
///
/// `overrides` (typically built from command-line flags) wins over the file.
pub fn load_config(
    config_path: &Path,
    overrides: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let file = load_raw_config(config_path)?;
    resolve_config(base, file.into_iter().chain(overrides))
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# mdx-sitemap Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Command-line flags (--source, --base-url, --output, --export-dir)
# override the values in this file.
# Unknown keys will cause an error.

# Directory walked recursively for .mdx pages.
content_root = "content/docs"

# Absolute URL at which the content root is published.
# content/docs/index.mdx maps to "<base_url>/", api/overview.mdx to
# "<base_url>/api/overview/".
base_url = "https://s.ee/docs"

# ---------------------------------------------------------------------------
# Sitemap
# ---------------------------------------------------------------------------
[sitemap]
# Sitemap file. Replaced atomically on every run.
output = "public/sitemap.xml"

# ---------------------------------------------------------------------------
# Markdown export
# ---------------------------------------------------------------------------
[export]
# Directory receiving one .md file per page (index.md for the root page).
output_dir = "public/llms.mdx"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers for timestamp reads and page parsing.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
