//! Site configuration module.
//!
//! Handles loading and validating `docweave.toml`. Configuration is sparse:
//! stock defaults are overridden by a single optional file in the content
//! root, and files need only specify the values they want to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_root = "docs"     # Path to content directory (CLI --source wins)
//! base_path = "/docs"       # URL prefix for every document path
//! extensions = ["md", "mdx"] # File extensions treated as content
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Config filename looked up in the content root.
pub const CONFIG_FILENAME: &str = "docweave.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `docweave.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Path to the content root directory.
    pub content_root: String,
    /// URL prefix prepended to every document slug.
    pub base_path: String,
    /// File extensions (without dots) treated as content documents.
    pub extensions: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_root: "docs".to_string(),
            base_path: "/docs".to_string(),
            extensions: vec!["md".to_string(), "mdx".to_string()],
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_path.starts_with('/') {
            return Err(ConfigError::Validation(
                "base_path must start with '/'".into(),
            ));
        }
        if self.base_path.len() > 1 && self.base_path.ends_with('/') {
            return Err(ConfigError::Validation(
                "base_path must not end with '/'".into(),
            ));
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "extensions must not be empty".into(),
            ));
        }
        if let Some(bad) = self.extensions.iter().find(|e| e.starts_with('.')) {
            return Err(ConfigError::Validation(format!(
                "extensions are listed without dots: '{bad}'"
            )));
        }
        Ok(())
    }

    /// Public URL for a document slug: `{base_path}/{slug}`.
    pub fn url_for(&self, slug: &str) -> String {
        if self.base_path == "/" {
            format!("/{slug}")
        } else {
            format!("{}/{slug}", self.base_path)
        }
    }

    /// Whether a file extension (without dot) is a content document.
    pub fn matches_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// Load configuration from `docweave.toml` in the content root.
///
/// Uses stock defaults if the file doesn't exist. A file that exists but
/// fails to parse or validate is an error — a silently ignored config is
/// worse than a failed build.
pub fn load_config(content_root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = content_root.join(CONFIG_FILENAME);
    if !path.exists() {
        return Ok(SiteConfig::default());
    }
    let raw = fs::read_to_string(&path)?;
    let config: SiteConfig = toml::from_str(&raw)?;
    config.validate()?;
    Ok(config)
}

/// A stock `docweave.toml` with every option present and documented.
/// Printed by the `gen-config` subcommand.
pub fn stock_config_toml() -> String {
    let defaults = SiteConfig::default();
    format!(
        r#"# docweave configuration
# All options are optional - the values below are the defaults.

# Directory scanned for content documents. The CLI --source flag
# takes precedence when given.
content_root = "{}"

# URL prefix prepended to every document slug. A document at
# guides/setup.mdx is published at {}/guides/setup.
base_path = "{}"

# File extensions (without dots) treated as content documents.
# Anything else in the tree is ignored.
extensions = [{}]
"#,
        defaults.content_root,
        defaults.base_path,
        defaults.base_path,
        defaults
            .extensions
            .iter()
            .map(|e| format!("\"{e}\""))
            .collect::<Vec<_>>()
            .join(", "),
    )
}
