//! Optional TOML configuration.
//!
//! ```toml
//! [input]
//! max_file_size_mb = 500
//!
//! [output]
//! star_schema_file = "star_schema_superstore.xlsx"
//! normalized_views_file = "normalized_views_superstore.xlsx"
//! summary_file = "summary_api_ready.json"   # unset: JSON goes to stdout
//! overwrite = false
//!
//! [summary]
//! top_products = 10
//! ```
//!
//! Every key is optional. Command-line flags take precedence over the file:
//! `summary --output` wins over `summary_file`, and `--force` over `overwrite`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use star_ingest::IngestOptions;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StarConfig {
    pub input: InputSettings,
    pub output: OutputSettings,
    pub summary: SummarySettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputSettings {
    /// Source files above this size are rejected.
    pub max_file_size_mb: u64,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            max_file_size_mb: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    pub star_schema_file: String,
    pub normalized_views_file: String,
    /// Summary JSON destination when `--output` is not given.
    pub summary_file: Option<String>,
    /// Replace spreadsheet bundles that already exist.
    pub overwrite: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            star_schema_file: "star_schema_superstore.xlsx".to_string(),
            normalized_views_file: "normalized_views_superstore.xlsx".to_string(),
            summary_file: None,
            overwrite: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SummarySettings {
    pub top_products: usize,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            top_products: star_report::DEFAULT_TOP_PRODUCTS,
        }
    }
}

impl StarConfig {
    /// Defaults when `path` is `None`; otherwise the parsed file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions::default()
            .with_max_file_size(self.input.max_file_size_mb.saturating_mul(1024 * 1024))
    }
}
