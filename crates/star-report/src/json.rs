//! Summary JSON export.

use std::path::Path;

use star_model::SalesSummary;
use tracing::info;

use crate::atomic::write_atomic;
use crate::error::Result;

/// Pretty-printed JSON for a summary.
pub fn summary_json(summary: &SalesSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// Write a summary as pretty-printed UTF-8 JSON.
pub fn write_summary_json(summary: &SalesSummary, path: &Path) -> Result<()> {
    let mut json = summary_json(summary)?;
    json.push('\n');
    write_atomic(path, json.as_bytes())?;
    info!(path = %path.display(), "summary written");
    Ok(())
}
