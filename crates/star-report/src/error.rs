//! Export error types.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while producing an output file.
///
/// A failed export never leaves a partially written target: content is
/// rendered in memory first and only renamed into place once fully synced.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The temp file was written but could not be renamed over the target.
    #[error("failed to move {temp_path} into place at {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write sheet '{sheet}': {message}")]
    Workbook { sheet: String, message: String },

    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read table: {0}")]
    Frame(#[from] polars::prelude::PolarsError),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
