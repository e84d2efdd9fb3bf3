//! Error types for the star-schema build.

use thiserror::Error;

use crate::dimension::Dimension;

/// Errors that abort a star-schema build.
///
/// Row-level problems (unparseable dates) never surface here; they are
/// absorbed by the normalizer as missing values.
#[derive(Debug, Error)]
pub enum StarError {
    /// No order or ship date in the input could be parsed, so the date
    /// dimension has no range.
    #[error("no valid order or ship date found in {row_count} records")]
    NoValidDates { row_count: usize },

    /// A fact row references a natural key that its dimension does not contain.
    #[error("{dimension} has no surrogate key for '{natural_key}' (row id {row_id})")]
    Integrity {
        dimension: Dimension,
        natural_key: String,
        row_id: i64,
    },

    /// A table's surrogate keys are not the dense sequence `1..=N`.
    #[error("{table} surrogate key at position {position} is {found}, expected {expected}")]
    SurrogateKeyGap {
        table: &'static str,
        position: usize,
        expected: u32,
        found: u32,
    },

    /// Date keys are not strictly increasing.
    #[error("date key {found} does not follow {previous}")]
    DateKeyOrder { previous: i32, found: i32 },

    /// Failed to materialize a table as a DataFrame.
    #[error("DataFrame operation failed: {message}")]
    Frame { message: String },
}

impl From<polars::prelude::PolarsError> for StarError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Frame {
            message: err.to_string(),
        }
    }
}

/// Result type for star-schema operations.
pub type Result<T> = std::result::Result<T, StarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrity_display() {
        let err = StarError::Integrity {
            dimension: Dimension::Customer,
            natural_key: "CG-12520".to_string(),
            row_id: 7,
        };
        assert_eq!(
            err.to_string(),
            "dim_customer has no surrogate key for 'CG-12520' (row id 7)"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("sales".into());
        let err: StarError = polars_err.into();
        assert!(matches!(err, StarError::Frame { .. }));
    }
}
