//! Conversion of Polars values into spreadsheet cells.

use polars::prelude::AnyValue;

/// What a single table value becomes in a worksheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Blank,
}

/// Numbers stay numbers, text stays text, and nulls become blank cells.
pub fn any_to_cell(value: AnyValue<'_>) -> Cell {
    match value {
        AnyValue::Null => Cell::Blank,
        AnyValue::Int8(v) => Cell::Number(f64::from(v)),
        AnyValue::Int16(v) => Cell::Number(f64::from(v)),
        AnyValue::Int32(v) => Cell::Number(f64::from(v)),
        AnyValue::Int64(v) => Cell::Number(v as f64),
        AnyValue::UInt8(v) => Cell::Number(f64::from(v)),
        AnyValue::UInt16(v) => Cell::Number(f64::from(v)),
        AnyValue::UInt32(v) => Cell::Number(f64::from(v)),
        AnyValue::UInt64(v) => Cell::Number(v as f64),
        AnyValue::Float32(v) => Cell::Number(f64::from(v)),
        AnyValue::Float64(v) if v.is_finite() => Cell::Number(v),
        AnyValue::Float64(_) => Cell::Blank,
        AnyValue::String(s) => Cell::Text(s.to_string()),
        AnyValue::StringOwned(s) => Cell::Text(s.to_string()),
        AnyValue::Boolean(b) => Cell::Text(b.to_string()),
        other => Cell::Text(other.to_string()),
    }
}

/// Plain-text rendering used by terminal previews. Blank for nulls; floats
/// without trailing zeros.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match any_to_cell(value) {
        Cell::Blank => String::new(),
        Cell::Number(v) => format_numeric(v),
        Cell::Text(s) => s,
    }
}

/// Format a number without trailing zeros (`261.96`, `3`, `0.5`).
pub fn format_numeric(value: f64) -> String {
    let formatted = format!("{value}");
    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}
