//! Delimited-text reading into [`RawRecord`]s.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use star_model::{REQUIRED_COLUMNS, RawRecord};

use crate::error::{IngestError, Result};

/// Maximum file size for source loading (500 MB default).
pub const MAX_SOURCE_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Options controlling how a source file is read.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Files larger than this are rejected before parsing.
    pub max_file_size: u64,
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_file_size: MAX_SOURCE_FILE_SIZE,
            delimiter: b',',
        }
    }
}

impl IngestOptions {
    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Check file size against a limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata =
        std::fs::metadata(path).map_err(|e| IngestError::open(path.to_path_buf(), e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| IngestError::open(path.to_path_buf(), e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    // UTF-8 BOM is acceptable (stripped from the first header)
    Ok(())
}

/// Read every order line from `path` with default options.
pub fn read_raw_records(path: &Path) -> Result<Vec<RawRecord>> {
    read_raw_records_with_options(path, IngestOptions::default())
}

/// Read every order line from `path`.
pub fn read_raw_records_with_options(
    path: &Path,
    options: IngestOptions,
) -> Result<Vec<RawRecord>> {
    check_file_size_with_limit(path, options.max_file_size)?;
    validate_encoding(path)?;
    let file = File::open(path).map_err(|e| IngestError::open(path.to_path_buf(), e))?;
    let records = read_raw_records_from_reader(file, path, options.delimiter)?;
    tracing::info!(
        path = %path.display(),
        row_count = records.len(),
        "read source records"
    );
    Ok(records)
}

/// Read order lines from any reader. `source` names the input in errors.
pub fn read_raw_records_from_reader<R: Read>(
    reader: R,
    source: &Path,
    delimiter: u8,
) -> Result<Vec<RawRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .trim(Trim::Headers)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| parse_error(source, &e))?
        .clone();
    let headers: StringRecord = headers.iter().map(normalize_header).collect();
    if headers.iter().all(str::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: source.to_path_buf(),
        });
    }
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|required| !headers.iter().any(|header| header == **required))
    {
        return Err(IngestError::MissingColumn {
            column: (*missing).to_string(),
            path: source.to_path_buf(),
        });
    }
    reader.set_headers(headers);

    let mut records = Vec::new();
    for result in reader.deserialize::<RawRecord>() {
        let record = result.map_err(|e| parse_error(source, &e))?;
        records.push(record);
    }
    Ok(records)
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_error(source: &Path, error: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: source.to_path_buf(),
        line: error.position().map_or(0, csv::Position::line),
        message: error.to_string(),
    }
}
