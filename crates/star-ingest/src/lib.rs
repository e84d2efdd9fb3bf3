//! Order-line ingestion.
//!
//! Reads a delimited text file with the retail order columns into
//! [`star_model::RawRecord`]s. Values are kept as close to the source as
//! possible; dates and postal codes are cleaned later by the normalizer.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use star_ingest::read_raw_records;
//!
//! let records = read_raw_records(Path::new("data/train.csv"))?;
//! ```

mod error;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Source Reading ===
pub use reader::{
    IngestOptions, MAX_SOURCE_FILE_SIZE, check_file_size_with_limit, read_raw_records,
    read_raw_records_from_reader, read_raw_records_with_options, validate_encoding,
};
