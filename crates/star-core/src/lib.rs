//! Star-schema construction for retail order lines.
//!
//! The build runs in one direction:
//!
//! ```text
//! RawRecord -> normalize -> dimension -> fact -> schema -> assemble
//! ```
//!
//! - **normalize**: day-first dates, postal-code cleanup, deduplication
//! - **keys**: surrogate key ordering, numbering, and lookups
//! - **dimension**: the five dimension tables and their lookups
//! - **fact**: sales facts expressed in surrogate keys
//! - **schema**: [`StarSchema`] plus integrity verification
//! - **frames** / **assemble**: Polars tables named for export and preview
//! - **fingerprint** / **cache**: explicit memoization of builds

pub mod assemble;
pub mod cache;
pub mod dimension;
pub mod fact;
pub mod fingerprint;
pub mod frames;
pub mod keys;
pub mod normalize;
pub mod schema;

pub use assemble::{NamedTable, RAW_CLEAN, SchemaFrames};
pub use cache::{CachePolicy, SchemaCache};
pub use dimension::{DimensionLookups, Dimensions, build_dimensions};
pub use fact::build_fact_table;
pub use fingerprint::Fingerprint;
pub use normalize::{NormalizeStats, NormalizedRecords, normalize_records};
pub use schema::{FACT_SALES, StarSchema, build_star_schema};
