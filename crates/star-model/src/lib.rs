//! Data model for the retail star schema.
//!
//! - **record**: raw order lines as read from the source file and their
//!   normalized counterparts
//! - **dimension**: the five dimension row types and the [`Dimension`] tag
//! - **fact**: the sales fact row
//! - **summary**: serializable aggregation results
//! - **error**: the [`StarError`] taxonomy shared by the build pipeline

pub mod dimension;
pub mod error;
pub mod fact;
pub mod record;
pub mod summary;

pub use dimension::{CustomerRow, DateRow, Dimension, ProductRow, RegionRow, ShipModeRow};
pub use error::{Result, StarError};
pub use fact::SalesFact;
pub use record::{NormalizedRecord, RawRecord, REQUIRED_COLUMNS, UNKNOWN_POSTAL_CODE};
pub use summary::{CategoryTotals, Kpis, MonthTotal, ProductTotal, SalesSummary};
