//! Reporting over normalized retail records and the star schema.
//!
//! - **summary**: totals, category/segment/region rollups, top products,
//!   monthly trend, KPIs
//! - **filter**: dashboard filters and the choices they offer
//! - **xlsx** / **json**: spreadsheet bundles and summary JSON, written
//!   atomically

mod atomic;
pub mod error;
pub mod filter;
pub mod json;
pub mod summary;
pub mod values;
pub mod xlsx;

pub use atomic::write_atomic;
pub use error::{ExportError, Result};
pub use filter::{FilterOptions, RecordFilter};
pub use json::{summary_json, write_summary_json};
pub use summary::{
    DEFAULT_TOP_PRODUCTS, kpis, sales_by_category, sales_by_region, sales_by_segment, summarize,
};
pub use values::any_to_string;
pub use xlsx::{render_workbook, write_workbook};
