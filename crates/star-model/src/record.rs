//! Order-line records before and after normalization.

use chrono::NaiveDate;
use serde::Deserialize;

/// Sentinel stored in place of a missing postal code.
///
/// Keeping a concrete value lets postal code take part in region keys
/// without null handling.
pub const UNKNOWN_POSTAL_CODE: &str = "Unknown";

/// Source columns every input file must provide, in source order.
pub const REQUIRED_COLUMNS: [&str; 18] = [
    "Row ID",
    "Order ID",
    "Order Date",
    "Ship Date",
    "Ship Mode",
    "Customer ID",
    "Customer Name",
    "Segment",
    "Country",
    "City",
    "State",
    "Postal Code",
    "Region",
    "Product ID",
    "Category",
    "Sub-Category",
    "Product Name",
    "Sales",
];

/// One order line exactly as it appears in the source file.
///
/// Dates stay as text here; parsing happens in the normalizer so that a bad
/// date never rejects the whole row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Row ID")]
    pub row_id: i64,
    #[serde(rename = "Order ID")]
    pub order_id: String,
    #[serde(rename = "Order Date")]
    pub order_date: String,
    #[serde(rename = "Ship Date")]
    pub ship_date: String,
    #[serde(rename = "Ship Mode")]
    pub ship_mode: String,
    #[serde(rename = "Customer ID")]
    pub customer_id: String,
    #[serde(rename = "Customer Name")]
    pub customer_name: String,
    #[serde(rename = "Segment")]
    pub segment: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Postal Code")]
    pub postal_code: Option<String>,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Product ID")]
    pub product_id: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Sub-Category")]
    pub sub_category: String,
    #[serde(rename = "Product Name")]
    pub product_name: String,
    #[serde(rename = "Sales")]
    pub sales: f64,
}

/// An order line after date parsing, postal-code cleanup, and deduplication.
///
/// Never mutated once produced; every downstream table is derived from a
/// slice of these.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub row_id: i64,
    pub order_id: String,
    /// `None` when the source value could not be parsed.
    pub order_date: Option<NaiveDate>,
    /// `None` when the source value could not be parsed.
    pub ship_date: Option<NaiveDate>,
    pub ship_mode: String,
    pub customer_id: String,
    pub customer_name: String,
    pub segment: String,
    pub country: String,
    pub city: String,
    pub state: String,
    /// Canonical postal code, or [`UNKNOWN_POSTAL_CODE`].
    pub postal_code: String,
    pub region: String,
    pub product_id: String,
    pub category: String,
    pub sub_category: String,
    pub product_name: String,
    pub sales: f64,
}

impl NormalizedRecord {
    /// Geographic natural key: (country, region, state, city, postal code).
    pub fn region_key(&self) -> (&str, &str, &str, &str, &str) {
        (
            &self.country,
            &self.region,
            &self.state,
            &self.city,
            &self.postal_code,
        )
    }
}
