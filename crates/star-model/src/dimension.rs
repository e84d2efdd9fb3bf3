//! Dimension row types.

use std::fmt;

use chrono::NaiveDate;

/// Identifies one of the five dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Date,
    Customer,
    Product,
    Region,
    ShipMode,
}

impl Dimension {
    /// Stable table name used for sheets and previews.
    pub fn table_name(self) -> &'static str {
        match self {
            Dimension::Date => "dim_date",
            Dimension::Customer => "dim_customer",
            Dimension::Product => "dim_product",
            Dimension::Region => "dim_region",
            Dimension::ShipMode => "dim_ship_mode",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// One calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRow {
    /// `YYYYMMDD` as an integer.
    pub date_key: i32,
    pub full_date: NaiveDate,
    pub day: u32,
    pub month: u32,
    pub month_name: String,
    pub quarter: u32,
    pub year: i32,
    /// ISO 8601 week number.
    pub week_of_year: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRow {
    pub customer_key: u32,
    pub customer_id: String,
    pub customer_name: String,
    pub segment: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub product_key: u32,
    pub product_id: String,
    pub category: String,
    pub sub_category: String,
    /// Most frequent name observed for `product_id`.
    pub product_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRow {
    pub region_key: u32,
    pub country: String,
    pub region: String,
    pub state: String,
    pub city: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipModeRow {
    pub ship_mode_key: u32,
    pub ship_mode: String,
}
