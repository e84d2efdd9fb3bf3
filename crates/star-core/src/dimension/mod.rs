//! Dimension Builder.
//!
//! Five independent derivations over the same normalized records. Each
//! returns its rows plus a natural-key lookup that the fact builder uses to
//! translate records into surrogate keys. Lookups borrow their keys from the
//! records, so they live no longer than the record slice.

mod customer;
mod date;
mod product;
pub mod product_name;
mod region;
mod ship_mode;

use std::time::Instant;

use chrono::NaiveDate;
use star_model::{
    CustomerRow, DateRow, NormalizedRecord, ProductRow, RegionRow, Result, ShipModeRow,
};
use tracing::{debug, info, info_span};

use crate::keys::KeyLookup;

pub use customer::{CustomerKey, build_customer_dimension, customer_key};
pub use date::{build_date_dimension, date_key, date_range, date_row};
pub use product::{ProductKey, build_product_dimension, product_key};
pub use region::{RegionKey, build_region_dimension};
pub use ship_mode::build_ship_mode_dimension;

/// Rows of all five dimension tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimensions {
    pub date: Vec<DateRow>,
    pub customer: Vec<CustomerRow>,
    pub product: Vec<ProductRow>,
    pub region: Vec<RegionRow>,
    pub ship_mode: Vec<ShipModeRow>,
}

/// Natural key -> surrogate key maps for all five dimensions.
#[derive(Debug, Clone)]
pub struct DimensionLookups<'a> {
    pub date: KeyLookup<NaiveDate, i32>,
    pub customer: KeyLookup<CustomerKey<'a>>,
    pub product: KeyLookup<ProductKey<'a>>,
    pub region: KeyLookup<RegionKey<'a>>,
    pub ship_mode: KeyLookup<&'a str>,
}

/// Build every dimension table and its lookup.
///
/// Fails with [`star_model::StarError::NoValidDates`] when no order or ship
/// date is present anywhere in `records`.
pub fn build_dimensions(records: &[NormalizedRecord]) -> Result<(Dimensions, DimensionLookups<'_>)> {
    let span = info_span!("build_dimensions", row_count = records.len());
    let _guard = span.enter();
    let start = Instant::now();

    let (date, date_lookup) = build_date_dimension(records)?;
    let (customer, customer_lookup) = build_customer_dimension(records);
    let (product, product_lookup) = build_product_dimension(records);
    let (region, region_lookup) = build_region_dimension(records);
    let (ship_mode, ship_mode_lookup) = build_ship_mode_dimension(records);

    debug!(
        dim_date = date.len(),
        dim_customer = customer.len(),
        dim_product = product.len(),
        dim_region = region.len(),
        dim_ship_mode = ship_mode.len(),
        "dimension sizes"
    );
    info!(
        duration_ms = start.elapsed().as_millis(),
        "dimensions built"
    );

    Ok((
        Dimensions {
            date,
            customer,
            product,
            region,
            ship_mode,
        },
        DimensionLookups {
            date: date_lookup,
            customer: customer_lookup,
            product: product_lookup,
            region: region_lookup,
            ship_mode: ship_mode_lookup,
        },
    ))
}
