//! Fact Builder.

use std::time::Instant;

use star_model::{NormalizedRecord, Result, SalesFact};
use tracing::{info, info_span};

use crate::dimension::{DimensionLookups, customer_key, product_key};
use crate::keys::dense_keys;

/// Express one record in surrogate keys.
///
/// A missing source date stays missing; any other natural key that the
/// lookups cannot resolve is a [`star_model::StarError::Integrity`] failure.
pub fn build_fact(
    sales_id: u32,
    record: &NormalizedRecord,
    lookups: &DimensionLookups<'_>,
) -> Result<SalesFact> {
    let row_id = record.row_id;
    let order_date_key = record
        .order_date
        .map(|date| lookups.date.resolve(&date, row_id))
        .transpose()?;
    let ship_date_key = record
        .ship_date
        .map(|date| lookups.date.resolve(&date, row_id))
        .transpose()?;

    Ok(SalesFact {
        sales_id,
        row_id,
        order_id: record.order_id.clone(),
        order_date_key,
        ship_date_key,
        customer_key: lookups.customer.resolve(&customer_key(record), row_id)?,
        product_key: lookups.product.resolve(&product_key(record), row_id)?,
        region_key: lookups.region.resolve(&record.region_key(), row_id)?,
        ship_mode_key: lookups.ship_mode.resolve(&record.ship_mode.as_str(), row_id)?,
        sales_amount: record.sales,
    })
}

/// One fact row per record, `sales_id` assigned 1.. in input order.
///
/// Aborts on the first unresolvable key; no partial fact table is returned.
pub fn build_fact_table(
    records: &[NormalizedRecord],
    lookups: &DimensionLookups<'_>,
) -> Result<Vec<SalesFact>> {
    let span = info_span!("build_facts", row_count = records.len());
    let _guard = span.enter();
    let start = Instant::now();

    let facts = dense_keys(records.len())
        .zip(records)
        .map(|(sales_id, record)| build_fact(sales_id, record, lookups))
        .collect::<Result<Vec<_>>>()?;

    info!(
        row_count = facts.len(),
        duration_ms = start.elapsed().as_millis(),
        "fact table built"
    );
    Ok(facts)
}
