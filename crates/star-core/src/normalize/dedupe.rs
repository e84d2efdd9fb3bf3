//! Removal of logical duplicate order lines.
//!
//! Two records are duplicates when every field except `row_id` matches. If a
//! field is ever added to [`NormalizedRecord`], [`DuplicateKey`] must be
//! extended by hand; the destructuring in [`duplicate_key`] fails to compile
//! until it is.

use std::collections::HashSet;

use chrono::NaiveDate;
use star_model::NormalizedRecord;

#[derive(Debug, PartialEq, Eq, Hash)]
struct DuplicateKey<'a> {
    order_id: &'a str,
    order_date: Option<NaiveDate>,
    ship_date: Option<NaiveDate>,
    ship_mode: &'a str,
    customer_id: &'a str,
    customer_name: &'a str,
    segment: &'a str,
    country: &'a str,
    city: &'a str,
    state: &'a str,
    postal_code: &'a str,
    region: &'a str,
    product_id: &'a str,
    category: &'a str,
    sub_category: &'a str,
    product_name: &'a str,
    sales: u64,
}

fn duplicate_key(record: &NormalizedRecord) -> DuplicateKey<'_> {
    let NormalizedRecord {
        row_id: _,
        order_id,
        order_date,
        ship_date,
        ship_mode,
        customer_id,
        customer_name,
        segment,
        country,
        city,
        state,
        postal_code,
        region,
        product_id,
        category,
        sub_category,
        product_name,
        sales,
    } = record;
    DuplicateKey {
        order_id,
        order_date: *order_date,
        ship_date: *ship_date,
        ship_mode,
        customer_id,
        customer_name,
        segment,
        country,
        city,
        state,
        postal_code,
        region,
        product_id,
        category,
        sub_category,
        product_name,
        sales: sales_bits(*sales),
    }
}

/// Bit pattern used for equality: `-0.0` equals `0.0` and all NaNs are equal.
fn sales_bits(value: f64) -> u64 {
    if value == 0.0 {
        0
    } else if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        value.to_bits()
    }
}

/// Keep the first occurrence of every logical record, in input order.
///
/// Returns the surviving records and the number dropped.
pub fn dedupe_records(records: Vec<NormalizedRecord>) -> (Vec<NormalizedRecord>, usize) {
    let keep: Vec<bool> = {
        let mut seen = HashSet::with_capacity(records.len());
        records
            .iter()
            .map(|record| seen.insert(duplicate_key(record)))
            .collect()
    };
    let removed = keep.iter().filter(|kept| !**kept).count();
    let kept = records
        .into_iter()
        .zip(keep)
        .filter_map(|(record, kept)| kept.then_some(record))
        .collect();
    (kept, removed)
}
