use star_model::{CustomerRow, Dimension, NormalizedRecord};

use crate::keys::{KeyLookup, assign_surrogate_keys};

/// `(customer_id, customer_name, segment)`.
pub type CustomerKey<'a> = (&'a str, &'a str, &'a str);

pub fn customer_key(record: &NormalizedRecord) -> CustomerKey<'_> {
    (
        record.customer_id.as_str(),
        record.customer_name.as_str(),
        record.segment.as_str(),
    )
}

/// One row per distinct customer combination, keyed in customer id order.
pub fn build_customer_dimension(
    records: &[NormalizedRecord],
) -> (Vec<CustomerRow>, KeyLookup<CustomerKey<'_>>) {
    let assigned = assign_surrogate_keys(records.iter().map(customer_key));
    let rows = assigned
        .iter()
        .map(|&(customer_key, (id, name, segment))| CustomerRow {
            customer_key,
            customer_id: id.to_string(),
            customer_name: name.to_string(),
            segment: segment.to_string(),
        })
        .collect();
    (rows, KeyLookup::from_assigned(Dimension::Customer, &assigned))
}
