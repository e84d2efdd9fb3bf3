use star_model::{Dimension, NormalizedRecord, ProductRow};

use super::product_name::resolve_product_names;
use crate::keys::{KeyLookup, assign_surrogate_keys};

/// `(product_id, category, sub_category)`.
pub type ProductKey<'a> = (&'a str, &'a str, &'a str);

pub fn product_key(record: &NormalizedRecord) -> ProductKey<'_> {
    (
        record.product_id.as_str(),
        record.category.as_str(),
        record.sub_category.as_str(),
    )
}

/// One row per distinct product combination, keyed in product id order.
///
/// The product name is not part of the natural key; each row carries the
/// name resolved for its product id.
pub fn build_product_dimension(
    records: &[NormalizedRecord],
) -> (Vec<ProductRow>, KeyLookup<ProductKey<'_>>) {
    let names = resolve_product_names(records);
    let assigned = assign_surrogate_keys(records.iter().map(product_key));
    let rows = assigned
        .iter()
        .map(|&(product_key, (id, category, sub_category))| ProductRow {
            product_key,
            product_id: id.to_string(),
            category: category.to_string(),
            sub_category: sub_category.to_string(),
            // Names are counted over the same records, so every id is present.
            product_name: names.get(id).copied().unwrap_or_default().to_string(),
        })
        .collect();
    (rows, KeyLookup::from_assigned(Dimension::Product, &assigned))
}
