//! Resolution of inconsistent product names.
//!
//! The same product id can appear under differently cased or spelled names.
//! Each id gets the name it appears with most often; ties go to the
//! lexicographically smallest name. The result depends only on the counts,
//! never on row order.

use std::collections::BTreeMap;

use star_model::NormalizedRecord;

/// Pick the winning name from `(name, occurrences)` pairs.
///
/// Highest count wins; equal counts resolve to the smallest name.
pub fn rank_names<'a>(counts: impl IntoIterator<Item = (&'a str, usize)>) -> Option<&'a str> {
    counts
        .into_iter()
        .max_by(|(left_name, left_count), (right_name, right_count)| {
            left_count
                .cmp(right_count)
                .then_with(|| right_name.cmp(left_name))
        })
        .map(|(name, _)| name)
}

/// Occurrences of each name, grouped by product id.
pub fn count_product_names(
    records: &[NormalizedRecord],
) -> BTreeMap<&str, BTreeMap<&str, usize>> {
    let mut counts: BTreeMap<&str, BTreeMap<&str, usize>> = BTreeMap::new();
    for record in records {
        *counts
            .entry(record.product_id.as_str())
            .or_default()
            .entry(record.product_name.as_str())
            .or_insert(0) += 1;
    }
    counts
}

/// Resolved name for every product id in `records`.
pub fn resolve_product_names(records: &[NormalizedRecord]) -> BTreeMap<&str, &str> {
    count_product_names(records)
        .into_iter()
        .filter_map(|(product_id, names)| {
            rank_names(names).map(|name| (product_id, name))
        })
        .collect()
}
