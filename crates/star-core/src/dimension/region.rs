use star_model::{Dimension, NormalizedRecord, RegionRow};

use crate::keys::{KeyLookup, assign_surrogate_keys};

/// `(country, region, state, city, postal_code)`.
pub type RegionKey<'a> = (&'a str, &'a str, &'a str, &'a str, &'a str);

pub fn build_region_dimension(
    records: &[NormalizedRecord],
) -> (Vec<RegionRow>, KeyLookup<RegionKey<'_>>) {
    let assigned = assign_surrogate_keys(records.iter().map(NormalizedRecord::region_key));
    let rows = assigned
        .iter()
        .map(
            |&(region_key, (country, region, state, city, postal_code))| RegionRow {
                region_key,
                country: country.to_string(),
                region: region.to_string(),
                state: state.to_string(),
                city: city.to_string(),
                postal_code: postal_code.to_string(),
            },
        )
        .collect();
    (rows, KeyLookup::from_assigned(Dimension::Region, &assigned))
}
