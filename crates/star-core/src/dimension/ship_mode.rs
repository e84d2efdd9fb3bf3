use star_model::{Dimension, NormalizedRecord, ShipModeRow};

use crate::keys::{KeyLookup, assign_surrogate_keys};

pub fn build_ship_mode_dimension(
    records: &[NormalizedRecord],
) -> (Vec<ShipModeRow>, KeyLookup<&str>) {
    let assigned = assign_surrogate_keys(records.iter().map(|r| r.ship_mode.as_str()));
    let rows = assigned
        .iter()
        .map(|&(ship_mode_key, ship_mode)| ShipModeRow {
            ship_mode_key,
            ship_mode: ship_mode.to_string(),
        })
        .collect();
    (rows, KeyLookup::from_assigned(Dimension::ShipMode, &assigned))
}
