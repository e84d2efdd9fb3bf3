//! Content fingerprint of a normalized record set.

use std::fmt;

use chrono::NaiveDate;
use sha2::{Digest, Sha256};
use star_model::NormalizedRecord;

/// SHA-256 over every field of every record, in order.
///
/// Strings are length-prefixed and optional dates carry a presence byte, so
/// distinct record sets cannot collide by shifting bytes between fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn of_records(records: &[NormalizedRecord]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((records.len() as u64).to_le_bytes());
        for record in records {
            hash_record(&mut hasher, record);
        }
        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn hash_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn hash_date(hasher: &mut Sha256, value: Option<NaiveDate>) {
    match value {
        Some(date) => {
            hasher.update([1u8]);
            hasher.update(date.to_string().as_bytes());
        }
        None => hasher.update([0u8]),
    }
}

fn hash_record(hasher: &mut Sha256, record: &NormalizedRecord) {
    hasher.update(record.row_id.to_le_bytes());
    hash_str(hasher, &record.order_id);
    hash_date(hasher, record.order_date);
    hash_date(hasher, record.ship_date);
    for value in [
        &record.ship_mode,
        &record.customer_id,
        &record.customer_name,
        &record.segment,
        &record.country,
        &record.city,
        &record.state,
        &record.postal_code,
        &record.region,
        &record.product_id,
        &record.category,
        &record.sub_category,
        &record.product_name,
    ] {
        hash_str(hasher, value);
    }
    hasher.update(record.sales.to_bits().to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(city: &str, state: &str) -> NormalizedRecord {
        NormalizedRecord {
            row_id: 1,
            order_id: "O".to_string(),
            order_date: NaiveDate::from_ymd_opt(2020, 1, 1),
            ship_date: None,
            ship_mode: "Same Day".to_string(),
            customer_id: "C".to_string(),
            customer_name: "N".to_string(),
            segment: "S".to_string(),
            country: "US".to_string(),
            city: city.to_string(),
            state: state.to_string(),
            postal_code: "Unknown".to_string(),
            region: "R".to_string(),
            product_id: "P".to_string(),
            category: "C".to_string(),
            sub_category: "SC".to_string(),
            product_name: "PN".to_string(),
            sales: 1.0,
        }
    }

    #[test]
    fn stable_for_equal_input() {
        let a = Fingerprint::of_records(&[record("Austin", "Texas")]);
        let b = Fingerprint::of_records(&[record("Austin", "Texas")]);
        assert_eq!(a, b);
        assert_eq!(a.to_hex().len(), 64);
        assert_eq!(a.to_string(), a.to_hex());
    }

    #[test]
    fn field_boundaries_matter() {
        let a = Fingerprint::of_records(&[record("AustinT", "exas")]);
        let b = Fingerprint::of_records(&[record("Austin", "Texas")]);
        assert_ne!(a, b);
    }

    #[test]
    fn order_matters() {
        let first = record("A", "B");
        let mut second = record("A", "B");
        second.row_id = 2;
        let forward = Fingerprint::of_records(&[first.clone(), second.clone()]);
        let reverse = Fingerprint::of_records(&[second, first]);
        assert_ne!(forward, reverse);
    }
}
