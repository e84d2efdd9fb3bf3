//! Explicit memoization of star-schema builds.
//!
//! Builds are deterministic, so a schema can be reused for any record set
//! with the same [`Fingerprint`]. The cache is an ordinary value owned by
//! the caller; there is no process-wide state.

use std::collections::HashMap;
use std::sync::Arc;

use star_model::{NormalizedRecord, Result};
use tracing::debug;

use crate::fingerprint::Fingerprint;
use crate::schema::{StarSchema, build_star_schema};

/// Whether a lookup may be served from the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// Return a cached schema when the fingerprint matches; store new builds.
    #[default]
    Reuse,
    /// Always rebuild; the cache is neither read nor written.
    Bypass,
}

/// Built schemas keyed by the fingerprint of their input.
#[derive(Debug, Default)]
pub struct SchemaCache {
    entries: HashMap<Fingerprint, Arc<StarSchema>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached schema for `records`, building and storing it on a miss.
    ///
    /// Build errors are returned and nothing is stored.
    pub fn get_or_build(
        &mut self,
        records: &[NormalizedRecord],
        policy: CachePolicy,
    ) -> Result<Arc<StarSchema>> {
        if policy == CachePolicy::Bypass {
            debug!("schema cache bypassed");
            return build_star_schema(records).map(Arc::new);
        }

        let fingerprint = Fingerprint::of_records(records);
        if let Some(schema) = self.entries.get(&fingerprint) {
            debug!(%fingerprint, "schema cache hit");
            return Ok(Arc::clone(schema));
        }

        debug!(%fingerprint, "schema cache miss");
        let schema = Arc::new(build_star_schema(records)?);
        self.entries.insert(fingerprint, Arc::clone(&schema));
        Ok(schema)
    }

    pub fn get(&self, fingerprint: &Fingerprint) -> Option<Arc<StarSchema>> {
        self.entries.get(fingerprint).cloned()
    }

    /// Drop one entry. Returns whether it was present.
    pub fn invalidate(&mut self, fingerprint: &Fingerprint) -> bool {
        self.entries.remove(fingerprint).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn records(sales: f64) -> Vec<NormalizedRecord> {
        vec![NormalizedRecord {
            row_id: 1,
            order_id: "O".to_string(),
            order_date: NaiveDate::from_ymd_opt(2020, 1, 1),
            ship_date: NaiveDate::from_ymd_opt(2020, 1, 3),
            ship_mode: "Same Day".to_string(),
            customer_id: "C".to_string(),
            customer_name: "N".to_string(),
            segment: "S".to_string(),
            country: "US".to_string(),
            city: "X".to_string(),
            state: "Y".to_string(),
            postal_code: "1".to_string(),
            region: "R".to_string(),
            product_id: "P".to_string(),
            category: "C".to_string(),
            sub_category: "SC".to_string(),
            product_name: "PN".to_string(),
            sales,
        }]
    }

    #[test]
    fn reuses_identical_input() {
        let mut cache = SchemaCache::new();
        let first = cache.get_or_build(&records(1.0), CachePolicy::Reuse).unwrap();
        let second = cache.get_or_build(&records(1.0), CachePolicy::Reuse).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        cache.get_or_build(&records(2.0), CachePolicy::Reuse).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn bypass_rebuilds_without_storing() {
        let mut cache = SchemaCache::new();
        let bypassed = cache.get_or_build(&records(1.0), CachePolicy::Bypass).unwrap();
        assert!(cache.is_empty());

        let cached = cache.get_or_build(&records(1.0), CachePolicy::Reuse).unwrap();
        assert!(!Arc::ptr_eq(&bypassed, &cached));
        assert_eq!(*bypassed, *cached);
    }

    #[test]
    fn invalidate_and_clear() {
        let mut cache = SchemaCache::new();
        let input = records(1.0);
        let fingerprint = Fingerprint::of_records(&input);
        cache.get_or_build(&input, CachePolicy::Reuse).unwrap();
        assert!(cache.get(&fingerprint).is_some());

        assert!(cache.invalidate(&fingerprint));
        assert!(!cache.invalidate(&fingerprint));
        assert!(cache.get(&fingerprint).is_none());

        cache.get_or_build(&input, CachePolicy::Reuse).unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn failed_build_is_not_cached() {
        let mut cache = SchemaCache::new();
        let mut input = records(1.0);
        input[0].order_date = None;
        input[0].ship_date = None;
        assert!(cache.get_or_build(&input, CachePolicy::Reuse).is_err());
        assert!(cache.is_empty());
    }
}
