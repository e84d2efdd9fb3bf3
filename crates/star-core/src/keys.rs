//! Surrogate key assignment and natural-key lookups.
//!
//! Keys are assigned by sorting distinct natural keys ascending and
//! enumerating them from 1. Ordering ([`natural_order`]) and numbering
//! ([`dense_keys`]) are separate so each can be tested on its own; field
//! selection lives with each dimension.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::Debug;

use star_model::{Dimension, Result, StarError};

/// Ordering policy for natural keys: plain ascending comparison, field by
/// field for tuples.
pub fn natural_order<K: Ord>(left: &K, right: &K) -> Ordering {
    left.cmp(right)
}

/// Surrogate keys `1..=len`.
pub fn dense_keys(len: usize) -> impl Iterator<Item = u32> {
    (1u32..).take(len)
}

/// Distinct natural keys in [`natural_order`].
pub fn distinct_sorted<K: Ord>(keys: impl IntoIterator<Item = K>) -> Vec<K> {
    let mut keys: Vec<K> = keys.into_iter().collect();
    keys.sort_by(natural_order);
    keys.dedup();
    keys
}

/// Pair every distinct natural key with its surrogate key.
pub fn assign_surrogate_keys<K: Ord>(keys: impl IntoIterator<Item = K>) -> Vec<(u32, K)> {
    let sorted = distinct_sorted(keys);
    dense_keys(sorted.len()).zip(sorted).collect()
}

/// Natural key -> surrogate key map for one dimension.
///
/// A miss in [`KeyLookup::resolve`] is an integrity failure, never a null key.
#[derive(Debug, Clone)]
pub struct KeyLookup<K, V = u32> {
    dimension: Dimension,
    keys: BTreeMap<K, V>,
}

impl<K: Ord + Debug, V: Copy> KeyLookup<K, V> {
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            keys: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.keys.insert(key, value);
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.keys.get(key).copied()
    }

    /// Surrogate key for `key`, or [`StarError::Integrity`] naming the
    /// offending fact row.
    pub fn resolve(&self, key: &K, row_id: i64) -> Result<V> {
        self.get(key).ok_or_else(|| StarError::Integrity {
            dimension: self.dimension,
            natural_key: format!("{key:?}"),
            row_id,
        })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<K: Ord + Debug> KeyLookup<K, u32> {
    /// Build from [`assign_surrogate_keys`] output.
    pub fn from_assigned(dimension: Dimension, assigned: &[(u32, K)]) -> Self
    where
        K: Clone,
    {
        let mut lookup = Self::new(dimension);
        for (surrogate, natural) in assigned {
            lookup.insert(natural.clone(), *surrogate);
        }
        lookup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_keys_start_at_one() {
        assert_eq!(dense_keys(4).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(dense_keys(0).count(), 0);
    }

    #[test]
    fn natural_order_is_lexicographic_per_field() {
        assert_eq!(natural_order(&("A", "z"), &("B", "a")), Ordering::Less);
        assert_eq!(natural_order(&("A", "b"), &("A", "a")), Ordering::Greater);
        assert_eq!(natural_order(&"Same Day", &"Same Day"), Ordering::Equal);
    }

    #[test]
    fn assignment_is_independent_of_input_order() {
        let forward = assign_surrogate_keys(["Standard Class", "First Class", "Same Day"]);
        let reverse = assign_surrogate_keys(["Same Day", "First Class", "Standard Class"]);
        assert_eq!(forward, reverse);
        assert_eq!(
            forward,
            vec![(1, "First Class"), (2, "Same Day"), (3, "Standard Class")]
        );
    }

    #[test]
    fn duplicates_collapse() {
        let assigned = assign_surrogate_keys(["b", "a", "b", "a", "c"]);
        assert_eq!(assigned, vec![(1, "a"), (2, "b"), (3, "c")]);
    }

    #[test]
    fn resolve_miss_is_integrity_error() {
        let lookup = KeyLookup::from_assigned(Dimension::ShipMode, &[(1, "First Class")]);
        assert_eq!(lookup.resolve(&"First Class", 1).unwrap(), 1);
        let err = lookup.resolve(&"Teleport", 42).unwrap_err();
        assert!(matches!(
            err,
            StarError::Integrity {
                dimension: Dimension::ShipMode,
                row_id: 42,
                ..
            }
        ));
    }
}
