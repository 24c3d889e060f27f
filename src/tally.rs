//! Insertion-ordered counters.
//!
//! `Tally` is the map type behind every count in a match record. Lookups
//! of missing keys return 0, and iteration follows first-insertion order,
//! which is the order the log mentioned each key in.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// An insertion-ordered map from key to signed count.
///
/// Counts are `i64` because net kill scores go negative once world kills
/// are subtracted.
///
/// # Examples
///
/// ```rust
/// use fraglog::Tally;
///
/// let mut causes: Tally<String> = Tally::new();
/// causes.increment("MOD_TRIGGER_HURT".to_string());
/// causes.increment("MOD_ROCKET".to_string());
/// causes.increment("MOD_TRIGGER_HURT".to_string());
///
/// assert_eq!(causes.get("MOD_TRIGGER_HURT"), 2);
/// assert_eq!(causes.get("MOD_FALLING"), 0);
/// assert_eq!(causes.total(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Tally<K> {
    entries: Vec<(K, i64)>,
    index: HashMap<K, usize>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Hash + Eq + Clone> Tally<K> {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to the count for `key`, inserting it at 0 first if absent.
    ///
    /// Returns the new count.
    pub fn add(&mut self, key: K, delta: i64) -> i64 {
        let slot = self.slot(key);
        self.entries[slot].1 += delta;
        self.entries[slot].1
    }

    /// Add one to the count for `key`.
    pub fn increment(&mut self, key: K) -> i64 {
        self.add(key, 1)
    }

    /// Overwrite the count for `key`.
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn set(&mut self, key: K, value: i64) {
        let slot = self.slot(key);
        self.entries[slot].1 = value;
    }

    /// Count for `key`, or 0 when the key was never inserted.
    pub fn get<Q>(&self, key: &Q) -> i64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    /// Whether `key` has been inserted, regardless of its count.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Iterate over `(key, count)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, i64)> + '_ {
        self.entries.iter().map(|(key, count)| (key, *count))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key has been inserted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> i64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Remove every key.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    fn slot(&mut self, key: K) -> usize {
        if let Some(&slot) = self.index.get(&key) {
            return slot;
        }
        let slot = self.entries.len();
        self.index.insert(key.clone(), slot);
        self.entries.push((key, 0));
        slot
    }
}

/// Two tallies are equal when they hold the same keys, counts, and order.
impl<K: PartialEq> PartialEq for Tally<K> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq> Eq for Tally<K> {}

/// Counts occurrences: each item adds one to its key.
impl<K: Hash + Eq + Clone> FromIterator<K> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for key in iter {
            tally.increment(key);
        }
        tally
    }
}

/// Serialized as a JSON-style map in insertion order.
impl<K: Serialize> Serialize for Tally<K> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_defaults_to_zero() {
        let tally: Tally<String> = Tally::new();
        assert_eq!(tally.get("anything"), 0);
        assert!(!tally.contains_key("anything"));
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let tally: Tally<&str> = ["b", "a", "b", "c", "a", "b"].into_iter().collect();
        let keys: Vec<_> = tally.keys().copied().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(tally.get("b"), 3);
        assert_eq!(tally.get("a"), 2);
        assert_eq!(tally.get("c"), 1);
    }

    #[test]
    fn test_set_keeps_position() {
        let mut tally: Tally<&str> = ["x", "y"].into_iter().collect();
        tally.set("x", 0);
        tally.set("z", 5);
        let pairs: Vec<_> = tally.iter().map(|(k, v)| (*k, v)).collect();
        assert_eq!(pairs, vec![("x", 0), ("y", 1), ("z", 5)]);
    }

    #[test]
    fn test_add_allows_negative() {
        let mut tally = Tally::new();
        assert_eq!(tally.add("world", -3), -3);
        assert_eq!(tally.add("world", 1), -2);
        assert_eq!(tally.total(), -2);
    }

    #[test]
    fn test_clear() {
        let mut tally: Tally<&str> = ["a", "b"].into_iter().collect();
        tally.clear();
        assert!(tally.is_empty());
        assert_eq!(tally.get("a"), 0);
        tally.increment("b");
        assert_eq!(tally.keys().count(), 1);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let ab: Tally<&str> = ["a", "b"].into_iter().collect();
        let ba: Tally<&str> = ["b", "a"].into_iter().collect();
        assert_ne!(ab, ba);
        assert_eq!(ab, ["a", "b"].into_iter().collect::<Tally<&str>>());
    }

    #[test]
    fn test_serializes_in_insertion_order() {
        let tally: Tally<&str> = ["zeta", "alpha", "zeta"].into_iter().collect();
        let json = serde_json::to_string(&tally).unwrap();
        assert_eq!(json, r#"{"zeta":2,"alpha":1}"#);
    }
}
