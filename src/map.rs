//! Ordered document type for hstore data.
//!
//! This module provides [`HstoreMap`], a wrapper around [`IndexMap`] that
//! maps string keys to nullable string values while preserving insertion
//! order. hstore text carries no semantic ordering, but keeping the order
//! end-to-end makes serialization deterministic and round-trips testable.
//!
//! Duplicate keys in parsed input merge here with last-value-wins; use
//! [`crate::parse`] when duplicates must be observed.
//!
//! ## Examples
//!
//! ```rust
//! use pghstore::HstoreMap;
//!
//! let mut map = HstoreMap::new();
//! map.insert("name".to_string(), Some("Alice".to_string()));
//! map.insert("nickname".to_string(), None);
//!
//! assert_eq!(pghstore::to_string(&map).unwrap(), r#""name"=>"Alice","nickname"=>NULL"#);
//! ```

use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// An insertion-ordered map of string keys to nullable string values.
///
/// A `None` value is the SQL `NULL` sentinel, distinct from `Some(String::new())`.
///
/// # Examples
///
/// ```rust
/// use pghstore::HstoreMap;
///
/// let mut map = HstoreMap::new();
/// map.insert("first".to_string(), Some("1".to_string()));
/// map.insert("second".to_string(), None);
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HstoreMap(IndexMap<String, Option<String>>);

impl HstoreMap {
    /// Creates an empty `HstoreMap`.
    #[must_use]
    pub fn new() -> Self {
        HstoreMap(IndexMap::new())
    }

    /// Creates an empty `HstoreMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        HstoreMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its original position.
    pub fn insert(&mut self, key: String, value: Option<String>) -> Option<Option<String>> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key. The outer
    /// `Option` distinguishes a missing key from a present NULL value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pghstore::HstoreMap;
    ///
    /// let mut map = HstoreMap::new();
    /// map.insert("k".to_string(), None);
    /// assert_eq!(map.get("k"), Some(&None));
    /// assert_eq!(map.get("missing"), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Option<String>> {
        self.0.get(key)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key from the map, returning its value if present. Preserves
    /// the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Option<String>> {
        self.0.shift_remove(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Option<String>> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Option<String>> {
        self.0.values()
    }

    /// Returns an iterator over the entries of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Option<String>> {
        self.0.iter()
    }
}

impl From<HashMap<String, Option<String>>> for HstoreMap {
    fn from(map: HashMap<String, Option<String>>) -> Self {
        HstoreMap(map.into_iter().collect())
    }
}

impl From<HstoreMap> for HashMap<String, Option<String>> {
    fn from(map: HstoreMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for HstoreMap {
    type Item = (String, Option<String>);
    type IntoIter = indexmap::map::IntoIter<String, Option<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a HstoreMap {
    type Item = (&'a String, &'a Option<String>);
    type IntoIter = indexmap::map::Iter<'a, String, Option<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Option<String>)> for HstoreMap {
    fn from_iter<T: IntoIterator<Item = (String, Option<String>)>>(iter: T) -> Self {
        HstoreMap(IndexMap::from_iter(iter))
    }
}

impl Serialize for HstoreMap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for HstoreMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct HstoreMapVisitor;

        impl<'de> Visitor<'de> for HstoreMapVisitor {
            type Value = HstoreMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of string keys to nullable string values")
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = HstoreMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, Option<String>>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(HstoreMapVisitor)
    }
}
