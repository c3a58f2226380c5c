use std::collections::BTreeMap;
use std::fmt;

use crate::value::{Key, Value};

/// An insertion ordered map of [`Key`]s to [`Value`]s.
///
/// Iteration and rendering follow the order in which keys were first
/// inserted.  Equality however does not care about the order: two maps
/// are equal if they hold the same keys mapping to equal values.
#[derive(Clone, Default)]
pub struct Map {
    entries: Vec<(Key, Value)>,
    index: BTreeMap<Key, usize>,
}

impl Map {
    /// Creates an empty map.
    pub fn new() -> Map {
        Map::default()
    }

    /// Inserts a value.
    ///
    /// If the key already exists the value is replaced in place and the
    /// old value is returned.
    pub fn insert<K: Into<Key>, V: Into<Value>>(&mut self, key: K, value: V) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        if let Some(&idx) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[idx].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Looks up the value for a key.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.index.get(key).map(|&idx| &self.entries[idx].1)
    }

    /// Checks if the key is in the map.
    pub fn contains_key(&self, key: &Key) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the map empty?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    /// Iterates over all keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(key, _)| key)
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Map) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).map_or(false, |other| value == other))
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Map {
        let mut map = Map::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<Key>, V: Into<Value>> Extend<(K, V)> for Map {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

type Entry<'m> = (&'m Key, &'m Value);

impl<'m> IntoIterator for &'m Map {
    type Item = Entry<'m>;
    type IntoIter = std::iter::Map<std::slice::Iter<'m, (Key, Value)>, fn(&'m (Key, Value)) -> Entry<'m>>;

    fn into_iter(self) -> Self::IntoIter {
        fn split(entry: &(Key, Value)) -> Entry<'_> {
            (&entry.0, &entry.1)
        }
        self.entries
            .iter()
            .map(split as fn(&'m (Key, Value)) -> Entry<'m>)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Map {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[test]
fn test_insertion_order() {
    let mut map = Map::new();
    map.insert("b", 1);
    map.insert("a", 2);
    map.insert(3, "three");
    assert_eq!(
        map.keys().cloned().collect::<Vec<_>>(),
        vec![Key::from("b"), Key::from("a"), Key::from(3)]
    );
}

#[test]
fn test_insert_replaces_in_place() {
    let mut map = Map::new();
    map.insert("a", 1);
    map.insert("b", 2);
    assert_eq!(map.insert("a", 3), Some(Value::from(1)));
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&Key::from("a")), Some(&Value::from(3)));
    assert_eq!(map.keys().next(), Some(&Key::from("a")));
}

#[test]
fn test_order_insensitive_equality() {
    let first: Map = vec![("a", 1), ("b", 2)].into_iter().collect();
    let second: Map = vec![("b", 2), ("a", 1)].into_iter().collect();
    let third: Map = vec![("a", 1), ("c", 2)].into_iter().collect();
    assert_eq!(first, second);
    assert_ne!(first, third);
    assert_ne!(first, Map::new());
}
