// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dynamically typed configuration values.
//!
//! This module provides the `Value` type, the currency passed between the document
//! builder, the loader and the spec file service, together with `ValueMap`, an
//! insertion-ordered map that keeps keys in declaration order.

use crate::domain::{PathSegment, SpecPath};
use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;

/// A configuration value.
///
/// Mirrors the YAML data model the crate produces: scalars, sequences and
/// string-keyed mappings.
///
/// # Examples
///
/// ```
/// use yamlspec::domain::Value;
///
/// let value = Value::from(42);
/// assert_eq!(value.as_i64(), Some(42));
/// assert_eq!(value.as_f64(), Some(42.0));
/// assert_eq!(value.type_name(), "integer");
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// The absence of a value
    #[default]
    Null,
    /// A boolean
    Bool(bool),
    /// A signed integer
    Int(i64),
    /// A floating point number
    Float(f64),
    /// A string
    String(String),
    /// An ordered sequence
    List(Vec<Value>),
    /// An ordered string-keyed mapping
    Map(ValueMap),
}

impl Value {
    /// Returns `true` if the value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, if this is an `Int`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the number as `f64`, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements, if this is a `List`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the mapping, if this is a `Map`.
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the name of this value's type as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Returns a short description of the value for error messages.
    ///
    /// # Examples
    ///
    /// ```
    /// use yamlspec::domain::Value;
    ///
    /// assert_eq!(Value::from("many").describe(), "string \"many\"");
    /// assert_eq!(Value::from(vec![1, 2]).describe(), "list of 2 elements");
    /// ```
    pub fn describe(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => format!("boolean {}", b),
            Value::Int(i) => format!("integer {}", i),
            Value::Float(f) => format!("float {}", f),
            Value::String(s) => format!("string {:?}", s),
            Value::List(items) => format!("list of {} elements", items.len()),
            Value::Map(map) => format!("map of {} entries", map.len()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<ValueMap> for Value {
    fn from(map: ValueMap) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::String(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => map.serialize(serializer),
        }
    }
}

/// An insertion-ordered map from string keys to values.
///
/// Inserting an existing key replaces its value in place, so the position of
/// a key never changes once it is present. Equality compares entries in
/// order.
///
/// # Examples
///
/// ```
/// use yamlspec::domain::{Value, ValueMap};
///
/// let mut map = ValueMap::new();
/// map.insert("name", "spec");
/// map.insert("capacity", 10);
/// map.insert("name", "renamed");
///
/// let keys: Vec<&str> = map.keys().collect();
/// assert_eq!(keys, vec!["name", "capacity"]);
/// assert_eq!(map.get("name"), Some(&Value::from("renamed")));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ValueMap {
    entries: IndexMap<String, Value>,
}

impl ValueMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns a mutable reference to the value for a key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Inserts a value, returning the previous one for that key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes a key, returning its value. Later keys move up one position.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Returns `true` if the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Follows a path through nested maps and lists.
    ///
    /// Returns `None` for the root path and for any segment that does not
    /// match the shape of the value it is applied to.
    ///
    /// # Examples
    ///
    /// ```
    /// use yamlspec::domain::{SpecPath, Value, ValueMap};
    ///
    /// let mut server = ValueMap::new();
    /// server.insert("host", "localhost");
    /// let mut map = ValueMap::new();
    /// map.insert("servers", vec![Value::Map(server)]);
    ///
    /// let host = map.lookup(&SpecPath::from("servers[0].host"));
    /// assert_eq!(host, Some(&Value::from("localhost")));
    /// assert_eq!(map.lookup(&SpecPath::from("servers[1]")), None);
    /// ```
    pub fn lookup(&self, path: &SpecPath) -> Option<&Value> {
        let (first, rest) = path.segments().split_first()?;
        let mut current = match first {
            PathSegment::Key(key) => self.get(key)?,
            PathSegment::Index(_) => return None,
        };
        for segment in rest {
            current = match (segment, current) {
                (PathSegment::Key(key), Value::Map(map)) => map.get(key)?,
                (PathSegment::Index(i), Value::List(items)) => items.get(*i)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Mutable counterpart of [`ValueMap::lookup`].
    pub fn lookup_mut(&mut self, path: &SpecPath) -> Option<&mut Value> {
        let (first, rest) = path.segments().split_first()?;
        let mut current = match first {
            PathSegment::Key(key) => self.get_mut(key)?,
            PathSegment::Index(_) => return None,
        };
        for segment in rest {
            current = match (segment, current) {
                (PathSegment::Key(key), Value::Map(map)) => map.get_mut(key)?,
                (PathSegment::Index(i), Value::List(items)) => items.get_mut(*i)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl PartialEq for ValueMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ValueMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for ValueMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for ValueMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_accessors() {
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(7).as_i64(), Some(7));
        assert_eq!(Value::from(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::from("x").as_i64(), None);
        assert_eq!(Value::Null.as_bool(), None);
    }

    #[test]
    fn test_int_widens_to_float() {
        assert_eq!(Value::from(3).as_f64(), Some(3.0));
        assert_eq!(Value::from(3.0).as_i64(), None);
    }

    #[test]
    fn test_option_into_value() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::from("a"));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::from(vec!["a"]).type_name(), "list");
        assert_eq!(Value::from(ValueMap::new()).type_name(), "map");
    }

    #[test]
    fn test_display() {
        let mut map = ValueMap::new();
        map.insert("a", 1);
        map.insert("b", vec![1.5, 2.0]);
        assert_eq!(Value::from(map).to_string(), "{a: 1, b: [1.5, 2.0]}");
    }

    #[test]
    fn test_map_preserves_order() {
        let map: ValueMap = vec![("z", 1), ("a", 2), ("m", 3)].into_iter().collect();
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_map_insert_replaces_in_place() {
        let mut map: ValueMap = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(map.insert("a", 10), Some(Value::from(1)));
        let entries: Vec<(&str, &Value)> = map.iter().collect();
        assert_eq!(entries[0], ("a", &Value::from(10)));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_map_equality_is_ordered() {
        let ab: ValueMap = vec![("a", 1), ("b", 2)].into_iter().collect();
        let ba: ValueMap = vec![("b", 2), ("a", 1)].into_iter().collect();
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }

    #[test]
    fn test_large_map_keeps_order() {
        let map: ValueMap = (0..50_000).map(|i| (format!("key-{}", i), i)).collect();
        assert_eq!(map.len(), 50_000);
        assert_eq!(map.get("key-49999"), Some(&Value::Int(49_999)));
        assert_eq!(map.keys().nth(12_345), Some("key-12345"));
    }

    #[test]
    fn test_map_remove() {
        let mut map: ValueMap = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(map.remove("a"), Some(Value::from(1)));
        assert_eq!(map.remove("a"), None);
        assert!(!map.contains_key("a"));
        assert_eq!(map.len(), 1);

        let mut map: ValueMap = vec![("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        map.remove("a");
        assert_eq!(map.keys().collect::<Vec<_>>(), ["b", "c"]);
    }

    #[test]
    fn test_serialize_to_yaml_value() {
        let mut map = ValueMap::new();
        map.insert("name", "spec");
        map.insert("ports", vec![80, 443]);
        let yaml = serde_yaml::to_string(&map).unwrap();
        assert_eq!(yaml, "name: spec\nports:\n- 80\n- 443\n");
    }

    #[test]
    fn test_lookup_and_lookup_mut() {
        let mut inner = ValueMap::new();
        inner.insert("radius", 4);
        let mut map = ValueMap::new();
        map.insert("numbers", inner);
        map.insert("tags", vec!["a", "b"]);

        assert_eq!(map.lookup(&SpecPath::from("numbers.radius")), Some(&Value::Int(4)));
        assert_eq!(map.lookup(&SpecPath::from("tags[1]")), Some(&Value::from("b")));
        assert_eq!(map.lookup(&SpecPath::from("tags.x")), None);
        assert_eq!(map.lookup(&SpecPath::root()), None);

        if let Some(slot) = map.lookup_mut(&SpecPath::from("numbers.radius")) {
            *slot = Value::Int(8);
        }
        assert_eq!(map.lookup(&SpecPath::from("numbers.radius")), Some(&Value::Int(8)));
    }
}
