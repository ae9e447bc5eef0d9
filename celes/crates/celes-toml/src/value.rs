//! The typed value tree produced by the parser.
//!
//! Ownership is strictly parent-to-child: a [`TomlTable`] owns its values,
//! values own their nested tables and arrays, and dropping the root drops
//! the whole tree. Query helpers are pure lookups; a missing key or a type
//! mismatch is `None`, never a panic.

use std::hash::BuildHasherDefault;

use indexmap::IndexMap;
use rustc_hash::FxHasher;

/// Hash-keyed map preserving insertion order for indexed iteration.
pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// The type tag of a [`TomlValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TomlType {
    /// UTF-8 string.
    String,
    /// 64-bit signed integer.
    Integer,
    /// 64-bit IEEE-754 float.
    Real,
    /// Boolean.
    Boolean,
    /// Nested table.
    Table,
    /// Array of values.
    Array,
}

/// A single TOML value.
#[derive(Clone, Debug, PartialEq)]
pub enum TomlValue {
    /// A basic, literal, or multi-line string.
    String(String),
    /// An integer in any of the supported bases.
    Integer(i64),
    /// A float with a fraction and/or exponent.
    Real(f64),
    /// `true` or `false`.
    Boolean(bool),
    /// A table introduced by a header or a dotted key.
    Table(TomlTable),
    /// A table-array built up by `[[header]]` occurrences.
    Array(TomlArray),
}

impl TomlValue {
    /// The value's type tag.
    pub fn value_type(&self) -> TomlType {
        match self {
            TomlValue::String(_) => TomlType::String,
            TomlValue::Integer(_) => TomlType::Integer,
            TomlValue::Real(_) => TomlType::Real,
            TomlValue::Boolean(_) => TomlType::Boolean,
            TomlValue::Table(_) => TomlType::Table,
            TomlValue::Array(_) => TomlType::Array,
        }
    }

    /// The string contents, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TomlValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The integer value, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            TomlValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TomlValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The float value, if this is a real. Integers do not coerce.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            TomlValue::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// The nested table, if this is a table.
    pub fn as_table(&self) -> Option<&TomlTable> {
        match self {
            TomlValue::Table(t) => Some(t),
            _ => None,
        }
    }

    /// The nested array, if this is an array.
    pub fn as_array(&self) -> Option<&TomlArray> {
        match self {
            TomlValue::Array(a) => Some(a),
            _ => None,
        }
    }
}

/// A table of key-value pairs.
///
/// Keys are unique. Lookup is by hash; `pair_at` gives stable indexed
/// access for iteration, but the ordering itself is not part of the
/// contract.
///
/// # Examples
///
/// ```
/// let table = celes_toml::parse_str("demo.toml", "Name = \"celes\"").unwrap();
///
/// assert_eq!(table.get_string("Name"), Some("celes"));
/// assert_eq!(table.get_int("Name"), None);
/// assert_eq!(table.get_string("Missing"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TomlTable {
    pub(crate) values: FxIndexMap<String, TomlValue>,
    pub(crate) is_inline: bool,
}

impl TomlTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of key-value pairs.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the table holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reserved for inline tables, which are currently unimplemented.
    pub fn is_inline(&self) -> bool {
        self.is_inline
    }

    /// The pair at the given index, for iteration.
    pub fn pair_at(&self, idx: usize) -> Option<(&str, &TomlValue)> {
        self.values.get_index(idx).map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over all pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TomlValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&TomlValue> {
        self.values.get(key)
    }

    /// True when `key` is present, whatever its type.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The type tag of the value under `key`.
    pub fn value_type(&self, key: &str) -> Option<TomlType> {
        self.get(key).map(TomlValue::value_type)
    }

    /// The string under `key`, if present and a string.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    /// The integer under `key`, if present and an integer.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key)?.as_int()
    }

    /// The boolean under `key`, if present and a boolean.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key)?.as_bool()
    }

    /// The float under `key`, if present and a real.
    pub fn get_real(&self, key: &str) -> Option<f64> {
        self.get(key)?.as_real()
    }

    /// The subtable under `key`, if present and a table.
    pub fn get_table(&self, key: &str) -> Option<&TomlTable> {
        self.get(key)?.as_table()
    }

    /// The array under `key`, if present and an array.
    pub fn get_array(&self, key: &str) -> Option<&TomlArray> {
        self.get(key)?.as_array()
    }

    /// Value lookup through a top-level section table.
    ///
    /// A missing section, a non-table entry under `section`, or a missing
    /// `key` inside it are all a miss.
    fn section_value(&self, section: &str, key: &str) -> Option<&TomlValue> {
        self.get_table(section)?.get(key)
    }

    /// The string under `section.key`, usually used on the root table.
    ///
    /// # Examples
    ///
    /// ```
    /// let root = celes_toml::parse_str("demo.toml", "[Build]\nName = \"x\"").unwrap();
    /// assert_eq!(root.section_string("Build", "Name"), Some("x"));
    /// assert_eq!(root.section_string("Missing", "Name"), None);
    /// ```
    pub fn section_string(&self, section: &str, key: &str) -> Option<&str> {
        self.section_value(section, key)?.as_str()
    }

    /// The integer under `section.key`.
    pub fn section_int(&self, section: &str, key: &str) -> Option<i64> {
        self.section_value(section, key)?.as_int()
    }

    /// The boolean under `section.key`.
    pub fn section_bool(&self, section: &str, key: &str) -> Option<bool> {
        self.section_value(section, key)?.as_bool()
    }

    /// The float under `section.key`.
    pub fn section_real(&self, section: &str, key: &str) -> Option<f64> {
        self.section_value(section, key)?.as_real()
    }

    /// The table under `section.key`.
    pub fn section_table(&self, section: &str, key: &str) -> Option<&TomlTable> {
        self.section_value(section, key)?.as_table()
    }

    /// The array under `section.key`.
    pub fn section_array(&self, section: &str, key: &str) -> Option<&TomlArray> {
        self.section_value(section, key)?.as_array()
    }

    /// True when `section.key` exists, whatever its type.
    pub fn has_section_value(&self, section: &str, key: &str) -> bool {
        self.section_value(section, key).is_some()
    }
}

/// An ordered sequence of values.
///
/// Arrays only arise from `[[header]]` table-arrays today; every element
/// then shares the type of the first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TomlArray {
    pub(crate) values: Vec<TomlValue>,
}

impl TomlArray {
    /// Number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the array is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The element at `idx`.
    pub fn get(&self, idx: usize) -> Option<&TomlValue> {
        self.values.get(idx)
    }

    /// Iterate over the elements.
    pub fn iter(&self) -> impl Iterator<Item = &TomlValue> {
        self.values.iter()
    }

    /// The string at `idx`, if present and a string.
    pub fn get_string(&self, idx: usize) -> Option<&str> {
        self.get(idx)?.as_str()
    }

    /// The integer at `idx`, if present and an integer.
    pub fn get_int(&self, idx: usize) -> Option<i64> {
        self.get(idx)?.as_int()
    }

    /// The boolean at `idx`, if present and a boolean.
    pub fn get_bool(&self, idx: usize) -> Option<bool> {
        self.get(idx)?.as_bool()
    }

    /// The float at `idx`, if present and a real.
    pub fn get_real(&self, idx: usize) -> Option<f64> {
        self.get(idx)?.as_real()
    }

    /// The table at `idx`, if present and a table.
    pub fn get_table(&self, idx: usize) -> Option<&TomlTable> {
        self.get(idx)?.as_table()
    }

    /// The array at `idx`, if present and an array.
    pub fn get_array(&self, idx: usize) -> Option<&TomlArray> {
        self.get(idx)?.as_array()
    }
}
