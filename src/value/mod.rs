//! The dynamic value tree that comparisons operate on.
//!
//! A [`Value`] is either a scalar (`None`, booleans, integers, floats and
//! strings), a list of values or a [`Map`] of [`Key`]s to values.  Values
//! compare structurally: two values are equal if they are of the same kind
//! and hold equal payloads.  Note that this means `Int(1)` and `Float(1.0)`
//! are *not* equal as the type of a value participates in equality.
//!
//! Values can be built with the usual `From` conversions or the
//! [`dict!`](crate::dict) and [`list!`](crate::list) macros:
//!
//! ```rust
//! use dictdiff::{dict, list, Value};
//!
//! let value = dict! {
//!     "name" => "example",
//!     "tags" => list!["a", 2, None::<i64>],
//! };
//! assert_eq!(value.type_name(), "dict");
//! assert_eq!(value.to_string(), "{'name': 'example', 'tags': ['a', 2, None]}");
//! ```
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

mod map;
mod repr;

#[cfg(feature = "json")]
mod json;

pub use self::map::Map;
pub use self::repr::Repr;

/// A key in a [`Map`].
///
/// Keys are restricted to hashable scalars.  Float keys compare, order and
/// hash by their bit pattern, so a `NaN` key finds itself again while `0.0`
/// and `-0.0` are distinct keys.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Key {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Key {
    /// Returns the canonical type name of the key.
    pub fn type_name(&self) -> &'static str {
        match *self {
            Key::Null => "NoneType",
            Key::Bool(_) => "bool",
            Key::Int(_) => "int",
            Key::Float(_) => "float",
            Key::Str(_) => "str",
        }
    }

    /// Returns the key as string if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a formatter that renders the quoted form of the key.
    pub fn repr(&self) -> KeyRepr<'_> {
        KeyRepr(self)
    }

    fn rank(&self) -> u8 {
        match *self {
            Key::Null => 0,
            Key::Bool(_) => 1,
            Key::Int(_) => 2,
            Key::Float(_) => 3,
            Key::Str(_) => 4,
        }
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Key) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Key) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Key) -> Ordering {
        match (self, other) {
            (Key::Bool(a), Key::Bool(b)) => a.cmp(b),
            (Key::Int(a), Key::Int(b)) => a.cmp(b),
            (Key::Float(a), Key::Float(b)) => a.total_cmp(b),
            (Key::Str(a), Key::Str(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Key::Null => {}
            Key::Bool(b) => b.hash(state),
            Key::Int(i) => i.hash(state),
            Key::Float(f) => f.to_bits().hash(state),
            Key::Str(s) => s.hash(state),
        }
    }
}

/// Renders the quoted form of a [`Key`] (`'name'`, `42`, `1.5`, `True`, `None`).
#[derive(Debug, Clone, Copy)]
pub struct KeyRepr<'k>(&'k Key);

impl<'k> fmt::Display for KeyRepr<'k> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Key::Null => f.write_str("None"),
            Key::Bool(b) => repr::write_bool(f, *b),
            Key::Int(i) => write!(f, "{}", i),
            Key::Float(x) => repr::write_float(f, *x),
            Key::Str(s) => repr::write_quoted(f, s),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Key::Str(s) => f.write_str(s),
            other => write!(f, "{}", other.repr()),
        }
    }
}

impl From<()> for Key {
    fn from(_: ()) -> Key {
        Key::Null
    }
}

impl From<f32> for Key {
    fn from(value: f32) -> Key {
        Key::Float(value.into())
    }
}

impl From<f64> for Key {
    fn from(value: f64) -> Key {
        Key::Float(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Key {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Key {
        Key::Str(value)
    }
}

impl From<bool> for Key {
    fn from(value: bool) -> Key {
        Key::Bool(value)
    }
}

macro_rules! impl_int_key {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Key {
                fn from(value: $ty) -> Key {
                    Key::Int(value.into())
                }
            }
        )*
    };
}

impl_int_key!(i8, i16, i32, i64, u8, u16, u32);

/// A dynamically typed value.
///
/// Equality is structural with one exception to IEEE float semantics: a
/// `NaN` float equals another `NaN`, so every value equals itself.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(Map),
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    /// Returns the canonical type name of the value.
    ///
    /// The names are the ones failure messages use: `NoneType`, `bool`,
    /// `int`, `float`, `str`, `list` and `dict`.
    pub fn type_name(&self) -> &'static str {
        match *self {
            Value::Null => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Map(_) => "dict",
        }
    }

    /// Checks if both values are of the same type.
    pub fn same_type(&self, other: &Value) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Returns the value as map if it is one.
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the value as list if it is one.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the value as string if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Is this a map?
    pub fn is_map(&self) -> bool {
        self.as_map().is_some()
    }

    /// Returns a formatter that renders the quoted form of the value.
    ///
    /// This differs from the [`Display`](fmt::Display) implementation only
    /// for strings which are quoted and escaped:
    ///
    /// ```rust
    /// # use dictdiff::Value;
    /// let value = Value::from("it's");
    /// assert_eq!(value.to_string(), "it's");
    /// assert_eq!(value.repr().to_string(), "\"it's\"");
    /// ```
    pub fn repr(&self) -> Repr<'_> {
        Repr::new(self)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            other => fmt::Display::fmt(&other.repr(), f),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Value {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Value {
        Value::Bool(value)
    }
}

macro_rules! impl_int_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Value {
                    Value::Int(value.into())
                }
            }
        )*
    };
}

impl_int_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(value: f32) -> Value {
        Value::Float(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Value {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Value {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Value {
        Value::Str(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Value {
        Value::Map(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Value {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Value {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<Key> for Value {
    fn from(value: Key) -> Value {
        match value {
            Key::Null => Value::Null,
            Key::Bool(b) => Value::Bool(b),
            Key::Int(i) => Value::Int(i),
            Key::Float(x) => Value::Float(x),
            Key::Str(s) => Value::Str(s),
        }
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Value {
        Value::List(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(items) => serializer.collect_seq(items),
            Value::Map(map) => serde::Serialize::serialize(map, serializer),
        }
    }
}

#[test]
fn test_type_names() {
    let names = [
        Value::Null,
        Value::from(true),
        Value::from(1),
        Value::from(1.5),
        Value::from("x"),
        Value::from(vec![1, 2]),
        Value::from(Map::new()),
    ]
    .iter()
    .map(Value::type_name)
    .collect::<Vec<_>>();
    assert_eq!(
        names,
        ["NoneType", "bool", "int", "float", "str", "list", "dict"]
    );
}

#[test]
fn test_structural_equality() {
    assert_eq!(Value::from(vec![1, 2, 3]), Value::from(vec![1, 2, 3]));
    assert_ne!(Value::from(vec![1, 2, 3]), Value::from(vec![3, 2, 1]));
    assert_ne!(Value::from(1), Value::from(1.0));
    assert_ne!(Value::from("1"), Value::from(1));
    assert!(Value::from(1).same_type(&Value::from(2)));
    assert!(!Value::from(1).same_type(&Value::Null));
    assert_eq!(Value::default(), Value::Null);
}

#[test]
fn test_nan_equals_itself() {
    let nan = Value::from(f64::NAN);
    assert_eq!(nan, nan.clone());
    assert_eq!(Value::from(vec![1.0, f64::NAN]), Value::from(vec![1.0, f64::NAN]));
    assert_ne!(nan, Value::from(1.0));
    assert_eq!(Value::from(0.0), Value::from(-0.0));
}

#[test]
fn test_accessors() {
    let list = Value::from(vec!["a", "b"]);
    assert_eq!(list.as_list().map(|items| items.len()), Some(2));
    assert_eq!(list.as_list().and_then(|items| items[1].as_str()), Some("b"));
    assert!(!list.is_map());
    assert_eq!(list.as_map(), None);
    assert_eq!(list.as_str(), None);

    let map = Value::from(Map::new());
    assert!(map.is_map());
    assert_eq!(map.as_list(), None);
}

#[test]
fn test_plain_display() {
    assert_eq!(Value::from("leaf-value").to_string(), "leaf-value");
    assert_eq!(Value::Null.to_string(), "None");
    assert_eq!(Value::from(false).to_string(), "False");
    assert_eq!(Value::from(1).to_string(), "1");
    assert_eq!(
        Value::from(vec!["first", "second"]).to_string(),
        "['first', 'second']"
    );
}

#[test]
fn test_key_forms() {
    assert_eq!(Key::from("k").to_string(), "k");
    assert_eq!(Key::from("k").repr().to_string(), "'k'");
    assert_eq!(Key::from(7).repr().to_string(), "7");
    assert_eq!(Key::from(true).repr().to_string(), "True");
    assert_eq!(Key::from(7).type_name(), "int");
    assert_eq!(Key::from("k").as_str(), Some("k"));
    assert_eq!(Key::from(7).as_str(), None);
}

#[test]
fn test_null_and_float_keys() {
    assert_eq!(Key::from(()).repr().to_string(), "None");
    assert_eq!(Key::from(()).type_name(), "NoneType");
    assert_eq!(Key::from(1.5).repr().to_string(), "1.5");
    assert_eq!(Key::from(2.0).to_string(), "2.0");
    assert_eq!(Key::from(1e20).repr().to_string(), "1e+20");
    assert_eq!(Key::from(1.5).type_name(), "float");
    assert_eq!(Value::from(Key::from(1.5)), Value::Float(1.5));
    assert_eq!(Value::from(Key::from(())), Value::Null);

    assert_eq!(Key::from(f64::NAN), Key::from(f64::NAN));
    assert_ne!(Key::from(1), Key::from(1.0));
    assert!(Key::from(()) < Key::from(false));
    assert!(Key::from(-1.5) < Key::from(0.5));

    let mut map = Map::new();
    map.insert(f64::NAN, "first");
    map.insert(f64::NAN, "second");
    map.insert((), "none");
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&Key::from(f64::NAN)), Some(&Value::from("second")));
    assert_eq!(map.get(&Key::Null), Some(&Value::from("none")));
}
