//! Conversions from `serde_json` values.
//!
//! This module is available when the `json` feature is enabled.
use crate::value::{Map, Value};

impl From<serde_json::Value> for Value {
    /// Converts a JSON value.
    ///
    /// Numbers that fit into an `i64` become [`Value::Int`], all other
    /// numbers become [`Value::Float`].
    fn from(value: serde_json::Value) -> Value {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => items.into_iter().collect(),
            serde_json::Value::Object(object) => Value::Map(object.into_iter().collect()),
        }
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Map {
    fn from(object: serde_json::Map<String, serde_json::Value>) -> Map {
        object.into_iter().collect()
    }
}

#[test]
fn test_from_json() {
    let value = Value::from(serde_json::json!({
        "int": 1,
        "float": 1.5,
        "big": 18446744073709551615u64,
        "none": null,
        "list": [true, "x"],
    }));
    let map = value.as_map().unwrap();
    assert_eq!(map.get(&"int".into()), Some(&Value::Int(1)));
    assert_eq!(map.get(&"float".into()), Some(&Value::Float(1.5)));
    assert_eq!(map.get(&"big".into()).map(Value::type_name), Some("float"));
    assert_eq!(map.get(&"none".into()), Some(&Value::Null));
    assert_eq!(
        map.get(&"list".into()),
        Some(&Value::List(vec![Value::Bool(true), Value::from("x")]))
    );
}
