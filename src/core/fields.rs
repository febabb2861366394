//! Default resolution for raw resource fields.
//!
//! Every accessor here is total. A field that is absent, `null`, or of the
//! wrong JSON type resolves to "unset" (`None`) or to an empty collection.
//! Rule predicates treat unset values as failing.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Returns the field as a borrowed string, if it is a JSON string.
pub(crate) fn str_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

/// Returns the field as an owned string, if it is a JSON string.
pub(crate) fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    str_field(fields, key).map(str::to_owned)
}

/// Returns the field only if it is a JSON boolean.
///
/// `1`, `"true"` and other truthy values are not booleans and stay unset.
pub(crate) fn bool_field(fields: &Map<String, Value>, key: &str) -> Option<bool> {
    fields.get(key).and_then(Value::as_bool)
}

/// Returns the field's elements, or an empty slice when it is not an array.
pub(crate) fn array_field<'a>(fields: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    fields
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Returns the field as a string map, or an empty map when it is not an object.
///
/// Non-string values keep their key; the value is stored as its JSON text.
pub(crate) fn string_map_field(fields: &Map<String, Value>, key: &str) -> BTreeMap<String, String> {
    fields
        .get(key)
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .map(|(k, v)| {
                    let value = match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (k.clone(), value)
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_bool_field_strict() {
        let fields = object(json!({
            "yes": true,
            "no": false,
            "one": 1,
            "text": "true",
            "null": null
        }));

        assert_eq!(bool_field(&fields, "yes"), Some(true));
        assert_eq!(bool_field(&fields, "no"), Some(false));
        assert_eq!(bool_field(&fields, "one"), None);
        assert_eq!(bool_field(&fields, "text"), None);
        assert_eq!(bool_field(&fields, "null"), None);
        assert_eq!(bool_field(&fields, "missing"), None);
    }

    #[test]
    fn test_array_field_defaults_to_empty() {
        let fields = object(json!({"ips": ["1.2.3.4"], "bad": "1.2.3.4"}));

        assert_eq!(array_field(&fields, "ips").len(), 1);
        assert!(array_field(&fields, "bad").is_empty());
        assert!(array_field(&fields, "missing").is_empty());
    }

    #[test]
    fn test_string_map_field() {
        let fields = object(json!({
            "tags": {"environment": "prod", "cost_center": 42},
            "broken": ["environment"]
        }));

        let tags = string_map_field(&fields, "tags");
        assert_eq!(tags.get("environment").map(String::as_str), Some("prod"));
        assert_eq!(tags.get("cost_center").map(String::as_str), Some("42"));
        assert!(string_map_field(&fields, "broken").is_empty());
    }
}
