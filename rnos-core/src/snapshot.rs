//! JSON rendering of values for diagnostics.
//!
//! Follows the conventions of a JSON stringifier run over a live object
//! graph: functions and `undefined` are dropped from objects and become
//! `null` inside arrays, non-finite numbers become `null`, and integral
//! numbers print without a fraction. A top-level function or `undefined`
//! renders as the bare word `undefined`.

use crate::value::Value;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

// Largest integer an f64 represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Render `value` as two-space indented JSON.
pub fn snapshot(value: &Value) -> String {
    match value {
        Value::Undefined | Value::Callable(_) => "undefined".to_string(),
        other => serde_json::to_string_pretty(other)
            .unwrap_or_else(|err| format!("<unrenderable {}: {err}>", other.type_name())),
    }
}

fn omitted_in_object(value: &Value) -> bool {
    matches!(value, Value::Undefined | Value::Callable(_))
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null | Value::Callable(_) => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => {
                if !n.is_finite() {
                    serializer.serialize_unit()
                } else if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let entries: Vec<_> = map
                    .iter()
                    .filter(|(_, v)| !omitted_in_object(v))
                    .collect();
                let mut out = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_empty_object() {
        assert_eq!(snapshot(&Value::object(Vec::<(String, Value)>::new())), "{}");
    }

    #[test]
    fn test_snapshot_drops_functions_from_objects() {
        let value = Value::object([
            ("add", Value::function(|a: f64, b: f64| a + b)),
            ("version", Value::from(2)),
            ("ratio", Value::from(0.5)),
        ]);
        assert_eq!(
            snapshot(&value),
            "{\n  \"version\": 2,\n  \"ratio\": 0.5\n}"
        );
    }

    #[test]
    fn test_snapshot_keeps_property_order() {
        let value = Value::object([
            ("zoom", Value::from(1)),
            ("apply", Value::function(|| ())),
            ("anchor", Value::from("top")),
        ]);
        assert_eq!(
            snapshot(&value),
            "{\n  \"zoom\": 1,\n  \"anchor\": \"top\"\n}"
        );
    }

    #[test]
    fn test_snapshot_nulls_functions_in_lists() {
        let value = Value::list([Value::function(|| ()), Value::Undefined, Value::from(f64::NAN)]);
        assert_eq!(snapshot(&value), "[\n  null,\n  null,\n  null\n]");
    }

    #[test]
    fn test_snapshot_top_level() {
        assert_eq!(snapshot(&Value::Undefined), "undefined");
        assert_eq!(snapshot(&Value::function(|| ())), "undefined");
        assert_eq!(snapshot(&Value::Null), "null");
        assert_eq!(snapshot(&Value::from(0)), "0");
        assert_eq!(snapshot(&Value::from("hi")), "\"hi\"");
    }
}
