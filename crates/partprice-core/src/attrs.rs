//! Dotted-path access into attribute records.
//!
//! An attribute record is an arbitrary JSON tree ([`serde_json::Value`]).
//! Records come from hand-written spec files, so any key may be missing,
//! null, or hold a value of the wrong shape. Every accessor here treats all
//! of those cases as "missing" and hands back the caller's default instead
//! of failing.
//!
//! # Example
//!
//! ```rust
//! use partprice_core::attrs::{get_or, number};
//! use serde_json::json;
//!
//! let record = json!({"cores": {"total": 8}});
//! assert_eq!(get_or(&record, "cores.total", json!(0)), json!(8));
//! assert_eq!(number(&record, "cores.performance", 4.0), 4.0);
//! ```

use serde_json::Value;

/// Resolve `path` (keys separated by `.`) inside `record`.
///
/// Returns `None` when any step lands on an absent key, a null, or a value
/// that is not a mapping, and when the final value is null.
pub fn get<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for key in path.split('.') {
        current = current.as_object()?.get(key)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Resolve `path`, falling back to `default` when it is missing.
pub fn get_or(record: &Value, path: &str, default: Value) -> Value {
    get(record, path).cloned().unwrap_or(default)
}

/// Numeric attribute at `path`. Anything other than a JSON number counts
/// as missing.
pub fn number(record: &Value, path: &str, default: f64) -> f64 {
    get(record, path).and_then(Value::as_f64).unwrap_or(default)
}

/// String attribute at `path`. Anything other than a JSON string counts
/// as missing.
pub fn text<'a>(record: &'a Value, path: &str, default: &'a str) -> &'a str {
    get(record, path).and_then(Value::as_str).unwrap_or(default)
}

/// Truthiness of the attribute at `path`, or `default` when missing.
pub fn flag(record: &Value, path: &str, default: bool) -> bool {
    get(record, path).map(is_truthy).unwrap_or(default)
}

/// Length of the sequence stored directly under `key`.
///
/// This is a top-level field lookup, not a dotted path: `key` is never
/// split. Absent keys, nulls, and non-sequences all yield 0.
pub fn seq_len(record: &Value, key: &str) -> usize {
    record
        .as_object()
        .and_then(|map| map.get(key))
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

/// `false`, `0`, `""`, `[]`, `{}` and `null` are falsy; everything else is
/// truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_lookup() {
        assert_eq!(get_or(&json!({"a": {"b": 5}}), "a.b", json!(0)), json!(5));
    }

    #[test]
    fn test_null_intermediate_yields_default() {
        assert_eq!(get_or(&json!({"a": null}), "a.b", json!(0)), json!(0));
    }

    #[test]
    fn test_empty_record_yields_default() {
        assert_eq!(get_or(&json!({}), "x.y.z", json!(99)), json!(99));
    }

    #[test]
    fn test_null_leaf_yields_default() {
        assert_eq!(get_or(&json!({"a": {"b": null}}), "a.b", json!(7)), json!(7));
    }

    #[test]
    fn test_scalar_intermediate_yields_default() {
        let record = json!({"a": 3, "list": [{"b": 1}]});
        assert!(get(&record, "a.b").is_none());
        assert!(get(&record, "list.b").is_none());
    }

    #[test]
    fn test_non_mapping_record() {
        assert!(get(&json!([1, 2, 3]), "0").is_none());
        assert!(get(&json!("text"), "text").is_none());
        assert!(get(&Value::Null, "a").is_none());
    }

    #[test]
    fn test_non_null_falsy_values_are_returned() {
        let record = json!({"zero": 0, "no": false, "empty": ""});
        assert_eq!(get(&record, "zero"), Some(&json!(0)));
        assert_eq!(get(&record, "no"), Some(&json!(false)));
        assert_eq!(get(&record, "empty"), Some(&json!("")));
    }

    #[test]
    fn test_mapping_value_returned_whole() {
        let record = json!({"clocks": {"performance": {"boost": 5.4}}});
        assert_eq!(
            get(&record, "clocks.performance"),
            Some(&json!({"boost": 5.4}))
        );
    }

    #[test]
    fn test_number_ignores_mistyped_values() {
        let record = json!({"memory": "24", "bus": 384, "ratio": 0.5});
        assert_eq!(number(&record, "memory", 4.0), 4.0);
        assert_eq!(number(&record, "bus", 128.0), 384.0);
        assert_eq!(number(&record, "ratio", 1.0), 0.5);
    }

    #[test]
    fn test_text_ignores_mistyped_values() {
        let record = json!({"chipset": 4090, "type": "SSD"});
        assert_eq!(text(&record, "chipset", ""), "");
        assert_eq!(text(&record, "type", "HDD"), "SSD");
    }

    #[test]
    fn test_flag_truthiness() {
        let record = json!({
            "t": true,
            "f": false,
            "wifi": "Wi-Fi 6E",
            "none": "",
            "one": 1,
            "zero": 0
        });
        assert!(flag(&record, "t", false));
        assert!(!flag(&record, "f", true));
        assert!(flag(&record, "wifi", false));
        assert!(!flag(&record, "none", true));
        assert!(flag(&record, "one", false));
        assert!(!flag(&record, "zero", true));
        assert!(flag(&record, "missing", true));
    }

    #[test]
    fn test_seq_len() {
        let record = json!({"m2_slots": [{}, {}, {}], "pcie_slots": null, "odd": "abc"});
        assert_eq!(seq_len(&record, "m2_slots"), 3);
        assert_eq!(seq_len(&record, "pcie_slots"), 0);
        assert_eq!(seq_len(&record, "odd"), 0);
        assert_eq!(seq_len(&record, "absent"), 0);
    }

    #[test]
    fn test_seq_len_does_not_split_key() {
        let record = json!({"a.b": [1, 2], "a": {"b": [1, 2, 3]}});
        assert_eq!(seq_len(&record, "a.b"), 2);
    }
}
