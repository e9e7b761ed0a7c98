//! Deep merge of JSON configuration values
//!
//! Objects merge key by key, arrays merge index by index, and the override
//! wins for any other conflict. A `null` in the override never erases an
//! existing base value. Neither input is modified; the result is a fresh tree.
//!
//! `serde_json::Value` is an owned tree, so a self-referential configuration
//! cannot be expressed and the traversal always terminates. Shared, possibly
//! cyclic objects such as native logger instances live outside the JSON tree
//! behind `Arc` and are carried by reference (see
//! [`LogExecutionContext::merged_with`](crate::core::LogExecutionContext::merged_with)).

use serde_json::{Map, Value};

/// Merge `overrides` onto `base` and return the combined value.
///
/// # Example
///
/// ```
/// use rust_logger_adapter::core::deep_merge;
/// use serde_json::json;
///
/// let base = json!({"log": {"level": "info"}});
/// let merged = deep_merge(&base, &json!({"log": {"nativeLogger": {"module": null}}}));
///
/// assert_eq!(merged["log"]["level"], "info");
/// assert!(merged["log"]["nativeLogger"].is_object());
/// ```
pub fn deep_merge(base: &Value, overrides: &Value) -> Value {
    match (base, overrides) {
        (Value::Object(base_map), Value::Object(override_map)) => {
            Value::Object(merge_maps(base_map, override_map))
        }
        (Value::Array(base_items), Value::Array(override_items)) => {
            let len = base_items.len().max(override_items.len());
            let merged = (0..len)
                .map(|i| match (base_items.get(i), override_items.get(i)) {
                    (Some(b), Some(o)) => deep_merge(b, o),
                    (Some(b), None) => b.clone(),
                    (None, Some(o)) => o.clone(),
                    (None, None) => Value::Null,
                })
                .collect();
            Value::Array(merged)
        }
        (_, Value::Null) => base.clone(),
        (_, other) => other.clone(),
    }
}

fn merge_maps(base: &Map<String, Value>, overrides: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.clone();
    for (key, value) in overrides {
        let combined = match merged.get(key) {
            Some(existing) => deep_merge(existing, value),
            None => value.clone(),
        };
        merged.insert(key.clone(), combined);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_override_wins_on_conflict() {
        let base = json!({"level": "info", "name": "example"});
        let merged = deep_merge(&base, &json!({"level": "debug"}));
        assert_eq!(merged, json!({"level": "debug", "name": "example"}));
    }

    #[test]
    fn test_new_nested_path_is_added_without_touching_base() {
        let base = json!({"log": {"level": "info"}});
        let snapshot = base.clone();

        let merged = deep_merge(&base, &json!({"log": {"nativeLogger": {"module": {"moduleName": "m"}}}}));

        assert_eq!(merged["log"]["nativeLogger"]["module"]["moduleName"], "m");
        assert_eq!(merged["log"]["level"], "info");
        assert_eq!(base, snapshot);
    }

    #[test]
    fn test_null_does_not_erase() {
        let base = json!({"app": {"appContext": "Global"}});
        let merged = deep_merge(&base, &json!({"app": {"appContext": null}}));
        assert_eq!(merged["app"]["appContext"], "Global");
    }

    #[test]
    fn test_arrays_merge_by_index() {
        let base = json!([{"a": 1}, 2, 3]);
        let merged = deep_merge(&base, &json!([{"b": 2}, 20]));
        assert_eq!(merged, json!([{"a": 1, "b": 2}, 20, 3]));
    }

    #[test]
    fn test_merge_into_empty_copies() {
        let base = json!({"execution": {"thread": "t", "requestId": "r"}});
        assert_eq!(deep_merge(&json!({}), &base), base);
    }

    #[test]
    fn test_self_merge_terminates_with_equal_value() {
        let value = json!({"a": {"b": [1, {"c": true}]}, "d": "e"});
        assert_eq!(deep_merge(&value, &value), value);
    }
}
