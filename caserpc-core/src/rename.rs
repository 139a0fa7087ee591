//! Recursive renaming of object keys in a JSON value tree
//!
//! Parameters leave the client in camelCase and results arrive in
//! snake_case, at any depth: objects nested inside arrays nested inside
//! objects all get their keys translated. Only keys change; values, array
//! order and array length are preserved exactly.
//!
//! # Key Collisions
//!
//! Two distinct source keys can convert to the same target key (an object
//! holding both `aB` and `a_b`, for instance). The outcome is deterministic:
//!
//! 1. A key that is already in target form (the converter returns it
//!    unchanged) wins over any key that had to be converted.
//! 2. Otherwise the first key in the object's iteration order wins.
//!
//! Each dropped entry is reported with a `tracing` warning.
//!
//! # Examples
//!
//! ```rust
//! use caserpc_core::{case::snake_to_camel, rename::rename_keys};
//! use serde_json::json;
//!
//! let result = json!([{"task_id": "9", "date_due": null, "color": {"name": "Yellow"}}]);
//! let renamed = rename_keys(&result, snake_to_camel);
//!
//! assert_eq!(renamed, json!([{"taskId": "9", "dateDue": null, "color": {"name": "Yellow"}}]));
//! ```

use serde_json::{map::Entry, Map, Value};

/// Return a copy of `value` with every object key passed through `convert`.
///
/// The input is left untouched.
pub fn rename_keys<F>(value: &Value, convert: F) -> Value
where
    F: Fn(&str) -> String,
{
    rename_ref(value, &convert)
}

/// Consuming variant of [`rename_keys`], reusing the leaf values.
pub fn into_renamed<F>(value: Value, convert: F) -> Value
where
    F: Fn(&str) -> String,
{
    rename_owned(value, &convert)
}

fn rename_ref(value: &Value, convert: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, inner) in map {
                insert_renamed(&mut out, key, convert(key), rename_ref(inner, convert));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(|v| rename_ref(v, convert)).collect()),
        other => other.clone(),
    }
}

fn rename_owned(value: Value, convert: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, inner) in map {
                let target = convert(&key);
                insert_renamed(&mut out, &key, target, rename_owned(inner, convert));
            }
            Value::Object(out)
        }
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|v| rename_owned(v, convert)).collect())
        }
        other => other,
    }
}

/// Insert one renamed entry, applying the collision policy.
fn insert_renamed(out: &mut Map<String, Value>, source: &str, target: String, value: Value) {
    let exact = source == target;

    match out.entry(target) {
        Entry::Vacant(slot) => {
            slot.insert(value);
        }
        Entry::Occupied(mut slot) if exact => {
            tracing::warn!(key = %slot.key(), "key collision while renaming, keeping unconverted key");
            slot.insert(value);
        }
        Entry::Occupied(slot) => {
            tracing::warn!(
                key = %slot.key(),
                dropped = %source,
                "key collision while renaming, dropping converted key"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::{camel_to_snake, snake_to_camel};
    use serde_json::json;

    #[test]
    fn test_flat_params_to_snake() {
        let params = json!({"ownerId": 5, "startDate": "2024-01-01"});
        let renamed = rename_keys(&params, camel_to_snake);
        assert_eq!(renamed, json!({"owner_id": 5, "start_date": "2024-01-01"}));
    }

    #[test]
    fn test_flat_result_to_camel() {
        let result = json!({"task_id": "9", "date_due": null});
        let renamed = rename_keys(&result, snake_to_camel);
        assert_eq!(renamed, json!({"taskId": "9", "dateDue": null}));
    }

    #[test]
    fn test_nested_round_trip() {
        let original = json!({"url": {"board": "b", "list": "l"}});
        let wire = rename_keys(&original, camel_to_snake);
        assert_eq!(wire, original);
        assert_eq!(rename_keys(&wire, snake_to_camel), original);
    }

    #[test]
    fn test_primitives_unchanged() {
        for value in [json!(null), json!(true), json!(42), json!(-1.5), json!("some_text")] {
            assert_eq!(rename_keys(&value, camel_to_snake), value);
            assert_eq!(into_renamed(value.clone(), snake_to_camel), value);
        }
    }

    #[test]
    fn test_string_values_not_renamed() {
        let value = json!({"colorId": "lightGreen", "tags": ["someTag", "other_tag"]});
        let renamed = rename_keys(&value, camel_to_snake);
        assert_eq!(renamed, json!({"color_id": "lightGreen", "tags": ["someTag", "other_tag"]}));
    }

    #[test]
    fn test_arrays_of_objects_and_objects_of_arrays() {
        let value = json!([
            {"projectId": 1, "columns": [{"columnId": 2, "taskLimit": [1, {"deepKey": 3}]}]},
            [{"innerKey": []}],
            "plain",
        ]);
        let expected = json!([
            {"project_id": 1, "columns": [{"column_id": 2, "task_limit": [1, {"deep_key": 3}]}]},
            [{"inner_key": []}],
            "plain",
        ]);
        assert_eq!(rename_keys(&value, camel_to_snake), expected);
        assert_eq!(rename_keys(&expected, snake_to_camel), value);
    }

    #[test]
    fn test_input_not_mutated() {
        let value = json!({"ownerId": {"innerId": [1, 2, 3]}});
        let snapshot = value.clone();
        let _ = rename_keys(&value, camel_to_snake);
        assert_eq!(value, snapshot);
    }

    #[test]
    fn test_owned_and_borrowed_agree() {
        let value = json!({"aB": [{"cD": {"eF": null}}], "gH": 1});
        assert_eq!(rename_keys(&value, camel_to_snake), into_renamed(value, camel_to_snake));
    }

    #[test]
    fn test_deep_nesting() {
        let mut value = json!({"leafKey": 0});
        for _ in 0..100 {
            value = json!({"levelKey": [value]});
        }
        let snake = rename_keys(&value, camel_to_snake);
        assert!(snake.to_string().contains("leaf_key"));
        assert!(!snake.to_string().contains("levelKey"));
        assert_eq!(into_renamed(snake, snake_to_camel), value);
    }

    #[test]
    fn test_collision_prefers_exact_key() {
        // "a_b" is already snake case and must win over the converted "aB"
        let value = json!({"aB": 1, "a_b": 2});
        assert_eq!(rename_keys(&value, camel_to_snake), json!({"a_b": 2}));

        let value = json!({"a_b": 1, "aB": 2});
        assert_eq!(rename_keys(&value, snake_to_camel), json!({"aB": 2}));
    }

    #[test]
    fn test_collision_between_converted_keys_is_deterministic() {
        let lower = |k: &str| k.to_ascii_lowercase();
        let value = json!({"Ab": 1, "aB": 2});
        let first = rename_keys(&value, lower);
        let second = rename_keys(&value, lower);
        assert_eq!(first, second);
        assert_eq!(first.as_object().map(|m| m.len()), Some(1));
    }
}
