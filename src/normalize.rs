//! Inbound normalization for job wire values
//!
//! The upstream producer emits explicit `null` for fields that are
//! semantically "off" or "empty". Two coercion rules resolve them:
//! - null-as-false for booleans
//! - null-as-empty-sequence for string sequences
//!
//! Both rules are total: they accept any JSON value and never fail.
//! The serde adapters in this module wrap them for `deserialize_with`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Resolves a wire boolean, treating `null` as `false`
///
/// Non-boolean values also resolve to `false`; a literal `false` is
/// `false`, never "absent".
pub fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        other => {
            tracing::debug!(value = %other, "non-boolean value coerced to false");
            false
        }
    }
}

/// Resolves a wire string sequence, treating `null` as empty
///
/// Non-string array elements are dropped. A non-array value resolves to
/// an empty sequence.
pub fn coerce_string_seq(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        Value::Null => Vec::new(),
        other => {
            tracing::debug!(value = %other, "non-array value coerced to empty sequence");
            Vec::new()
        }
    }
}

/// serde adapter for [`coerce_bool`]
pub fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_bool(&value))
}

/// serde adapter for [`coerce_string_seq`]
pub fn null_as_empty_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_string_seq(&value))
}

/// serde adapter for optional string sequences
///
/// Keeps `null` distinct from an empty list; arrays still drop non-string
/// elements.
pub fn null_as_none_strings<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(coerce_string_seq(&other)),
    })
}

/// serde adapter resolving `null` to the type's default
///
/// Used for record sequences and maps where elements must still decode
/// strictly.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serialization predicate for compact output of booleans
pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize, Debug)]
    struct Flags {
        #[serde(default, deserialize_with = "null_as_false")]
        debug: bool,
        #[serde(default, deserialize_with = "null_as_empty_strings")]
        dependencies: Vec<String>,
        #[serde(default, deserialize_with = "null_as_default")]
        counts: Vec<u32>,
    }

    #[test]
    fn test_coerce_bool_null_is_false() {
        assert!(!coerce_bool(&Value::Null));
    }

    #[test]
    fn test_coerce_bool_preserves_booleans() {
        assert!(coerce_bool(&json!(true)));
        assert!(!coerce_bool(&json!(false)));
    }

    #[test]
    fn test_coerce_bool_non_boolean_is_false() {
        assert!(!coerce_bool(&json!("true")));
        assert!(!coerce_bool(&json!(1)));
    }

    #[test]
    fn test_coerce_string_seq_null_is_empty() {
        assert!(coerce_string_seq(&Value::Null).is_empty());
    }

    #[test]
    fn test_coerce_string_seq_preserves_order() {
        assert_eq!(coerce_string_seq(&json!(["a", "b"])), vec!["a", "b"]);
    }

    #[test]
    fn test_coerce_string_seq_drops_non_strings() {
        let value = json!(["item1", 2, null, {"x": 1}, "item2", true]);
        assert_eq!(coerce_string_seq(&value), vec!["item1", "item2"]);
    }

    #[test]
    fn test_coerce_string_seq_scalar_is_empty() {
        assert!(coerce_string_seq(&json!("single")).is_empty());
    }

    #[test]
    fn test_adapters_with_nulls() {
        let flags: Flags =
            serde_json::from_value(json!({"debug": null, "dependencies": null, "counts": null}))
                .unwrap();
        assert!(!flags.debug);
        assert!(flags.dependencies.is_empty());
        assert!(flags.counts.is_empty());
    }

    #[test]
    fn test_adapters_with_missing_keys() {
        let flags: Flags = serde_json::from_value(json!({})).unwrap();
        assert!(!flags.debug);
        assert!(flags.dependencies.is_empty());
        assert!(flags.counts.is_empty());
    }

    #[test]
    fn test_adapters_with_values() {
        let flags: Flags = serde_json::from_value(
            json!({"debug": true, "dependencies": ["x", 3, "y"], "counts": [1, 2]}),
        )
        .unwrap();
        assert!(flags.debug);
        assert_eq!(flags.dependencies, vec!["x", "y"]);
        assert_eq!(flags.counts, vec![1, 2]);
    }

    #[test]
    fn test_null_as_default_still_strict_on_elements() {
        let result: Result<Flags, _> = serde_json::from_value(json!({"counts": ["one"]}));
        assert!(result.is_err());
    }

    #[test]
    fn test_null_as_none_strings() {
        #[derive(Deserialize)]
        struct Optional {
            #[serde(default, deserialize_with = "null_as_none_strings")]
            items: Option<Vec<String>>,
        }

        let parsed: Optional = serde_json::from_value(json!({"items": null})).unwrap();
        assert!(parsed.items.is_none());
        let parsed: Optional = serde_json::from_value(json!({})).unwrap();
        assert!(parsed.items.is_none());
        let parsed: Optional = serde_json::from_value(json!({"items": []})).unwrap();
        assert_eq!(parsed.items, Some(vec![]));
        let parsed: Optional = serde_json::from_value(json!({"items": ["a", 1]})).unwrap();
        assert_eq!(parsed.items, Some(vec!["a".to_string()]));
    }

    #[test]
    fn test_is_false() {
        assert!(is_false(&false));
        assert!(!is_false(&true));
    }
}
