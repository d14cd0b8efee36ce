//! Permissive deserialization for optional definition values
//!
//! Model definitions come from hand-written drafts. A value of the wrong shape
//! is treated as absent so the documented default applies.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Deserialize an optional value, mapping a type mismatch to `None`
///
/// Use with `#[serde(default, deserialize_with = "lenient")]`.
///
/// # Errors
///
/// Only fails when the input is not a self-describing value at all.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`], but falls back to `T::default()`
///
/// # Errors
///
/// Only fails when the input is not a self-describing value at all.
pub fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Whether a loosely-typed value counts as "on"
///
/// `false`, `null`, `0`, `""`, `"0"` and empty collections are falsy.
#[must_use]
pub fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > f64::EPSILON),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient")]
        length: Option<u32>,
        #[serde(default, deserialize_with = "lenient")]
        rules: Option<Vec<String>>,
        #[serde(default, deserialize_with = "lenient_or_default")]
        tags: Vec<String>,
    }

    #[test]
    fn test_wrong_type_becomes_none() {
        let probe: Probe = serde_json::from_value(json!({
            "length": "long",
            "rules": ["required", 5],
        }))
        .unwrap();
        assert_eq!(probe.length, None);
        assert_eq!(probe.rules, None);
        assert!(probe.tags.is_empty());
    }

    #[test]
    fn test_wrong_type_falls_back_to_default() {
        let probe: Probe = serde_json::from_value(json!({ "tags": {"a": 1} })).unwrap();
        assert!(probe.tags.is_empty());

        let probe: Probe = serde_json::from_value(json!({ "tags": ["a"] })).unwrap();
        assert_eq!(probe.tags, vec!["a".to_string()]);
    }

    #[test]
    fn test_matching_type_is_kept() {
        let probe: Probe = serde_yaml::from_str("length: 12\nrules: [string]\n").unwrap();
        assert_eq!(probe.length, Some(12));
        assert_eq!(probe.rules, Some(vec!["string".to_string()]));
    }

    #[test]
    fn test_missing_is_none() {
        let probe: Probe = serde_json::from_value(json!({})).unwrap();
        assert_eq!(probe.length, None);
        assert_eq!(probe.rules, None);
    }

    #[test]
    fn test_truthiness() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("yes")));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("0")));
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!([])));
    }
}
