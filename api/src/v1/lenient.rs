//! Tolerant decoding of collections read back from the store.
//!
//! The store may hand back a keyed collection either as an object or, when
//! its keys happen to be small integers, as an array with `null` holes.
//! Both shapes decode to the same ordered list of entries.

use std::cmp::Ordering;

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

/// Flattens an object or array into `(key, value)` pairs.
///
/// `null` entries are dropped. Integer-like keys come first in numeric
/// order, followed by the remaining keys in their original order. Any other
/// value yields no entries.
pub fn entries(value: Value) -> Vec<(String, Value)> {
    let mut entries: Vec<(String, Value)> = match value {
        Value::Object(map) => map.into_iter().collect(),
        Value::Array(items) => (items.into_iter().enumerate())
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        _ => Vec::new(),
    };

    entries.retain(|(_, value)| !value.is_null());
    entries.sort_by(|(a, _), (b, _)| key_order(a, b));

    entries
}

/// Orders integer-like keys numerically ahead of all other keys.
pub fn key_order(a: &str, b: &str) -> Ordering {
    match (array_index(a), array_index(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn array_index(key: &str) -> Option<u32> {
    let index = key.parse::<u32>().ok()?;
    (index.to_string() == key).then_some(index)
}

/// Scalars in their text form. Anything else has none.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(string) => Some(string.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Deserializes a string field, accepting numbers and booleans as text.
/// `null` and other values read as the empty string.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(&Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Like [`string`], but `null` and other values read as `None`.
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(&Value::deserialize(deserializer)?))
}

/// Deserializes a list that may arrive as an array or as an index-keyed
/// object, skipping elements that do not decode as `T`.
pub fn seq_or_map<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;

    Ok(entries(value)
        .into_iter()
        .filter_map(|(_, value)| serde_json::from_value(value).ok())
        .collect())
}
