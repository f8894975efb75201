//! Prioritized-alias field lookups over loosely shaped upstream JSON.
//!
//! Upstream payloads spell the same field several ways. Each helper takes the
//! aliases in priority order and returns the first one whose value has the
//! expected shape; aliases holding null or a wrongly typed value are skipped.

use serde_json::Value;

/// First alias holding a non-empty string.
pub fn lookup_str<'a>(obj: &'a Value, aliases: &[&str]) -> Option<&'a str> {
    aliases
        .iter()
        .filter_map(|key| obj.get(key).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
}

/// First alias holding a string, or a localized `{"default": "..."}` object.
pub fn lookup_localized<'a>(obj: &'a Value, aliases: &[&str]) -> Option<&'a str> {
    aliases
        .iter()
        .filter_map(|key| obj.get(key).and_then(localized_str))
        .find(|s| !s.trim().is_empty())
}

/// First alias holding an integer.
pub fn lookup_i64(obj: &Value, aliases: &[&str]) -> Option<i64> {
    aliases
        .iter()
        .filter_map(|key| obj.get(key))
        .find_map(Value::as_i64)
}

/// First alias holding any JSON number.
pub fn lookup_f64(obj: &Value, aliases: &[&str]) -> Option<f64> {
    aliases
        .iter()
        .filter_map(|key| obj.get(key))
        .find_map(Value::as_f64)
}

/// Non-negative counter; absent or malformed counts read as zero.
pub fn lookup_count(obj: &Value, aliases: &[&str]) -> u32 {
    lookup_i64(obj, aliases)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}

/// First alias holding a string or number, rendered as a string.
pub fn lookup_id(obj: &Value, aliases: &[&str]) -> Option<String> {
    aliases.iter().filter_map(|key| obj.get(key)).find_map(|v| match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// `"TOR"` or `{"default": "TOR", ...}`.
pub fn localized_str(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => map.get("default").and_then(Value::as_str),
        _ => None,
    }
}

/// Walk nested objects by key.
pub fn nested<'a>(obj: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(obj, |cur, key| cur.get(key))
}
