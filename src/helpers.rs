use serde::{Deserialize, Serialize};

/// Serializes a value for storage in a JSON column.
pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

/// Reads an optional JSON column, treating empty or `null` text as absent.
pub fn from_optional_json<T: for<'de> Deserialize<'de>>(
    result: rusqlite::Result<String>,
) -> Option<T> {
    match result {
        Ok(s) if !s.is_empty() && s != "null" => serde_json::from_str(&s).ok(),
        _ => None,
    }
}
