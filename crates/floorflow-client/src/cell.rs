//! Lenient cell decoding.
//!
//! The store hands back whatever the sheet holds: strings, numbers,
//! booleans or null. Everything is normalised to text here so the row
//! types above stay `Option<String>`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Renders a cell as text. Null and the empty string are `None`.
///
/// Whole numbers render without a fractional part, so a serial of `12`
/// stored as `12.0` reads back as `"12"`.
pub fn cell_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (None, Some(u), _) => u.to_string(),
            (None, None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{f:.0}")
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    };
    if text.is_empty() { None } else { Some(text) }
}

/// `deserialize_with` helper for optional text columns.
pub fn optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(cell_text))
}

/// `deserialize_with` helper for required text columns; missing is empty.
pub fn required<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional(deserializer)?.unwrap_or_default())
}
