//! Tolerant numeric decoding for snapshot fields
//!
//! Quote payloads are not consistent about numeric types: the same field can
//! arrive as a JSON number, as a string with thousands separators, or as
//! `null`. Anything that does not parse is treated as missing.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a JSON value into a float, accepting numbers and numeric strings
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.replace(',', "").trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// A snapshot value worth keeping: finite and non-zero
pub fn usable(value: f64) -> bool {
    value.is_finite() && value != 0.0
}

/// Serde adapter for `Option<f64>` fields fed by [`parse_number`]
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(parse_number))
}
