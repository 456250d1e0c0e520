//! Loose coercion helpers for untyped JSON payloads.
//!
//! Inbound list responses and decoded hashes are not trusted to carry the
//! right shapes. These helpers read a `serde_json::Value` the permissive way
//! and fall back to an empty/zero value instead of failing.

#[cfg(test)]
#[path = "json_test.rs"]
mod json_test;

use serde_json::{Map, Value};

/// Object view of `value`, or an empty map when it is not an object.
#[must_use]
pub fn object_of(value: Option<&Value>) -> Map<String, Value> {
    match value {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    }
}

/// Array view of `value`, or an empty vector when it is not an array.
#[must_use]
pub fn array_of(value: Option<&Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}

/// Integer view of `value`.
///
/// Accepts JSON integers and floats with no fractional part; everything else
/// (strings, fractional numbers, missing) yields `None`.
#[must_use]
pub fn integer_of(value: Option<&Value>) -> Option<i64> {
    let Some(Value::Number(number)) = value else {
        return None;
    };
    if let Some(n) = number.as_i64() {
        return Some(n);
    }
    number.as_f64().and_then(whole_f64)
}

#[allow(clippy::cast_possible_truncation)]
fn whole_f64(f: f64) -> Option<i64> {
    // Beyond 2^53 floats stop being exact integers.
    (f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0).then_some(f as i64)
}

/// Positive integer view of `value`, `None` for zero, negatives, or non-integers.
#[must_use]
pub fn positive_of(value: Option<&Value>) -> Option<u64> {
    integer_of(value)
        .filter(|n| *n > 0)
        .and_then(|n| u64::try_from(n).ok())
}

/// Counter view used for response metadata: non-negative integer or `0`.
#[must_use]
pub fn count_of(value: Option<&Value>) -> u64 {
    integer_of(value)
        .and_then(|n| u64::try_from(n).ok())
        .unwrap_or(0)
}

/// JavaScript-style truthiness: `null`, `false`, `0`, `NaN`, and `""` are falsy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
