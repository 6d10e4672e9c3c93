//! Splunk-style boolean normalization.
//!
//! Splunk stores flags in several spellings depending on how they were
//! written: JSON booleans, `0`/`1` numbers, and strings such as `"true"`,
//! `"1"`, `"yes"` or `"off"`. Every comparison and validation in this crate
//! goes through [`normalize_boolean`] so there is exactly one table.
//!
//! Invariants:
//! - String matching is case-insensitive but not whitespace-tolerant.
//! - Anything outside the table is `None`, never a guess.

use serde_json::Value;

const TRUE_WORDS: [&str; 4] = ["true", "1", "yes", "on"];
const FALSE_WORDS: [&str; 4] = ["false", "0", "no", "off"];

/// Normalize a Splunk attribute value to a boolean.
///
/// Returns `None` for values that are not a recognized boolean spelling,
/// including `null` and missing values.
pub fn normalize_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(v) if v == 1.0 => Some(true),
            Some(v) if v == 0.0 => Some(false),
            _ => None,
        },
        Value::String(s) => normalize_boolean_str(s),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// String form of [`normalize_boolean`].
pub fn normalize_boolean_str(raw: &str) -> Option<bool> {
    let lowered = raw.to_ascii_lowercase();
    if TRUE_WORDS.contains(&lowered.as_str()) {
        Some(true)
    } else if FALSE_WORDS.contains(&lowered.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Canonical wire form Splunk accepts for a flag.
pub fn flag_value(enabled: bool) -> Value {
    Value::from(if enabled { 1 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_true_spellings() {
        for v in [json!(true), json!(1), json!("1"), json!("yes"), json!("On"), json!("TRUE")] {
            assert_eq!(normalize_boolean(&v), Some(true), "{v}");
        }
    }

    #[test]
    fn test_false_spellings() {
        for v in [json!(false), json!(0), json!(0.0), json!("0"), json!("no"), json!("OFF"), json!("False")] {
            assert_eq!(normalize_boolean(&v), Some(false), "{v}");
        }
    }

    #[test]
    fn test_unrecognized_is_none() {
        for v in [json!(null), json!(2), json!(""), json!(" true"), json!("t"), json!([]), json!({})] {
            assert_eq!(normalize_boolean(&v), None, "{v}");
        }
    }

    #[test]
    fn test_flag_value() {
        assert_eq!(flag_value(true), json!(1));
        assert_eq!(flag_value(false), json!(0));
    }
}
