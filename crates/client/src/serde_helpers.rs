//! Serde helpers for Splunk's inconsistent JSON typing.
//!
//! Responsibilities:
//! - Accept either JSON numbers or strings for numeric fields.
//! - Accept Splunk's many boolean spellings (`true`, `1`, `"0"`, `"false"`).
//! - Deserialize secret fields straight into `SecretString`.
//!
//! Explicitly does NOT handle:
//! - Higher-level semantics such as ranges or required fields.
//!
//! Invariants / assumptions:
//! - Splunk may return `"123"` or `123` for the same field depending on version.
//! - Errors never echo the raw value, since some fields carry secrets.

use secrecy::SecretString;
use serde::Deserialize;
use serde::de::Error as _;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum U64OrString {
    U64(u64),
    I64(i64),
    String(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BoolLike {
    Bool(bool),
    Number(i64),
    String(String),
}

pub fn opt_u64_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<U64OrString>::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(U64OrString::U64(v)) => Ok(Some(v)),
        Some(U64OrString::I64(v)) => Ok(Some(u64::try_from(v).map_err(D::Error::custom)?)),
        Some(U64OrString::String(s)) if s.trim().is_empty() => Ok(None),
        Some(U64OrString::String(s)) => Ok(Some(s.trim().parse::<u64>().map_err(D::Error::custom)?)),
    }
}

/// Lenient boolean: unknown spellings read as `false`.
pub fn bool_from_string_or_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<BoolLike>::deserialize(deserializer)?;
    Ok(match value {
        None => false,
        Some(BoolLike::Bool(b)) => b,
        Some(BoolLike::Number(n)) => n != 0,
        Some(BoolLike::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on" | "t" | "y"
        ),
    })
}

pub fn secret_from_string<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(SecretString::new(s.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_u64_from_string_or_number")]
        count: Option<u64>,
        #[serde(default, deserialize_with = "bool_from_string_or_bool")]
        flag: bool,
    }

    #[derive(Deserialize)]
    struct SecretProbe {
        #[serde(deserialize_with = "secret_from_string")]
        secret: SecretString,
    }

    #[test]
    fn test_numbers_from_strings_and_numbers() {
        let p: Probe = serde_json::from_str(r#"{"count": "42"}"#).unwrap();
        assert_eq!(p.count, Some(42));
        let p: Probe = serde_json::from_str(r#"{"count": 7}"#).unwrap();
        assert_eq!(p.count, Some(7));
        let p: Probe = serde_json::from_str(r#"{"count": ""}"#).unwrap();
        assert_eq!(p.count, None);
        let p: Probe = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(p.count, None);
        assert!(serde_json::from_str::<Probe>(r#"{"count": -1}"#).is_err());
    }

    #[test]
    fn test_bool_spellings() {
        for (raw, expected) in [
            (r#"true"#, true),
            (r#"false"#, false),
            (r#"1"#, true),
            (r#"0"#, false),
            (r#""1""#, true),
            (r#""0""#, false),
            (r#""True""#, true),
            (r#""no""#, false),
            (r#"null"#, false),
        ] {
            let p: Probe = serde_json::from_str(&format!(r#"{{"flag": {raw}}}"#)).unwrap();
            assert_eq!(p.flag, expected, "{raw}");
        }
    }

    #[test]
    fn test_secret_from_string() {
        let p: SecretProbe = serde_json::from_str(r#"{"secret": "abc"}"#).unwrap();
        assert_eq!(p.secret.expose_secret(), "abc");
    }
}
