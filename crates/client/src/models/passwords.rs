//! Models for `storage/passwords`.
//!
//! Invariants:
//! - `clear_password` never appears in `Debug` output.

use secrecy::SecretString;
use serde::Deserialize;

use crate::serde_helpers::secret_from_string;

/// A stored credential, keyed by `realm:username:`.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredPassword {
    /// Entity name, e.g. `cam_queue:my_key:`.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub realm: Option<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default = "empty_secret", deserialize_with = "secret_from_string")]
    pub clear_password: SecretString,
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_clear_password_redacted_in_debug() {
        let stored: StoredPassword = serde_json::from_str(
            r#"{"realm":"cam_queue","username":"k","clear_password":"hunter2"}"#,
        )
        .unwrap();
        assert_eq!(stored.clear_password.expose_secret(), "hunter2");
        assert!(!format!("{:?}", stored).contains("hunter2"));
    }

    #[test]
    fn test_missing_clear_password_is_empty() {
        let stored: StoredPassword = serde_json::from_str(r#"{"username":"k"}"#).unwrap();
        assert!(stored.clear_password.expose_secret().is_empty());
    }
}
