//! Data model configuration models for `data/models`.
//!
//! Responsibilities:
//! - Carry the raw content attribute bag of a data model entry.
//!
//! Non-responsibilities:
//! - Does not interpret `acceleration.*` keys; the setup crate owns that.
//!
//! Invariants:
//! - `content` preserves every key Splunk returned, in order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A data model's configuration as returned by `data/models`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DataModelConfig {
    /// Data model name, e.g. `Authentication`.
    #[serde(default)]
    pub name: String,
    /// Raw content attributes (acceleration settings, tags whitelist, eai metadata).
    #[serde(flatten)]
    pub content: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_preserves_dotted_keys() {
        let config: DataModelConfig = serde_json::from_str(
            r#"{"acceleration": true, "acceleration.earliest_time": "-1y", "eai:appName": "Splunk_SA_CIM"}"#,
        )
        .unwrap();
        assert_eq!(config.name, "");
        assert_eq!(config.content.get("acceleration"), Some(&Value::Bool(true)));
        assert_eq!(
            config.content.get("acceleration.earliest_time").and_then(Value::as_str),
            Some("-1y")
        );
        assert_eq!(config.content.keys().next().map(String::as_str), Some("acceleration"));
    }
}
