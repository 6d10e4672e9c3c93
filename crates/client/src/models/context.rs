//! Models for `authentication/current-context`.

use serde::{Deserialize, Serialize};

/// The authenticated caller's identity and effective capabilities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CurrentContext {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

impl CurrentContext {
    /// Whether the caller holds `capability`.
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}
