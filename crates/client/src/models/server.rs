//! Models for `server/info`.

use serde::{Deserialize, Serialize};

/// Server information, reduced to the version fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ServerInfo {
    #[serde(rename = "serverName", default)]
    pub server_name: String,
    /// Dotted version such as `9.1.2`.
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub build: Option<String>,
}
