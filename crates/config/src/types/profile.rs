//! Profile configuration types.
//!
//! Responsibilities:
//! - Define `ProfileConfig` for storing named connection profiles.
//! - Define `ConfigFile`, the on-disk JSON document holding all profiles.
//!
//! Does NOT handle:
//! - Profile loading or merging (see `loader` module).
//!
//! Invariants:
//! - All fields are optional to allow partial profile definitions.
//! - Unknown fields are ignored so older binaries can read newer files.

use std::collections::BTreeMap;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::types::auth::opt_secret_string;

/// Profile configuration for storing named connection profiles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Base URL of the Splunk server
    pub base_url: Option<String>,
    /// Username for session authentication
    pub username: Option<String>,
    /// Password for session authentication
    #[serde(with = "opt_secret_string")]
    pub password: Option<SecretString>,
    /// API token for bearer authentication
    #[serde(with = "opt_secret_string")]
    pub api_token: Option<SecretString>,
    /// Whether to skip TLS verification
    pub skip_verify: Option<bool>,
    /// Connection timeout in seconds
    pub timeout_seconds: Option<u64>,
    /// Maximum number of retries for failed requests
    pub max_retries: Option<usize>,
    /// Session time-to-live in seconds
    pub session_ttl_seconds: Option<u64>,
    /// App namespace override
    pub app: Option<String>,
    /// Owner namespace override
    pub owner: Option<String>,
    /// Credential realm override
    pub realm: Option<String>,
    /// Whitelist display length limit override
    pub max_display_count: Option<usize>,
}

/// Root of the JSON config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub profiles: BTreeMap<String, ProfileConfig>,
}
