//! Connection configuration types.
//!
//! Responsibilities:
//! - Define connection settings (URL, TLS verification, timeouts, retries).
//! - Define the main `Config` structure combining connection, auth and setup target.
//! - Provide serialization helpers for `Duration`.
//!
//! Does NOT handle:
//! - Configuration loading from files/env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - All duration fields are serialized as seconds (integers).
//! - Default values come from `crate::constants`, not magic numbers.

use crate::constants::{
    DEFAULT_EXPIRY_BUFFER_SECS, DEFAULT_MAX_RETRIES, DEFAULT_SESSION_TTL_SECS, DEFAULT_TIMEOUT_SECS,
};
use crate::types::auth::{AuthConfig, AuthStrategy};
use crate::types::setup::SetupTarget;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Connection configuration for Splunk server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the Splunk management port (e.g., https://localhost:8089)
    pub base_url: String,
    /// Whether to skip TLS verification (for self-signed certificates)
    pub skip_verify: bool,
    /// Request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Maximum number of retries for failed requests
    pub max_retries: usize,
    /// Buffer time before session expiry to proactively refresh tokens (in seconds)
    #[serde(default = "default_session_expiry_buffer")]
    pub session_expiry_buffer_seconds: u64,
    /// Session time-to-live in seconds
    #[serde(default = "default_session_ttl")]
    pub session_ttl_seconds: u64,
}

pub(crate) fn default_session_expiry_buffer() -> u64 {
    DEFAULT_EXPIRY_BUFFER_SECS
}

pub(crate) fn default_session_ttl() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}

impl ConnectionConfig {
    /// Connection settings for `base_url` with every other value defaulted.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            session_expiry_buffer_seconds: default_session_expiry_buffer(),
            session_ttl_seconds: default_session_ttl(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Authentication settings
    pub auth: AuthConfig,
    /// Which add-on namespace the setup tools operate on
    #[serde(default)]
    pub setup: SetupTarget,
}

impl Config {
    /// Create a new config with the specified base URL and API token.
    pub fn with_api_token(base_url: String, token: SecretString) -> Self {
        Self {
            connection: ConnectionConfig::with_base_url(base_url),
            auth: AuthConfig {
                strategy: AuthStrategy::ApiToken { token },
            },
            setup: SetupTarget::default(),
        }
    }

    /// Create a new config with the specified base URL and username/password.
    pub fn with_session_token(base_url: String, username: String, password: SecretString) -> Self {
        Self {
            connection: ConnectionConfig::with_base_url(base_url),
            auth: AuthConfig {
                strategy: AuthStrategy::SessionToken { username, password },
            },
            setup: SetupTarget::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_serialized_as_seconds() {
        let config = Config::with_api_token(
            "https://localhost:8089".to_string(),
            SecretString::new("t".to_string().into()),
        );
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["connection"]["timeout"], DEFAULT_TIMEOUT_SECS);
        assert_eq!(json["setup"]["app"], "Splunk_SA_CIM");
    }

    #[test]
    fn test_missing_session_fields_use_defaults() {
        let json = serde_json::json!({
            "base_url": "https://splunk:8089",
            "skip_verify": true,
            "timeout": 10,
            "max_retries": 1
        });
        let conn: ConnectionConfig = serde_json::from_value(json).unwrap();
        assert_eq!(conn.timeout, Duration::from_secs(10));
        assert_eq!(conn.session_ttl_seconds, DEFAULT_SESSION_TTL_SECS);
        assert_eq!(conn.session_expiry_buffer_seconds, DEFAULT_EXPIRY_BUFFER_SECS);
    }
}
