//! Authentication strategies and session token bookkeeping.
//!
//! Responsibilities:
//! - Hold the configured credentials for the client.
//! - Track the current session token and when it should be renewed.
//!
//! Does NOT handle:
//! - The login HTTP call (see `endpoints::login`).
//! - Deciding when to call login (see `client::session`).
//!
//! Invariants:
//! - API-token auth never carries a session token and never expires.
//! - Secrets are only ever held as `SecretString`, so `Debug` output is redacted.

use cim_config::constants::DEFAULT_EXPIRY_BUFFER_SECS;
use secrecy::{ExposeSecret, SecretString};
use std::time::{Duration, Instant};

/// Strategy for authenticating with Splunk.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// Username and password; the client logs in and renews session keys.
    SessionToken {
        username: String,
        password: SecretString,
    },
    /// Static bearer token; no session management.
    ApiToken { token: SecretString },
}

impl From<&cim_config::AuthStrategy> for AuthStrategy {
    fn from(strategy: &cim_config::AuthStrategy) -> Self {
        match strategy {
            cim_config::AuthStrategy::SessionToken { username, password } => Self::SessionToken {
                username: username.clone(),
                password: password.clone(),
            },
            cim_config::AuthStrategy::ApiToken { token } => Self::ApiToken {
                token: token.clone(),
            },
        }
    }
}

#[derive(Debug, Clone)]
struct SessionToken {
    value: SecretString,
    expires_at: Option<Instant>,
    expiry_buffer: Duration,
}

impl SessionToken {
    fn new(value: SecretString, ttl_seconds: Option<u64>, expiry_buffer_seconds: Option<u64>) -> Self {
        Self {
            value,
            expires_at: ttl_seconds.map(|ttl| Instant::now() + Duration::from_secs(ttl)),
            expiry_buffer: Duration::from_secs(
                expiry_buffer_seconds.unwrap_or(DEFAULT_EXPIRY_BUFFER_SECS),
            ),
        }
    }

    fn remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|exp| exp.saturating_duration_since(Instant::now()))
    }

    fn is_expired(&self) -> bool {
        self.remaining().is_some_and(|r| r.is_zero())
    }

    /// True when the token is inside the refresh window before expiry.
    fn will_expire_soon(&self) -> bool {
        self.remaining().is_some_and(|r| r < self.expiry_buffer)
    }
}

/// Manages Splunk session tokens with proactive renewal.
#[derive(Debug)]
pub struct SessionManager {
    auth_strategy: AuthStrategy,
    session_token: Option<SessionToken>,
}

impl SessionManager {
    /// Create a new session manager with the given auth strategy.
    pub fn new(strategy: AuthStrategy) -> Self {
        Self {
            auth_strategy: strategy,
            session_token: None,
        }
    }

    /// Get the configured auth strategy.
    pub fn strategy(&self) -> &AuthStrategy {
        &self.auth_strategy
    }

    /// Check if we're using API token auth (no session management needed).
    pub fn is_api_token(&self) -> bool {
        matches!(self.auth_strategy, AuthStrategy::ApiToken { .. })
    }

    /// Name used in error messages; `api-token` for token auth.
    pub fn principal(&self) -> &str {
        match &self.auth_strategy {
            AuthStrategy::SessionToken { username, .. } => username,
            AuthStrategy::ApiToken { .. } => "api-token",
        }
    }

    /// Get the bearer token for API requests, if one is available.
    pub fn get_bearer_token(&self) -> Option<&str> {
        match &self.auth_strategy {
            AuthStrategy::ApiToken { token } => Some(token.expose_secret()),
            AuthStrategy::SessionToken { .. } => {
                self.session_token.as_ref().map(|t| t.value.expose_secret())
            }
        }
    }

    /// Store a session key received from a login response.
    ///
    /// `ttl_seconds` of `None` means the key never expires locally.
    pub fn set_session_token(
        &mut self,
        token: String,
        ttl_seconds: Option<u64>,
        expiry_buffer_seconds: Option<u64>,
    ) {
        self.session_token = Some(SessionToken::new(
            SecretString::new(token.into()),
            ttl_seconds,
            expiry_buffer_seconds,
        ));
    }

    fn check_session(&self, check: impl FnOnce(&SessionToken) -> bool) -> bool {
        if self.is_api_token() {
            return false;
        }
        self.session_token.as_ref().map(check).unwrap_or(true)
    }

    /// True when session auth has no usable key.
    pub fn is_session_expired(&self) -> bool {
        self.check_session(|t| t.is_expired())
    }

    /// True when session auth should log in again before the next call.
    pub fn session_expires_soon(&self) -> bool {
        self.check_session(|t| t.will_expire_soon())
    }

    /// Drop the current session key, forcing a new login.
    pub fn clear_session(&mut self) {
        self.session_token = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cim_config::constants::DEFAULT_SESSION_TTL_SECS;

    fn session_strategy() -> AuthStrategy {
        AuthStrategy::SessionToken {
            username: "admin".to_string(),
            password: SecretString::new("pass".to_string().into()),
        }
    }

    #[test]
    fn test_api_token_bypasses_session() {
        let manager = SessionManager::new(AuthStrategy::ApiToken {
            token: SecretString::new("test-token".to_string().into()),
        });
        assert!(manager.is_api_token());
        assert_eq!(manager.get_bearer_token(), Some("test-token"));
        assert!(!manager.is_session_expired());
        assert!(!manager.session_expires_soon());
        assert_eq!(manager.principal(), "api-token");
    }

    #[test]
    fn test_session_token_without_ttl_never_expires() {
        let mut manager = SessionManager::new(session_strategy());
        assert!(manager.get_bearer_token().is_none());
        assert!(manager.is_session_expired());

        manager.set_session_token("session-key".to_string(), None, None);
        assert_eq!(manager.get_bearer_token(), Some("session-key"));
        assert!(!manager.is_session_expired());
        assert!(!manager.session_expires_soon());
    }

    #[test]
    fn test_ttl_inside_buffer_expires_soon() {
        let mut manager = SessionManager::new(session_strategy());
        manager.set_session_token("k".to_string(), Some(30), Some(60));
        assert!(!manager.is_session_expired());
        assert!(manager.session_expires_soon());
    }

    #[test]
    fn test_clear_session() {
        let mut manager = SessionManager::new(session_strategy());
        manager.set_session_token("k".to_string(), Some(DEFAULT_SESSION_TTL_SECS), None);
        assert!(!manager.session_expires_soon());
        manager.clear_session();
        assert!(manager.get_bearer_token().is_none());
        assert_eq!(manager.principal(), "admin");
    }

    #[test]
    fn test_secrets_not_exposed_in_debug() {
        let strategy = AuthStrategy::SessionToken {
            username: "admin".to_string(),
            password: SecretString::new("secret-password-45678".to_string().into()),
        };
        let mut manager = SessionManager::new(strategy.clone());
        manager.set_session_token("session-secret-123".to_string(), None, None);

        let strategy_debug = format!("{:?}", strategy);
        assert!(!strategy_debug.contains("secret-password-45678"));
        assert!(strategy_debug.contains("admin"));

        let manager_debug = format!("{:?}", manager);
        assert!(!manager_debug.contains("session-secret-123"));
    }

    #[test]
    fn test_from_config_strategy() {
        let config_strategy = cim_config::AuthStrategy::ApiToken {
            token: SecretString::new("tok".to_string().into()),
        };
        let strategy = AuthStrategy::from(&config_strategy);
        assert!(matches!(strategy, AuthStrategy::ApiToken { .. }));
    }
}
