//! Client-level session management helpers.
//!
//! # What this module does NOT handle:
//! - Token storage and expiry tracking (see [`SessionManager`](crate::auth::SessionManager))
//! - The login HTTP call itself (see `endpoints::login`)
//!
//! # Invariants
//! - API token authentication never triggers login
//! - Session authentication refreshes proactively inside the expiry buffer
//! - The session lock is held across login, so concurrent callers log in once

use secrecy::ExposeSecret;

use crate::auth::AuthStrategy;
use crate::client::SplunkClient;
use crate::endpoints;
use crate::error::{ClientError, Result};

impl SplunkClient {
    /// Get the current bearer token, logging in if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthFailed`] if login fails.
    /// Returns [`ClientError::SessionExpired`] if no valid token is available.
    pub(crate) async fn get_auth_token(&self) -> Result<String> {
        let mut session = self.session_manager.lock().await;

        if session.is_session_expired() || session.session_expires_soon() {
            let (username, password) = match session.strategy() {
                AuthStrategy::SessionToken { username, password } => {
                    (username.clone(), password.clone())
                }
                AuthStrategy::ApiToken { .. } => {
                    return Err(ClientError::AuthFailed(
                        "Cannot login with API token auth strategy".to_string(),
                    ));
                }
            };
            let token = endpoints::login(
                &self.http,
                &self.base_url,
                &username,
                password.expose_secret(),
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await?;
            session.set_session_token(
                token,
                Some(self.session_ttl_seconds),
                Some(self.session_expiry_buffer_seconds),
            );
        }

        session
            .get_bearer_token()
            .map(|s| s.to_string())
            .ok_or_else(|| ClientError::SessionExpired {
                username: session.principal().to_string(),
            })
    }

    /// Check if the client is using API token authentication.
    pub fn is_api_token_auth(&self) -> bool {
        self.api_token_auth
    }

    /// Drop the current session key so the next call logs in again.
    pub(crate) async fn clear_session(&self) {
        self.session_manager.lock().await.clear_session();
    }

    /// Log in eagerly and verify the credentials.
    ///
    /// A no-op for API token auth.
    pub async fn login(&self) -> Result<()> {
        if self.api_token_auth {
            return Ok(());
        }
        self.clear_session().await;
        self.get_auth_token().await.map(|_| ())
    }
}
