//! Main Splunk REST API client and API methods.
//!
//! This module provides the primary [`SplunkClient`] for the setup tools. It
//! handles authentication and session renewal around the plain endpoint
//! functions in [`crate::endpoints`].
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `session`: Session token retrieval and login (private module)
//! - `context`, `server`: capability context and server version
//! - `macros`, `datamodels`, `indexes`, `tags`: setup-page resources
//! - `passwords`: stored credential methods
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Low-level session token storage (delegated to [`crate::auth::SessionManager`])
//!
//! # Invariants
//! - All API methods take `&self`, so independent calls can run concurrently
//!   against one client; the session manager sits behind an async mutex so
//!   concurrent callers share a single login.
//! - On 401/403 with session auth, the session is cleared and the call is
//!   retried once. API tokens never trigger that retry.

pub mod builder;
mod context;
mod datamodels;
mod indexes;
mod macros;
mod passwords;
mod server;
mod session;
mod tags;

use tokio::sync::Mutex;

use crate::auth::SessionManager;
use crate::metrics::MetricsCollector;

/// Wrap an async API call with one session renewal on 401/403.
///
/// ```ignore
/// retry_call!(self, __token, endpoints::some_endpoint(&self.http, &self.base_url, &__token, arg).await)
/// ```
///
/// The placeholder `__token` is bound to the current bearer token.
#[macro_export]
macro_rules! retry_call {
    ($self:expr, $token:ident, $call:expr) => {{
        let $token = $self.get_auth_token().await?;
        let result = $call;

        match result {
            Ok(data) => Ok(data),
            Err($crate::error::ClientError::ApiError { status, .. })
                if (status == 401 || status == 403) && !$self.is_api_token_auth() =>
            {
                ::tracing::debug!(
                    "Session rejected (status {}), clearing and re-authenticating...",
                    status
                );
                $self.clear_session().await;
                let $token = $self.get_auth_token().await?;
                $call
            }
            Err(e) => Err(e),
        }
    }};
}

/// Splunk REST API client.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use cim_client::{SplunkClient, AuthStrategy};
/// use secrecy::SecretString;
///
/// let client = SplunkClient::builder()
///     .base_url("https://localhost:8089".to_string())
///     .auth_strategy(AuthStrategy::ApiToken {
///         token: SecretString::new("my-token".to_string().into()),
///     })
///     .build()?;
/// ```
#[derive(Debug)]
pub struct SplunkClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) session_manager: Mutex<SessionManager>,
    pub(crate) api_token_auth: bool,
    pub(crate) max_retries: usize,
    pub(crate) session_ttl_seconds: u64,
    pub(crate) session_expiry_buffer_seconds: u64,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl SplunkClient {
    /// Create a new client builder.
    pub fn builder() -> builder::SplunkClientBuilder {
        builder::SplunkClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthStrategy;
    use crate::error::ClientError;
    use secrecy::SecretString;

    fn token_strategy() -> AuthStrategy {
        AuthStrategy::ApiToken {
            token: SecretString::new("test-token".to_string().into()),
        }
    }

    #[test]
    fn test_client_builder_with_api_token() {
        let client = SplunkClient::builder()
            .base_url("https://localhost:8089".to_string())
            .auth_strategy(token_strategy())
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "https://localhost:8089");
        assert!(client.is_api_token_auth());
    }

    #[test]
    fn test_client_builder_missing_base_url() {
        let client = SplunkClient::builder().auth_strategy(token_strategy()).build();
        assert!(matches!(client.unwrap_err(), ClientError::InvalidUrl(_)));
    }

    #[test]
    fn test_client_builder_missing_auth() {
        let client = SplunkClient::builder()
            .base_url("https://localhost:8089".to_string())
            .build();
        assert!(matches!(client.unwrap_err(), ClientError::AuthFailed(_)));
    }

    #[test]
    fn test_client_builder_normalizes_base_url() {
        let client = SplunkClient::builder()
            .base_url("https://localhost:8089//".to_string())
            .auth_strategy(token_strategy())
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "https://localhost:8089");
    }

    #[test]
    fn test_skip_verify_with_http_url_still_builds() {
        let client = SplunkClient::builder()
            .base_url("http://localhost:8089".to_string())
            .auth_strategy(token_strategy())
            .skip_verify(true)
            .build();

        assert!(client.is_ok());
    }
}
