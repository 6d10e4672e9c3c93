//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

use std::path::Path;

#[allow(unused_imports)]
pub use cim_client::endpoints;
#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use cim_client::{AuthStrategy, SplunkClient};
use secrecy::SecretString;

/// Load a JSON fixture by path relative to `fixtures/`.
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let full_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// Client against `server` using a static API token and no retries.
#[allow(dead_code)]
pub fn token_client(server: &MockServer) -> SplunkClient {
    SplunkClient::builder()
        .base_url(server.uri())
        .auth_strategy(AuthStrategy::ApiToken {
            token: SecretString::new("test-token".to_string().into()),
        })
        .max_retries(0)
        .build()
        .unwrap()
}

/// Client against `server` using username/password session auth.
#[allow(dead_code)]
pub fn session_client(server: &MockServer) -> SplunkClient {
    SplunkClient::builder()
        .base_url(server.uri())
        .auth_strategy(AuthStrategy::SessionToken {
            username: "admin".to_string(),
            password: SecretString::new("testpassword".to_string().into()),
        })
        .max_retries(0)
        .build()
        .unwrap()
}
