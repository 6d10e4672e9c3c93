//! Shared test utilities for cim-setup integration tests.
//!
//! Invariants / Assumptions:
//! - Commands are hermetic: no `.env`, no host Splunk settings, no retries.
//! - `SPLUNK_API_TOKEN` is set to "test-token" unless overridden.

#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const NS: &str = "/servicesNS/nobody/Splunk_SA_CIM";

/// Returns a hermetic `cim-setup` command pointed at `base_url`.
pub fn cim_setup_cmd(base_url: &str) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("cim-setup");
    cmd.env("DOTENV_DISABLED", "1")
        .env("SPLUNK_API_TOKEN", "test-token")
        .env("SPLUNK_BASE_URL", base_url)
        .env("SPLUNK_MAX_RETRIES", "0")
        .env_remove("SPLUNK_USERNAME")
        .env_remove("SPLUNK_PASSWORD")
        .env_remove("SPLUNK_PROFILE")
        .env_remove("SPLUNK_CONFIG_PATH")
        .env_remove("CIM_SETUP_APP")
        .env_remove("CIM_SETUP_REALM")
        .env_remove("CIM_SETUP_API_KEY");
    cmd
}

pub async fn mount_get(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_capability(server: &MockServer, granted: bool) {
    let capabilities = if granted {
        vec!["accelerate_datamodel", "search"]
    } else {
        vec!["search"]
    };
    mount_get(
        server,
        "/services/authentication/current-context",
        json!({"entry": [{"name": "admin", "content": {
            "username": "admin", "capabilities": capabilities
        }}]}),
    )
    .await;
}

/// Mount every asset the setup form loads (Splunk 9.1, two data models).
pub async fn mount_form(server: &MockServer) {
    mount_capability(server, true).await;
    mount_get(
        server,
        "/services/server/info",
        json!({"entry": [{"name": "server-info", "content": {"version": "9.1.2"}}]}),
    )
    .await;
    mount_get(
        server,
        &format!("{NS}/admin/macros"),
        json!({"entry": [
            {"name": "cim_Authentication_indexes", "content": {"definition": "(index=main OR index=security)"}},
            {"name": "cim_Network_Traffic_indexes", "content": {"definition": "()"}}
        ]}),
    )
    .await;
    mount_get(
        server,
        "/services/data/indexes",
        json!({"entry": [{"name": "main", "content": {}}, {"name": "security", "content": {}}]}),
    )
    .await;
    mount_get(
        server,
        &format!("{NS}/data/models"),
        json!({"entry": [
            {"name": "Authentication", "content": {
                "acceleration": true,
                "acceleration.earliest_time": "-1y",
                "acceleration.max_time": 3600,
                "eai:appName": "Splunk_SA_CIM"
            }},
            {"name": "Network_Traffic", "content": {
                "acceleration": "0",
                "eai:appName": "Splunk_SA_CIM"
            }}
        ]}),
    )
    .await;
    mount_get(
        server,
        "/services/search/tags",
        json!({"entry": [{"name": "authentication", "content": {}}]}),
    )
    .await;
}
