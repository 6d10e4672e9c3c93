//! Credential store (`storage/passwords`) endpoints.
//!
//! Responsibilities:
//! - Create, read and delete a stored credential in an app namespace.
//!
//! Does NOT handle:
//! - Conflict recovery (the caller decides whether to delete and recreate).
//!
//! Invariants:
//! - Credentials always live under the `nobody` owner.
//! - Passwords are only sent as form fields, never in URLs or logs.

use reqwest::Client;
use tracing::debug;

use crate::endpoints::request::{parse_json, send_request_with_retry};
use crate::endpoints::{encode_path_segment, namespaced_url};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{SplunkListResponse, StoredPassword};
use crate::name_merge::named_entries;

const CREDENTIAL_OWNER: &str = "nobody";

/// Entity name for a credential: `realm:name:`.
pub fn credential_entity(realm: &str, name: &str) -> String {
    format!("{realm}:{name}:")
}

fn entity_url(base_url: &str, app: &str, realm: &str, name: &str) -> String {
    namespaced_url(
        base_url,
        CREDENTIAL_OWNER,
        app,
        &format!(
            "storage/passwords/{}",
            encode_path_segment(&credential_entity(realm, name))
        ),
    )
}

/// Create a credential. A 409 surfaces as [`ClientError::Conflict`].
#[allow(clippy::too_many_arguments)]
pub async fn create_password(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    app: &str,
    realm: &str,
    name: &str,
    password: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<()> {
    debug!(app, realm, name, "Creating stored credential");

    let url = namespaced_url(base_url, CREDENTIAL_OWNER, app, "storage/passwords");
    let builder = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", auth_token))
        .query(&[("output_mode", "json")])
        .form(&[("name", name), ("password", password), ("realm", realm)]);

    send_request_with_retry(
        builder,
        max_retries,
        "/servicesNS/storage/passwords",
        "POST",
        metrics,
    )
    .await?;
    Ok(())
}

/// Fetch the entries stored under `realm:name:`.
///
/// Returns every entry the server sent; 404 maps to [`ClientError::NotFound`].
#[allow(clippy::too_many_arguments)]
pub async fn get_password(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    app: &str,
    realm: &str,
    name: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<Vec<StoredPassword>> {
    debug!(app, realm, name, "Fetching stored credential");

    let builder = client
        .get(entity_url(base_url, app, realm, name))
        .header("Authorization", format!("Bearer {}", auth_token))
        .query(&[("output_mode", "json")]);

    let response = send_request_with_retry(
        builder,
        max_retries,
        "/servicesNS/storage/passwords/{name}",
        "GET",
        metrics,
    )
    .await
    .map_err(|e| not_found_as(e, realm, name))?;

    let resp: SplunkListResponse<StoredPassword> = parse_json(response, "credential").await?;
    Ok(named_entries(resp.entry))
}

/// Delete the credential stored under `realm:name:`.
#[allow(clippy::too_many_arguments)]
pub async fn delete_password(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    app: &str,
    realm: &str,
    name: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<()> {
    debug!(app, realm, name, "Deleting stored credential");

    let builder = client
        .delete(entity_url(base_url, app, realm, name))
        .header("Authorization", format!("Bearer {}", auth_token))
        .query(&[("output_mode", "json")]);

    send_request_with_retry(
        builder,
        max_retries,
        "/servicesNS/storage/passwords/{name}",
        "DELETE",
        metrics,
    )
    .await
    .map_err(|e| not_found_as(e, realm, name))?;
    Ok(())
}

fn not_found_as(error: ClientError, realm: &str, name: &str) -> ClientError {
    match error {
        ClientError::ApiError { status: 404, .. } => {
            ClientError::NotFound(format!("credential '{}'", credential_entity(realm, name)))
        }
        other => other,
    }
}
