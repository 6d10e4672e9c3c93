//! Data model configuration REST API endpoints.
//!
//! Responsibilities:
//! - List data model configurations with their raw content attributes.
//! - Post changed acceleration attributes back.
//!
//! Does NOT handle:
//! - Auth retry (see client module).
//! - Deciding which attributes are editable (see the setup crate).

use reqwest::Client;
use tracing::debug;

use crate::endpoints::request::{get_list, send_request_with_retry};
use crate::endpoints::{encode_path_segment, namespaced_url};
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::DataModelConfig;

/// List data model configurations in `owner`/`app` (`count=-1`).
pub async fn list_datamodel_configs(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    owner: &str,
    app: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<Vec<DataModelConfig>> {
    debug!(app, "Listing data model configurations");

    let url = namespaced_url(base_url, owner, app, "data/models");
    get_list(
        client,
        &url,
        auth_token,
        &[("count", "-1")],
        "/servicesNS/data/models",
        "data models",
        max_retries,
        metrics,
    )
    .await
}

/// Post attribute updates for one data model.
///
/// `params` are sent as form fields verbatim, e.g.
/// `("acceleration.earliest_time", "-1y")`.
#[allow(clippy::too_many_arguments)]
pub async fn update_datamodel_config(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    owner: &str,
    app: &str,
    name: &str,
    params: &[(String, String)],
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<()> {
    debug!(name, fields = params.len(), "Updating data model configuration");

    let url = namespaced_url(
        base_url,
        owner,
        app,
        &format!("data/models/{}", encode_path_segment(name)),
    );
    let builder = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", auth_token))
        .query(&[("output_mode", "json")])
        .form(params);

    send_request_with_retry(
        builder,
        max_retries,
        "/servicesNS/data/models/{name}",
        "POST",
        metrics,
    )
    .await?;
    Ok(())
}
