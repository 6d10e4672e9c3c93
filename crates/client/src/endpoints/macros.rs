//! Search macro REST API endpoints.
//!
//! Responsibilities:
//! - List macros in an app namespace, optionally filtered by a search clause.
//! - Update a macro's definition.
//!
//! Does NOT handle:
//! - Auth retry (see client module).
//! - Interpreting macro definitions.

use reqwest::Client;
use tracing::debug;

use crate::endpoints::request::{get_list, send_request_with_retry};
use crate::endpoints::{encode_path_segment, namespaced_url};
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::Macro;

/// List macros in `owner`/`app`, all pages (`count=-1`).
///
/// `search` is passed through as Splunk's `search` filter, e.g.
/// `name=cim_*_indexes`.
#[allow(clippy::too_many_arguments)]
pub async fn list_macros(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    owner: &str,
    app: &str,
    search: Option<&str>,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<Vec<Macro>> {
    debug!(app, search, "Listing search macros");

    let url = namespaced_url(base_url, owner, app, "admin/macros");
    let mut query = vec![("count", "-1")];
    if let Some(filter) = search {
        query.push(("search", filter));
    }

    get_list(
        client,
        &url,
        auth_token,
        &query,
        "/servicesNS/admin/macros",
        "macros",
        max_retries,
        metrics,
    )
    .await
}

/// Replace a macro's definition.
#[allow(clippy::too_many_arguments)]
pub async fn update_macro_definition(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    owner: &str,
    app: &str,
    name: &str,
    definition: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<()> {
    debug!(name, "Updating macro definition");

    let url = namespaced_url(
        base_url,
        owner,
        app,
        &format!("admin/macros/{}", encode_path_segment(name)),
    );
    let builder = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", auth_token))
        .query(&[("output_mode", "json")])
        .form(&[("definition", definition)]);

    send_request_with_retry(
        builder,
        max_retries,
        "/servicesNS/admin/macros/{name}",
        "POST",
        metrics,
    )
    .await?;
    Ok(())
}
