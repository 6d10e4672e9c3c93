//! Index listing endpoint.

use reqwest::Client;
use tracing::debug;

use crate::endpoints::request::get_list;
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::Index;

/// List every index visible to the caller (`count=-1`, no paging).
pub async fn list_indexes(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<Vec<Index>> {
    debug!("Listing indexes");

    let url = format!("{}/services/data/indexes", base_url);
    get_list(
        client,
        &url,
        auth_token,
        &[("count", "-1")],
        "/services/data/indexes",
        "indexes",
        max_retries,
        metrics,
    )
    .await
}
