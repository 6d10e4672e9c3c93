//! Tag listing endpoint.

use reqwest::Client;
use tracing::debug;

use crate::endpoints::request::get_list;
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::Tag;

/// List every search-time tag (`count=-1`, no paging).
pub async fn list_tags(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<Vec<Tag>> {
    debug!("Listing tags");

    let url = format!("{}/services/search/tags", base_url);
    get_list(
        client,
        &url,
        auth_token,
        &[("count", "-1")],
        "/services/search/tags",
        "tags",
        max_retries,
        metrics,
    )
    .await
}
