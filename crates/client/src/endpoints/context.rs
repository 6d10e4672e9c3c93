//! Current authentication context endpoint.

use reqwest::Client;
use tracing::debug;

use crate::endpoints::request::{parse_json, send_request_with_retry};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{CurrentContext, SplunkListResponse};

/// Fetch the caller's identity and capabilities.
///
/// Reads `entry[0].content`; an empty entry list is an invalid response.
pub async fn get_current_context(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<CurrentContext> {
    debug!("Fetching current authentication context");

    let url = format!("{}/services/authentication/current-context", base_url);
    let builder = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", auth_token))
        .query(&[("output_mode", "json")]);

    let response = send_request_with_retry(
        builder,
        max_retries,
        "/services/authentication/current-context",
        "GET",
        metrics,
    )
    .await?;

    let resp: SplunkListResponse<CurrentContext> = parse_json(response, "current-context").await?;
    resp.entry
        .into_iter()
        .next()
        .map(|e| e.content)
        .ok_or_else(|| ClientError::InvalidResponse("current-context returned no entry".to_string()))
}
