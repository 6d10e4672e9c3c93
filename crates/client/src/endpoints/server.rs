//! Server info endpoint.

use reqwest::Client;
use tracing::debug;

use crate::endpoints::request::{parse_json, send_request_with_retry};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{ServerInfo, SplunkListResponse};

/// Fetch server info (version and build).
pub async fn get_server_info(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<ServerInfo> {
    debug!("Fetching server info");

    let url = format!("{}/services/server/info", base_url);
    let builder = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", auth_token))
        .query(&[("output_mode", "json")]);

    let response =
        send_request_with_retry(builder, max_retries, "/services/server/info", "GET", metrics)
            .await?;

    let resp: SplunkListResponse<ServerInfo> = parse_json(response, "server info").await?;
    resp.entry
        .into_iter()
        .next()
        .map(|e| e.content)
        .ok_or_else(|| ClientError::InvalidResponse("server info returned no entry".to_string()))
}
