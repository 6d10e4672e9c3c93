//! Request execution with retry, error mapping and metrics.
//!
//! Responsibilities:
//! - Send a request, retrying transient statuses (429, 502, 503, 504) with
//!   exponential backoff.
//! - Turn non-success responses into `ClientError`, preferring Splunk's own
//!   message envelope over the raw body.
//! - Record request, retry, latency and error metrics.
//!
//! Does NOT handle:
//! - Auth retry on 401/403 (see the `retry_call!` macro in the client module).

use std::time::{Duration, Instant};

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{SplunkListResponse, SplunkMessages};
use crate::name_merge::{HasName, named_entries};

/// Sends an HTTP request, retrying transient failures.
///
/// Backoff is `2^attempt` seconds. `max_retries` of 0 sends exactly once.
/// `endpoint` and `method` are metric labels only.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    let result = send_inner(builder, max_retries, endpoint, method, metrics).await;
    if let (Err(e), Some(m)) = (&result, metrics) {
        m.record_client_error(endpoint, method, e);
    }
    result
}

async fn send_inner(
    builder: RequestBuilder,
    max_retries: usize,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    let mut attempt = 0;
    loop {
        let Some(attempt_builder) = builder.try_clone() else {
            debug!("Request builder cannot be cloned, single attempt only");
            return send_once(builder, endpoint, method, metrics).await;
        };

        let response = send_once(attempt_builder, endpoint, method, metrics).await?;
        let status = response.status().as_u16();

        if response.status().is_success() {
            if attempt > 0 {
                debug!(attempt = attempt + 1, "Request succeeded after retry");
            }
            return Ok(response);
        }

        if ClientError::is_retryable_status(status) {
            if attempt < max_retries {
                let backoff_secs = 2u64.pow(attempt as u32);
                debug!(
                    status,
                    attempt = attempt + 1,
                    max_retries,
                    backoff_secs,
                    "Transient failure, retrying with exponential backoff"
                );
                attempt += 1;
                if let Some(m) = metrics {
                    m.record_retry(endpoint, method, attempt);
                }
                tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
                continue;
            }
            if max_retries > 0 {
                debug!(attempts = attempt + 1, "Max retries exhausted");
                return Err(ClientError::MaxRetriesExceeded(attempt + 1));
            }
        }

        return Err(error_from_response(response).await);
    }
}

async fn send_once(
    builder: RequestBuilder,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    if let Some(m) = metrics {
        m.record_request(endpoint, method);
    }
    let started = Instant::now();
    let result = builder.send().await;
    if let Some(m) = metrics {
        let status = result.as_ref().ok().map(|r| r.status().as_u16());
        m.record_request_duration(endpoint, method, started.elapsed(), status);
    }
    result.map_err(ClientError::from)
}

/// Build a `ClientError` from a non-success response.
async fn error_from_response(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let url = response.url().to_string();
    let request_id = response
        .headers()
        .get("X-Splunk-Request-Id")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    let message = match serde_json::from_str::<SplunkMessages>(&body) {
        Ok(m) if !m.messages.is_empty() => m.joined(),
        _ => body,
    };

    if status == 409 {
        return ClientError::Conflict(message);
    }

    ClientError::ApiError {
        status,
        url,
        message,
        request_id,
    }
}

/// Parse a JSON body, naming the resource in the error.
pub(crate) async fn parse_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| ClientError::InvalidResponse(format!("Failed to parse {what} response: {e}")))
}

/// Issue an authenticated GET against a list endpoint and return named models.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn get_list<T: DeserializeOwned + HasName>(
    client: &reqwest::Client,
    url: &str,
    auth_token: &str,
    query: &[(&str, &str)],
    endpoint: &str,
    what: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<Vec<T>> {
    let builder = client
        .get(url)
        .header("Authorization", format!("Bearer {}", auth_token))
        .query(&[("output_mode", "json")])
        .query(query);

    let response = send_request_with_retry(builder, max_retries, endpoint, "GET", metrics).await?;
    let resp: SplunkListResponse<T> = parse_json(response, what).await?;
    Ok(named_entries(resp.entry))
}
