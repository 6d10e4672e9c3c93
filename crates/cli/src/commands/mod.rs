//! CLI command implementations.

pub mod api_key;
pub mod apply;
pub mod check;
pub mod show;

use anyhow::{Context, Result};
use cim_client::{MetricsCollector, SplunkClient};
use cim_config::Config;
use cim_setup::SplunkBackend;

/// Build the Splunk-backed setup backend for `config`.
///
/// Request metrics go through the `metrics` facade; they are dropped unless a
/// recorder is installed.
pub fn build_backend(config: &Config) -> Result<SplunkBackend> {
    let client = SplunkClient::builder()
        .from_config(config)
        .metrics(MetricsCollector::new())
        .build()
        .context("Failed to build Splunk client")?;
    Ok(SplunkBackend::new(client, config.setup.clone()))
}
