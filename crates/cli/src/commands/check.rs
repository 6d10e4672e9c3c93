//! `check`: capability check only.

use anyhow::Result;
use cim_config::Config;
use cim_setup::{SetupBackend, SetupError};
use tracing::info;

use crate::formatters::{CheckOutput, OutputFormat, get_formatter, output_result};

pub async fn run(
    config: Config,
    output_format: &str,
    output_file: Option<std::path::PathBuf>,
) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;
    let backend = super::build_backend(&config)?;
    let capability = config.setup.capability.clone();

    info!(capability = %capability, "Checking setup capability");
    let permitted = backend.has_capability(&capability).await?;
    if !permitted {
        return Err(SetupError::PermissionDenied { capability }.into());
    }

    let output = get_formatter(format).format_check(&CheckOutput {
        capability,
        permitted,
    })?;
    output_result(&output, format, output_file.as_ref())
}
