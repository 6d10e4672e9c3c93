//! `show`: load the setup form and print it.

use anyhow::Result;
use cim_config::Config;
use cim_setup::{LoadOptions, SetupSession};
use tracing::info;

use crate::formatters::{FormOutput, OutputFormat, get_formatter, output_result};

pub async fn run(
    config: Config,
    model: Option<String>,
    output_format: &str,
    output_file: Option<std::path::PathBuf>,
) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;
    let backend = super::build_backend(&config)?;

    info!(app = %config.setup.app, "Loading setup form");
    let mut session = SetupSession::load(&backend, LoadOptions::from(&config.setup)).await?;

    let rows = match model {
        Some(ref name) => {
            session.select(name)?;
            vec![session.row(name)?]
        }
        None => session.rows(),
    };

    let form = FormOutput {
        version: session.version().map(ToString::to_string),
        features: session.feature_gate(),
        rows,
        indexes: session.index_names().to_vec(),
        tags: session.tag_names().to_vec(),
        detailed: model.is_some(),
    };

    let output = get_formatter(format).format_form(&form)?;
    output_result(&output, format, output_file.as_ref())
}
