//! Command dispatch logic.

use anyhow::Result;
use cim_config::Config;

use crate::args::{Cli, Commands};
use crate::commands;

/// Run the parsed command against the built configuration.
pub async fn run_command(cli: Cli, config: Config) -> Result<()> {
    let output_file = cli.output_file;
    let output = cli.output.as_str();

    match cli.command {
        Commands::Check => commands::check::run(config, output, output_file).await,
        Commands::Show { model } => commands::show::run(config, model, output, output_file).await,
        Commands::Apply { file, dry_run } => {
            commands::apply::run(config, &file, dry_run, output, output_file).await
        }
        Commands::ApiKey { command } => {
            commands::api_key::run(config, command, output, output_file).await
        }
    }
}
