//! `api-key`: save, show or delete the modular action API key.

use anyhow::Result;
use clap::Subcommand;
use cim_config::Config;
use cim_setup::{ApiKeyManager, ApiKeyOutcome};
use secrecy::{ExposeSecret, SecretString};

use crate::formatters::{ApiKeyOutput, OutputFormat, get_formatter, output_result};

#[derive(Subcommand)]
pub enum ApiKeyCommand {
    /// Store the API key, replacing any existing one
    Save {
        /// Credential name
        #[arg(short, long)]
        name: String,
        /// API key value
        #[arg(short, long, env = "CIM_SETUP_API_KEY", hide_env_values = true)]
        key: String,
    },
    /// Print the stored API key
    Show {
        /// Credential name
        #[arg(short, long)]
        name: String,
    },
    /// Delete the stored API key
    Delete {
        /// Credential name
        #[arg(short, long)]
        name: String,
    },
}

pub async fn run(
    config: Config,
    command: ApiKeyCommand,
    output_format: &str,
    output_file: Option<std::path::PathBuf>,
) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;
    let backend = super::build_backend(&config)?;
    let manager = ApiKeyManager::new(&backend, config.setup.realm.clone());

    let (operation, name, outcome, key) = match command {
        ApiKeyCommand::Save { name, key } => {
            let secret = SecretString::new(key.into());
            let outcome = manager.save(&name, &secret).await?;
            ("save", name, outcome, None)
        }
        ApiKeyCommand::Show { name } => {
            let retrieved = manager.show(&name).await?;
            let key = retrieved.key.expose_secret().to_string();
            ("show", name, ApiKeyOutcome::Retrieved, Some(key))
        }
        ApiKeyCommand::Delete { name } => {
            let outcome = manager.delete(&name).await?;
            ("delete", name, outcome, None)
        }
    };

    let output = get_formatter(format).format_api_key(&ApiKeyOutput {
        operation: operation.to_string(),
        name,
        realm: manager.realm().to_string(),
        message: outcome.message().to_string(),
        key,
    })?;
    output_result(&output, format, output_file.as_ref())
}
