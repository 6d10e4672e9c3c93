//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Read connection and setup-target defaults from the environment.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not build configuration (see `config_context` module).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::api_key::ApiKeyCommand;

#[derive(Parser)]
#[command(name = "cim-setup")]
#[command(about = "Configure Splunk CIM data model acceleration and index whitelists", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  cim-setup check\n  cim-setup show --model Authentication\n  cim-setup apply --file edits.json --dry-run\n  cim-setup -o json apply --file edits.json\n  cim-setup api-key save --name relay --key \"$RELAY_KEY\"\n"
)]
pub struct Cli {
    /// Base URL of the Splunk server (e.g., https://localhost:8089)
    #[arg(short, long, global = true, env = "SPLUNK_BASE_URL")]
    pub base_url: Option<String>,

    /// Username for session token authentication
    #[arg(short, long, global = true, env = "SPLUNK_USERNAME")]
    pub username: Option<String>,

    /// Password for session token authentication
    #[arg(short, long, global = true, env = "SPLUNK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// API token for authentication (preferred over username/password)
    #[arg(short, long, global = true, env = "SPLUNK_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Connection timeout in seconds
    #[arg(long, global = true, env = "SPLUNK_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Maximum number of retries for failed requests
    #[arg(long, global = true, env = "SPLUNK_MAX_RETRIES")]
    pub max_retries: Option<usize>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true)]
    pub skip_verify: bool,

    /// Profile name to load from config file
    #[arg(long, global = true, env = "SPLUNK_PROFILE")]
    pub profile: Option<String>,

    /// Path to a custom configuration file (overrides default location)
    #[arg(long, global = true, env = "SPLUNK_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// App namespace holding the data model settings and whitelist macros
    #[arg(long, global = true, env = "CIM_SETUP_APP")]
    pub app: Option<String>,

    /// Credential realm for the API key
    #[arg(long, global = true, env = "CIM_SETUP_REALM")]
    pub realm: Option<String>,

    /// Output format (table, json, yaml)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    /// Output file path (saves results to file instead of stdout)
    #[arg(long, global = true, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that the current user may change acceleration settings
    Check,

    /// Show the setup form: whitelists and acceleration settings per data model
    Show {
        /// Only show this data model, with all of its fields
        #[arg(short, long, value_name = "NAME")]
        model: Option<String>,
    },

    /// Apply edits from a JSON file and save them
    Apply {
        /// JSON file mapping data model names to edits
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,

        /// Validate and show the change sets without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Manage the modular action API key
    ApiKey {
        #[command(subcommand)]
        command: ApiKeyCommand,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_apply() {
        let cli = Cli::try_parse_from(["cim-setup", "apply", "--file", "edits.json", "--dry-run"])
            .unwrap();
        match cli.command {
            Commands::Apply { file, dry_run } => {
                assert_eq!(file, PathBuf::from("edits.json"));
                assert!(dry_run);
            }
            _ => panic!("expected apply"),
        }
    }

    #[test]
    fn test_global_output_after_subcommand() {
        let cli = Cli::try_parse_from(["cim-setup", "show", "-o", "json"]).unwrap();
        assert_eq!(cli.output, "json");
    }
}
