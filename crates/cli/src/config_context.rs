//! Configuration assembly for CLI commands.
//!
//! Responsibilities:
//! - Merge profile, environment and command-line settings into a `Config`.
//!
//! Invariants:
//! - Precedence, lowest first: profile file, environment, CLI flags.
//! - Blank `--config-path` values are ignored so the default location applies.

use anyhow::{Context, Result};
use cim_config::{Config, ConfigLoader};

use crate::args::Cli;

/// Build the connection and setup-target configuration for a run.
pub fn build_config(cli: &Cli) -> Result<Config> {
    let mut loader = ConfigLoader::new();

    if let Some(ref path) = cli.config_path
        && !path.to_string_lossy().trim().is_empty()
    {
        loader = loader.with_config_path(path.clone());
    }
    if let Some(ref profile_name) = cli.profile {
        loader = loader.with_profile_name(profile_name.clone());
    }

    loader = loader
        .from_profile()
        .context("Failed to load configuration from profile")?
        .from_env()
        .context("Failed to load configuration from environment")?;

    if let Some(ref url) = cli.base_url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(ref username) = cli.username {
        loader = loader.with_username(username.clone());
    }
    if let Some(ref password) = cli.password {
        loader = loader.with_password(password.clone());
    }
    if let Some(ref token) = cli.api_token {
        loader = loader.with_api_token(token.clone());
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(std::time::Duration::from_secs(timeout_secs));
    }
    if let Some(retries) = cli.max_retries {
        loader = loader.with_max_retries(retries);
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }
    if let Some(ref app) = cli.app {
        loader = loader.with_app(app.clone());
    }
    if let Some(ref realm) = cli.realm {
        loader = loader.with_realm(realm.clone());
    }

    loader.build().context("Failed to build configuration")
}
