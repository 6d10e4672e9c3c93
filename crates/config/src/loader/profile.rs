//! Profile file loading for configuration.
//!
//! Responsibilities:
//! - Resolve the config file location (explicit path or platform default).
//! - Load the JSON config file and apply the selected profile to a ConfigLoader.
//!
//! Does NOT handle:
//! - Environment variable parsing (see env.rs).
//! - Writing profiles back to disk.
//!
//! Invariants:
//! - A missing file or missing profile is recorded, not raised; `build()` decides.
//! - An unreadable or malformed file is an error.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::types::{ConfigFile, ProfileConfig};

/// Returns the default path to the configuration file.
///
/// - Linux: `~/.config/cim-setup/config.json`
/// - macOS: `~/Library/Application Support/cim-setup/config.json`
/// - Windows: `%AppData%\cim-setup\config.json`
pub(crate) fn default_config_path() -> Result<PathBuf, anyhow::Error> {
    let proj_dirs = directories::ProjectDirs::from("", "", "cim-setup")
        .context("Failed to determine project directories")?;

    Ok(proj_dirs.config_dir().join("config.json"))
}

pub(crate) fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|_| ConfigError::ConfigFileRead {
        path: path.to_path_buf(),
    })?;
    serde_json::from_str(&contents).map_err(|_| ConfigError::ConfigFileParse {
        path: path.to_path_buf(),
    })
}

/// Apply the selected profile from the config file to the loader.
pub fn apply_profile(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let Some(profile_name) = loader.profile_name.clone() else {
        return Ok(());
    };

    let config_path = match &loader.config_path {
        Some(path) => path.clone(),
        None => {
            default_config_path().map_err(|e| ConfigError::ConfigDirUnavailable(e.to_string()))?
        }
    };

    if !config_path.exists() {
        debug!(path = %config_path.display(), "Config file not found");
        loader.profile_missing = Some(profile_name);
        return Ok(());
    }

    let file = read_config_file(&config_path)?;
    match file.profiles.get(&profile_name) {
        Some(profile) => {
            debug!(profile = %profile_name, "Applying profile");
            apply_profile_config(loader, profile);
        }
        None => loader.profile_missing = Some(profile_name),
    }
    Ok(())
}

fn apply_profile_config(loader: &mut ConfigLoader, profile: &ProfileConfig) {
    let conn = &mut loader.connection;
    let profile = profile.clone();
    conn.base_url = profile.base_url.or(conn.base_url.take());
    conn.username = profile.username.or(conn.username.take());
    conn.password = profile.password.or(conn.password.take());
    conn.api_token = profile.api_token.or(conn.api_token.take());
    conn.skip_verify = profile.skip_verify.or(conn.skip_verify);
    conn.timeout = profile
        .timeout_seconds
        .map(std::time::Duration::from_secs)
        .or(conn.timeout);
    conn.max_retries = profile.max_retries.or(conn.max_retries);
    conn.session_ttl_seconds = profile.session_ttl_seconds.or(conn.session_ttl_seconds);

    let setup = &mut loader.setup;
    setup.app = profile.app.or(setup.app.take());
    setup.owner = profile.owner.or(setup.owner.take());
    setup.realm = profile.realm.or(setup.realm.take());
    setup.max_display_count = profile.max_display_count.or(setup.max_display_count);
}
