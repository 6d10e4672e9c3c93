//! Environment variable parsing for configuration.
//!
//! Invariants:
//! - Empty or whitespace-only variables are treated as unset.
//! - Returned values are trimmed.
//! - Unparseable numbers or booleans return `ConfigError::InvalidValue`.

use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
pub fn env_var_or_none(key: &str) -> Option<String> {
    let raw = std::env::var(key).ok()?;
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_env<T: FromStr>(key: &str, expected: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: key.to_string(),
                message: format!("must be {expected}"),
            })
        })
        .transpose()
}

fn overwrite<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Apply environment values over whatever the loader already holds.
///
/// `SPLUNK_PROFILE` and `SPLUNK_CONFIG_PATH` are resolved by the caller
/// before `from_profile()` runs.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let conn = &mut loader.connection;
    overwrite(&mut conn.base_url, env_var_or_none("SPLUNK_BASE_URL"));
    overwrite(&mut conn.username, env_var_or_none("SPLUNK_USERNAME"));
    overwrite(
        &mut conn.password,
        env_var_or_none("SPLUNK_PASSWORD").map(|p| SecretString::new(p.into())),
    );
    overwrite(
        &mut conn.api_token,
        env_var_or_none("SPLUNK_API_TOKEN").map(|t| SecretString::new(t.into())),
    );
    overwrite(
        &mut conn.skip_verify,
        parse_env("SPLUNK_SKIP_VERIFY", "true or false")?,
    );
    overwrite(
        &mut conn.timeout,
        parse_env::<u64>("SPLUNK_TIMEOUT", "a number of seconds")?.map(Duration::from_secs),
    );
    overwrite(
        &mut conn.max_retries,
        parse_env("SPLUNK_MAX_RETRIES", "a non-negative integer")?,
    );
    overwrite(
        &mut conn.session_ttl_seconds,
        parse_env("SPLUNK_SESSION_TTL", "a number of seconds")?,
    );

    let setup = &mut loader.setup;
    overwrite(&mut setup.app, env_var_or_none("CIM_SETUP_APP"));
    overwrite(&mut setup.owner, env_var_or_none("CIM_SETUP_OWNER"));
    overwrite(&mut setup.realm, env_var_or_none("CIM_SETUP_REALM"));
    overwrite(
        &mut setup.max_display_count,
        parse_env("CIM_SETUP_MAX_DISPLAY_COUNT", "a non-negative integer")?,
    );
    Ok(())
}
