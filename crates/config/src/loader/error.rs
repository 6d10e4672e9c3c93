//! Errors raised while resolving configuration.
//!
//! Dotenv variants carry a position or I/O kind only; `.env` line contents
//! can hold secrets and are never echoed.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// A value was present but unusable. `var` names the variable or key.
    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("No Splunk management URL. Set SPLUNK_BASE_URL, pass --base-url, or use a profile.")]
    MissingBaseUrl,

    #[error("No credentials. Provide an API token, or both a username and a password.")]
    MissingAuth,

    #[error("Cannot locate the configuration directory: {0}")]
    ConfigDirUnavailable(String),

    #[error("Cannot read config file {path}")]
    ConfigFileRead { path: PathBuf },

    #[error("Config file {path} is not valid JSON")]
    ConfigFileParse { path: PathBuf },

    #[error("Profile '{0}' does not exist in the config file")]
    ProfileNotFound(String),

    #[error("Invalid timeout: {message}")]
    InvalidTimeout { message: String },

    #[error("Invalid session TTL: {message}")]
    InvalidSessionTtl { message: String },

    #[error("Invalid max retries: {message}")]
    InvalidMaxRetries { message: String },

    #[error(".env parse error at position {error_index} (set DOTENV_DISABLED=1 to skip .env)")]
    DotenvParse { error_index: usize },

    #[error("Cannot read .env: {kind}")]
    DotenvIo { kind: ErrorKind },

    #[error("Cannot load .env (set DOTENV_DISABLED=1 to skip .env)")]
    DotenvUnknown,
}
