//! Configuration management for the CIM setup tools.
//!
//! This crate provides types and loaders for the Splunk connection settings
//! and the add-on setup target (app namespace, credential realm), read from
//! `.env` files, environment variables, and a JSON profile file.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{
    AuthConfig, AuthStrategy, Config, ConfigFile, ConnectionConfig, ProfileConfig, SetupTarget,
};
