//! Layered configuration loading.
//!
//! Sources, lowest precedence first: profile file, `.env` (through the
//! process environment), environment variables, explicit builder calls.
//! `.env` is only read when `load_dotenv()` is called and `DOTENV_DISABLED`
//! is unset.

mod builder;
mod env;
mod error;
mod profile;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;

#[cfg(test)]
mod tests;
