//! Configuration type definitions.
//!
//! Responsibilities:
//! - Define configuration types for authentication, connections, profiles and the setup target.
//! - Provide serialization helpers for sensitive types (secrets, durations).
//!
//! Does NOT handle:
//! - Configuration loading from files or environment variables (see `loader` module).
//! - Actual network connections or authentication flows (see client crate).
//!
//! Invariants:
//! - All secret types use `secrecy::SecretString` to prevent accidental logging.

mod auth;
pub(crate) mod connection;
mod profile;
mod setup;

pub use auth::{AuthConfig, AuthStrategy};
pub use connection::{Config, ConnectionConfig};
pub use profile::{ConfigFile, ProfileConfig};
pub use setup::SetupTarget;
