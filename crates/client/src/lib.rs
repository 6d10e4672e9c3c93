//! Splunk REST API client for the CIM add-on setup tools.
//!
//! This crate provides a typed client for the handful of Splunk management
//! endpoints the setup flow touches: the caller's capability context, server
//! info, index-constraint macros, data model configurations, indexes, tags,
//! and the credential store.
//!
//! # Example
//!
//! ```rust,ignore
//! use cim_client::{AuthStrategy, SplunkClient};
//! use secrecy::SecretString;
//!
//! let client = SplunkClient::builder()
//!     .base_url("https://localhost:8089".to_string())
//!     .auth_strategy(AuthStrategy::ApiToken {
//!         token: SecretString::new("my-token".to_string().into()),
//!     })
//!     .build()?;
//!
//! let context = client.current_context().await?;
//! ```

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod models;
mod name_merge;
mod serde_helpers;

pub use auth::{AuthStrategy, SessionManager};
pub use client::SplunkClient;
pub use client::builder::SplunkClientBuilder;
pub use error::{ClientError, Result};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use models::{
    CurrentContext, DataModelConfig, Index, Macro, MessageType, ServerInfo, SplunkMessage,
    SplunkMessages, StoredPassword, Tag,
};
