//! Centralized constants for the CIM setup workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default session time-to-live in seconds (1 hour).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Default buffer time before session expiry to proactively refresh tokens.
pub const DEFAULT_EXPIRY_BUFFER_SECS: u64 = 60;

/// Maximum allowed connection timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Maximum allowed session TTL in seconds (24 hours).
pub const MAX_SESSION_TTL_SECS: u64 = 86400;

/// Default Splunk management port.
pub const DEFAULT_SPLUNK_PORT: u16 = 8089;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default maximum number of retries for failed requests.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Upper bound accepted for `max_retries`.
pub const MAX_MAX_RETRIES: usize = 10;

// =============================================================================
// Setup Target Defaults
// =============================================================================

/// App that owns the index whitelist macros and data model configuration.
pub const DEFAULT_SETUP_APP: &str = "Splunk_SA_CIM";

/// Owner namespace used for app-scoped REST calls.
pub const DEFAULT_SETUP_OWNER: &str = "nobody";

/// Credential realm for the modular action API key.
pub const DEFAULT_API_KEY_REALM: &str = "cam_queue";

/// Capability required to use the setup page.
pub const DEFAULT_REQUIRED_CAPABILITY: &str = "accelerate_datamodel";

/// Whitelist display strings longer than this are flagged as truncated.
pub const DEFAULT_MAX_DISPLAY_COUNT: usize = 70;
