//! Error types for the setup flow.

use cim_client::ClientError;
use thiserror::Error;

/// Result type alias for setup operations.
pub type Result<T> = std::result::Result<T, SetupError>;

/// Errors that stop a setup operation as a whole.
///
/// Validation problems and per-item persist failures are reported as data,
/// not through this type.
#[derive(Error, Debug)]
pub enum SetupError {
    /// The current user lacks the required capability.
    #[error(
        "You do not have permission to access this page. Please contact your Splunk administrator."
    )]
    PermissionDenied { capability: String },

    /// A load-time fetch failed; nothing was loaded.
    #[error("An error occurred fetching assets. Please try again.")]
    LoadFailure {
        #[source]
        source: ClientError,
    },

    /// An edit addressed a data model or field the session does not have.
    #[error("Unknown item: {0}")]
    UnknownItem(String),
}

impl SetupError {
    pub(crate) fn load_failure(source: ClientError) -> Self {
        Self::LoadFailure { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_page_messages() {
        let denied = SetupError::PermissionDenied {
            capability: "accelerate_datamodel".into(),
        };
        assert_eq!(
            denied.to_string(),
            "You do not have permission to access this page. Please contact your Splunk administrator."
        );

        let failed = SetupError::load_failure(ClientError::NotFound("macros".into()));
        assert_eq!(failed.to_string(), "An error occurred fetching assets. Please try again.");
        assert!(failed.source().is_some());
    }
}
