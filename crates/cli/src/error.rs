//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map client, setup and API key errors to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.

use cim_client::ClientError;
use cim_setup::{ApiKeyError, SetupError};
use thiserror::Error;

/// Structured exit codes for cim-setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Authentication failure - invalid credentials or expired session.
    ///
    /// Scripts should refresh credentials or prompt for re-authentication.
    AuthenticationFailed = 2,

    /// Connection error - network, timeout, or DNS failure.
    ///
    /// Scripts may retry with exponential backoff.
    ConnectionError = 3,

    /// Resource not found - data model, macro or stored credential.
    NotFound = 4,

    /// Validation error - rejected edits, or items that did not save.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,

    /// Permission denied - missing capability or HTTP 403.
    PermissionDenied = 6,

    /// Rate limited - HTTP 429 Too Many Requests.
    RateLimited = 7,

    /// Service unavailable - HTTP 502/503/504.
    ServiceUnavailable = 8,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::AuthFailed(_) | ClientError::SessionExpired { .. } => {
                ExitCode::AuthenticationFailed
            }
            ClientError::ApiError { status: 401, .. } => ExitCode::AuthenticationFailed,

            ClientError::Timeout(_) | ClientError::InvalidUrl(_) => ExitCode::ConnectionError,
            ClientError::HttpError(e) if e.is_connect() || e.is_timeout() => {
                ExitCode::ConnectionError
            }

            ClientError::NotFound(_) | ClientError::ApiError { status: 404, .. } => {
                ExitCode::NotFound
            }

            ClientError::InvalidResponse(_) | ClientError::ApiError { status: 400, .. } => {
                ExitCode::ValidationError
            }

            ClientError::ApiError { status: 403, .. } => ExitCode::PermissionDenied,
            ClientError::ApiError { status: 429, .. } => ExitCode::RateLimited,
            ClientError::ApiError {
                status: 502..=504, ..
            } => ExitCode::ServiceUnavailable,

            ClientError::MaxRetriesExceeded(_) => ExitCode::ServiceUnavailable,

            ClientError::Conflict(_) | ClientError::HttpError(_) | ClientError::ApiError { .. } => {
                ExitCode::GeneralError
            }
        }
    }
}

impl From<&SetupError> for ExitCode {
    fn from(err: &SetupError) -> Self {
        match err {
            SetupError::PermissionDenied { .. } => ExitCode::PermissionDenied,
            SetupError::UnknownItem(_) => ExitCode::ValidationError,
            SetupError::LoadFailure { source } => ExitCode::from(source),
        }
    }
}

impl From<&ApiKeyError> for ExitCode {
    fn from(err: &ApiKeyError) -> Self {
        match err {
            ApiKeyError::SaveFailed { source }
            | ApiKeyError::UpdateFailed { source }
            | ApiKeyError::DeleteFailed { source }
            | ApiKeyError::RetrieveFailed {
                source: Some(source),
                ..
            } => ExitCode::from(source),
            ApiKeyError::RetrieveFailed { source: None, .. } => ExitCode::NotFound,
        }
    }
}

/// Some items were rejected by validation or failed to save.
#[derive(Debug, Error)]
#[error("{failed} of {total} change(s) were not saved")]
pub struct SaveIncomplete {
    pub failed: usize,
    pub total: usize,
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(err) = cause.downcast_ref::<SetupError>() {
                return ExitCode::from(err);
            }
            if let Some(err) = cause.downcast_ref::<ApiKeyError>() {
                return ExitCode::from(err);
            }
            if cause.downcast_ref::<SaveIncomplete>().is_some() {
                return ExitCode::ValidationError;
            }
            if let Some(err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(err);
            }
        }
        ExitCode::GeneralError
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn api_error(status: u16) -> ClientError {
        ClientError::ApiError {
            status,
            url: "https://localhost:8089/services".to_string(),
            message: "boom".to_string(),
            request_id: None,
        }
    }

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::ValidationError.as_i32(), 5);
        assert_eq!(ExitCode::PermissionDenied.as_i32(), 6);
    }

    #[test]
    fn test_client_error_mapping() {
        assert_eq!(ExitCode::from(&api_error(401)), ExitCode::AuthenticationFailed);
        assert_eq!(ExitCode::from(&api_error(403)), ExitCode::PermissionDenied);
        assert_eq!(ExitCode::from(&api_error(404)), ExitCode::NotFound);
        assert_eq!(ExitCode::from(&api_error(503)), ExitCode::ServiceUnavailable);
        assert_eq!(ExitCode::from(&api_error(500)), ExitCode::GeneralError);
        assert_eq!(
            ExitCode::from(&ClientError::Timeout(Duration::from_secs(30))),
            ExitCode::ConnectionError
        );
    }

    #[test]
    fn test_setup_error_mapping() {
        let denied = SetupError::PermissionDenied {
            capability: "accelerate_datamodel".to_string(),
        };
        assert_eq!(ExitCode::from(&denied), ExitCode::PermissionDenied);
        let failed = SetupError::LoadFailure {
            source: api_error(401),
        };
        assert_eq!(ExitCode::from(&failed), ExitCode::AuthenticationFailed);
    }

    #[test]
    fn test_anyhow_chain() {
        let err = anyhow::Error::new(SaveIncomplete { failed: 1, total: 2 });
        assert_eq!(err.exit_code(), ExitCode::ValidationError);

        let err = anyhow::Error::new(api_error(404)).context("loading");
        assert_eq!(err.exit_code(), ExitCode::NotFound);

        let err = anyhow::anyhow!("plain");
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
    }
}
