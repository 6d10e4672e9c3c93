//! Setup logic for the Splunk Common Information Model add-on.
//!
//! This crate holds everything the add-on's setup page does apart from
//! drawing it: ordering relative time ranges, validating acceleration
//! settings, encoding index whitelist macros, detecting changes, and the
//! [`SetupSession`] that loads, edits and saves them through a
//! [`SetupBackend`]. The modular action API key is handled by
//! [`ApiKeyManager`].
//!
//! # Example
//!
//! ```rust,ignore
//! use cim_setup::{AccelerationField, LoadOptions, SetupSession, SplunkBackend};
//!
//! let backend = SplunkBackend::new(client, config.setup.clone());
//! let mut session = SetupSession::load(&backend, LoadOptions::from(backend.target())).await?;
//! session.set_whitelist("Authentication", "main,security")?;
//! session.set_field("Authentication", AccelerationField::EarliestTime, "-1mon".into())?;
//! let report = session.save(&backend).await;
//! ```

pub mod acceleration;
pub mod api_key;
pub mod backend;
pub mod boolean;
pub mod diff;
pub mod error;
pub mod reltime;
pub mod session;
pub mod version;
pub mod whitelist;

pub use acceleration::{
    AccelerationField, AccelerationSettings, AttributeBag, SchedulePriority, ValidationErrors,
    validate,
};
pub use api_key::{ApiKeyError, ApiKeyManager, ApiKeyOutcome, RetrievedKey};
pub use backend::{CredentialStore, SetupBackend, SplunkBackend};
pub use boolean::normalize_boolean;
pub use diff::has_changed;
pub use error::{Result, SetupError};
pub use session::{
    ChangePlan, DataModelChange, FieldView, InvalidChange, LoadOptions, RowStatus, RowView,
    SaveItem, SaveKind, SaveOutcome, SaveReport, SetupSession, WhitelistChange,
};
pub use version::{FeatureGate, SplunkVersion};
pub use whitelist::RestrictionSummary;
