//! Setup target configuration.
//!
//! Identifies the add-on whose data model settings, whitelist macros and
//! stored API key are managed, and how the form is presented.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_KEY_REALM, DEFAULT_MAX_DISPLAY_COUNT, DEFAULT_REQUIRED_CAPABILITY,
    DEFAULT_SETUP_APP, DEFAULT_SETUP_OWNER,
};

/// Namespace and presentation settings for the setup session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupTarget {
    /// App namespace that owns the macros and data model configuration
    pub app: String,
    /// Owner namespace for app-scoped REST calls
    pub owner: String,
    /// Credential realm for the modular action API key
    pub realm: String,
    /// Capability the current user must hold
    pub capability: String,
    /// Whitelist display length above which a row is flagged as truncated
    pub max_display_count: usize,
}

impl Default for SetupTarget {
    fn default() -> Self {
        Self {
            app: DEFAULT_SETUP_APP.to_string(),
            owner: DEFAULT_SETUP_OWNER.to_string(),
            realm: DEFAULT_API_KEY_REALM.to_string(),
            capability: DEFAULT_REQUIRED_CAPABILITY.to_string(),
            max_display_count: DEFAULT_MAX_DISPLAY_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_setup_target_fills_defaults() {
        let target: SetupTarget = serde_json::from_str(r#"{"app": "My_App"}"#).unwrap();
        assert_eq!(target.app, "My_App");
        assert_eq!(target.owner, "nobody");
        assert_eq!(target.realm, "cam_queue");
        assert_eq!(target.capability, "accelerate_datamodel");
        assert_eq!(target.max_display_count, 70);
    }
}
