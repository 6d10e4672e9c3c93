//! Integration tests for configuration loading through the public API.

use cim_config::{AuthStrategy, ConfigError, ConfigLoader, SetupTarget};
use proptest::prelude::*;

/// Builder methods (the CLI layer) are the highest-precedence source.
#[test]
fn test_config_loader_cli_overrides() {
    let config = ConfigLoader::new()
        .with_base_url("https://cli-override.com:8089".to_string())
        .with_api_token("cli-token".to_string())
        .build()
        .expect("should build with CLI overrides");

    assert_eq!(config.connection.base_url, "https://cli-override.com:8089");
    assert!(matches!(
        config.auth.strategy,
        AuthStrategy::ApiToken { .. }
    ));
    assert_eq!(config.setup, SetupTarget::default());
}

#[test]
fn test_config_error_messages_do_not_leak_values() {
    let err = ConfigLoader::new()
        .with_base_url("https://localhost:8089".to_string())
        .with_username("admin".to_string())
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::MissingAuth));
    assert!(!err.to_string().contains("admin"));
}

proptest! {
    #[test]
    fn prop_trailing_slashes_never_survive(host in "[a-z]{1,12}", port in 1u16..65535, slashes in 0usize..4) {
        let raw = format!("https://{host}.example:{port}{}", "/".repeat(slashes));
        let config = ConfigLoader::new()
            .with_base_url(raw)
            .with_api_token("t".to_string())
            .build()
            .unwrap();
        prop_assert!(!config.connection.base_url.ends_with('/'));
    }
}
