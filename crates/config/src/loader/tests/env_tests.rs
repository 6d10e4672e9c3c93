//! Environment variable tests for the configuration loader.

use crate::loader::builder::ConfigLoader;
use crate::loader::env::env_var_or_none;
use crate::loader::error::ConfigError;
use crate::types::AuthStrategy;
use secrecy::ExposeSecret;
use serial_test::serial;
use std::time::Duration;

use super::env_lock;

#[test]
#[serial]
fn test_env_provides_connection_and_auth() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        [
            ("SPLUNK_BASE_URL", Some("https://env.splunk.local:8089")),
            ("SPLUNK_USERNAME", Some("admin")),
            ("SPLUNK_PASSWORD", Some("secret")),
            ("SPLUNK_API_TOKEN", None),
            ("SPLUNK_TIMEOUT", Some("15")),
            ("CIM_SETUP_APP", Some("SA_Env")),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
            assert_eq!(config.connection.base_url, "https://env.splunk.local:8089");
            assert_eq!(config.connection.timeout, Duration::from_secs(15));
            assert_eq!(config.setup.app, "SA_Env");
            match config.auth.strategy {
                AuthStrategy::SessionToken { username, password } => {
                    assert_eq!(username, "admin");
                    assert_eq!(password.expose_secret(), "secret");
                }
                other => panic!("unexpected strategy: {other:?}"),
            }
        },
    );
}

#[test]
#[serial]
fn test_empty_env_vars_ignored() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        [
            ("SPLUNK_BASE_URL", Some("https://localhost:8089")),
            ("SPLUNK_API_TOKEN", Some("   ")),
            ("SPLUNK_USERNAME", Some("")),
            ("SPLUNK_PASSWORD", Some("")),
        ],
        || {
            let result = ConfigLoader::new().from_env().unwrap().build();
            assert!(matches!(result, Err(ConfigError::MissingAuth)));
        },
    );
}

#[test]
#[serial]
fn test_invalid_skip_verify_value() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_var("SPLUNK_SKIP_VERIFY", Some("maybe"), || {
        let result = ConfigLoader::new().from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "SPLUNK_SKIP_VERIFY"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected an error"),
        }
    });
}

#[test]
#[serial]
fn test_invalid_display_count_value() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_var("CIM_SETUP_MAX_DISPLAY_COUNT", Some("-3"), || {
        assert!(matches!(
            ConfigLoader::new().from_env(),
            Err(ConfigError::InvalidValue { .. })
        ));
    });
}

#[test]
#[serial]
fn test_zero_display_count_rejected_at_build() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        [
            ("SPLUNK_BASE_URL", Some("https://localhost:8089")),
            ("SPLUNK_API_TOKEN", Some("token")),
            ("CIM_SETUP_MAX_DISPLAY_COUNT", Some("0")),
        ],
        || {
            let result = ConfigLoader::new().from_env().unwrap().build();
            assert!(
                matches!(result, Err(ConfigError::InvalidValue { var, .. }) if var == "max_display_count")
            );
        },
    );
}

#[test]
#[serial]
fn test_env_var_or_none_trims() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_var("CIM_SETUP_TEST_TRIM", Some("  value  "), || {
        assert_eq!(
            env_var_or_none("CIM_SETUP_TEST_TRIM"),
            Some("value".to_string())
        );
    });
}
