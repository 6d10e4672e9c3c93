//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Collect connection, auth and setup-target values from every source.
//! - Resolve them into a validated `Config`.
//!
//! Does NOT handle:
//! - Environment variable parsing (env.rs) or profile files (profile.rs);
//!   both write straight into the loader's layers.
//!
//! Invariants / Assumptions:
//! - Each source only fills values; later sources overwrite earlier ones.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use super::profile::apply_profile;
use crate::constants::{
    DEFAULT_EXPIRY_BUFFER_SECS, DEFAULT_MAX_RETRIES, DEFAULT_SESSION_TTL_SECS,
    DEFAULT_TIMEOUT_SECS, MAX_MAX_RETRIES, MAX_SESSION_TTL_SECS, MAX_TIMEOUT_SECS,
};
use crate::types::{AuthConfig, AuthStrategy, Config, ConnectionConfig, SetupTarget};

/// Connection and credential values gathered so far.
#[derive(Default)]
pub(super) struct ConnectionLayer {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub api_token: Option<SecretString>,
    pub skip_verify: Option<bool>,
    pub timeout: Option<Duration>,
    pub max_retries: Option<usize>,
    pub session_ttl_seconds: Option<u64>,
}

impl ConnectionLayer {
    fn is_complete(&self) -> bool {
        let has_auth =
            self.api_token.is_some() || (self.username.is_some() && self.password.is_some());
        self.base_url.is_some() && has_auth
    }
}

/// Setup-target values gathered so far. The capability is fixed.
#[derive(Default)]
pub(super) struct SetupLayer {
    pub app: Option<String>,
    pub owner: Option<String>,
    pub realm: Option<String>,
    pub max_display_count: Option<usize>,
}

impl SetupLayer {
    fn resolve(self) -> Result<SetupTarget, ConfigError> {
        let defaults = SetupTarget::default();
        let target = SetupTarget {
            app: self.app.unwrap_or(defaults.app),
            owner: self.owner.unwrap_or(defaults.owner),
            realm: self.realm.unwrap_or(defaults.realm),
            capability: defaults.capability,
            max_display_count: self.max_display_count.unwrap_or(defaults.max_display_count),
        };

        for (var, value) in [
            ("app", &target.app),
            ("owner", &target.owner),
            ("realm", &target.realm),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    var: var.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        if target.max_display_count == 0 {
            return Err(ConfigError::InvalidValue {
                var: "max_display_count".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(target)
    }
}

/// Configuration loader that layers profile, environment and explicit values.
#[derive(Default)]
pub struct ConfigLoader {
    pub(super) connection: ConnectionLayer,
    pub(super) setup: SetupLayer,
    pub(super) profile_name: Option<String>,
    pub(super) config_path: Option<PathBuf>,
    /// Name of a requested profile that could not be found.
    pub(super) profile_missing: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load environment variables from `.env` if present.
    ///
    /// Skipped when `DOTENV_DISABLED` is "true" or "1". A missing file is fine.
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        let disabled = matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        );
        if disabled {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(e)) => Err(ConfigError::DotenvIo { kind: e.kind() }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Select the profile to read from the config file.
    pub fn with_profile_name(mut self, name: String) -> Self {
        self.profile_name = Some(name);
        self
    }

    /// Override the config file path.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Apply the selected profile, if any.
    ///
    /// A missing profile is remembered and only becomes an error in `build()`
    /// when the other sources leave the connection incomplete.
    pub fn from_profile(mut self) -> Result<Self, ConfigError> {
        apply_profile(&mut self)?;
        Ok(self)
    }

    /// Apply `SPLUNK_*` and `CIM_SETUP_*` environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    pub fn with_base_url(mut self, url: String) -> Self {
        self.connection.base_url = Some(url);
        self
    }

    pub fn with_username(mut self, username: String) -> Self {
        self.connection.username = Some(username);
        self
    }

    pub fn with_password(mut self, password: String) -> Self {
        self.connection.password = Some(SecretString::new(password.into()));
        self
    }

    pub fn with_api_token(mut self, token: String) -> Self {
        self.connection.api_token = Some(SecretString::new(token.into()));
        self
    }

    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.connection.skip_verify = Some(skip);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.connection.timeout = Some(timeout);
        self
    }

    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.connection.max_retries = Some(retries);
        self
    }

    /// Set the app namespace that owns the setup objects.
    pub fn with_app(mut self, app: String) -> Self {
        self.setup.app = Some(app);
        self
    }

    /// Set the credential realm for the API key.
    pub fn with_realm(mut self, realm: String) -> Self {
        self.setup.realm = Some(realm);
        self
    }

    /// Resolve every layer into the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        if let Some(name) = self.profile_missing
            && !self.connection.is_complete()
        {
            return Err(ConfigError::ProfileNotFound(name));
        }

        let layer = self.connection;
        let base_url = match layer.base_url.as_deref() {
            Some(raw) => normalize_base_url(raw)?,
            None => return Err(ConfigError::MissingBaseUrl),
        };

        // An API token wins over username/password.
        let strategy = match (layer.api_token, layer.username, layer.password) {
            (Some(token), _, _) => AuthStrategy::ApiToken { token },
            (None, Some(username), Some(password)) => {
                AuthStrategy::SessionToken { username, password }
            }
            _ => return Err(ConfigError::MissingAuth),
        };

        let connection = ConnectionConfig {
            base_url,
            skip_verify: layer.skip_verify.unwrap_or(false),
            timeout: layer
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: layer.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            session_expiry_buffer_seconds: DEFAULT_EXPIRY_BUFFER_SECS,
            session_ttl_seconds: layer
                .session_ttl_seconds
                .unwrap_or(DEFAULT_SESSION_TTL_SECS),
        };
        check_limits(&connection)?;

        Ok(Config {
            connection,
            auth: AuthConfig { strategy },
            setup: self.setup.resolve()?,
        })
    }
}

fn check_limits(connection: &ConnectionConfig) -> Result<(), ConfigError> {
    let timeout = connection.timeout.as_secs();
    if timeout == 0 || timeout > MAX_TIMEOUT_SECS {
        return Err(ConfigError::InvalidTimeout {
            message: format!("must be between 1 and {MAX_TIMEOUT_SECS} seconds (got {timeout})"),
        });
    }

    if connection.max_retries > MAX_MAX_RETRIES {
        return Err(ConfigError::InvalidMaxRetries {
            message: format!(
                "must be between 0 and {MAX_MAX_RETRIES} (got {})",
                connection.max_retries
            ),
        });
    }

    let ttl = connection.session_ttl_seconds;
    if ttl <= connection.session_expiry_buffer_seconds || ttl > MAX_SESSION_TTL_SECS {
        return Err(ConfigError::InvalidSessionTtl {
            message: format!(
                "session_ttl_seconds must be above {} and at most {MAX_SESSION_TTL_SECS} (got {ttl})",
                connection.session_expiry_buffer_seconds
            ),
        });
    }

    Ok(())
}

/// Require an absolute http(s) URL with a host; drop trailing slashes.
fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let invalid = |message: String| ConfigError::InvalidValue {
        var: "base_url".into(),
        message,
    };

    let parsed = url::Url::parse(trimmed)
        .map_err(|e| invalid(format!("expected e.g. https://localhost:8089: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "scheme must be http or https, got: {}",
            parsed.scheme()
        )));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("host is required".into()));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
