//! Configuration for the user-disable action.
//!
//! Layered with figment: defaults -> optional YAML file -> `USER_DISABLE__*`
//! environment variables (nested keys separated by `__`).

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "USER_DISABLE__";

/// Default User-Agent sent to the directory service.
pub const DEFAULT_USER_AGENT: &str = concat!("user-disable/", env!("CARGO_PKG_VERSION"));

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file does not exist: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),

    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Root trust store used for HTTPS connections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TlsRoots {
    /// Mozilla's root certificates (no OS dependency)
    #[default]
    #[serde(rename = "webpki")]
    WebPki,
    /// OS native certificate store
    Native,
}

/// Settings of the outbound HTTP client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpSettings {
    /// Optional per-request timeout. `None` leaves the call unbounded and
    /// defers timing to the job runner.
    pub request_timeout_ms: Option<u64>,
    pub user_agent: String,
    /// Maximum response body bytes kept; anything beyond is dropped unread.
    pub max_body_size: usize,
    /// Allow plain `http://` base URLs. Only meant for mock servers.
    pub allow_insecure_http: bool,
    pub tls_roots: TlsRoots,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout_ms: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            max_body_size: 1024 * 1024, // 1 MiB
            allow_insecure_http: false,
            tls_roots: TlsRoots::default(),
        }
    }
}

impl HttpSettings {
    /// Settings for tests against a local mock server.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            allow_insecure_http: true,
            ..Self::default()
        }
    }
}

/// Action configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserDisableConfig {
    /// Environment key holding the default directory service base URL.
    pub base_url_env_key: String,
    /// Secrets key holding the static bearer token.
    pub bearer_token_secret_key: String,
    pub http: HttpSettings,
}

impl Default for UserDisableConfig {
    fn default() -> Self {
        Self {
            base_url_env_key: "GRAPH_BASE_URL".to_owned(),
            bearer_token_secret_key: "GRAPH_BEARER_TOKEN".to_owned(),
            http: HttpSettings::default(),
        }
    }
}

impl UserDisableConfig {
    /// Load configuration from defaults, an optional YAML file and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, a layer fails to parse,
    /// or a value does not pass validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            figment = figment.merge(Yaml::file(path));
        }
        Self::from_figment(&figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Extract and validate configuration from a prepared figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction or validation fails.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url_env_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "base_url_env_key",
                reason: "must not be empty".to_owned(),
            });
        }
        if self.bearer_token_secret_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "bearer_token_secret_key",
                reason: "must not be empty".to_owned(),
            });
        }
        if self.http.max_body_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http.max_body_size",
                reason: "must be greater than zero".to_owned(),
            });
        }
        if self.http.request_timeout_ms == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "http.request_timeout_ms",
                reason: "must be greater than zero when set".to_owned(),
            });
        }
        if http::HeaderValue::from_str(&self.http.user_agent).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "http.user_agent",
                reason: "not a valid header value".to_owned(),
            });
        }
        Ok(())
    }
}
