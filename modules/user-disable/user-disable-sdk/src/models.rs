//! Public models for the user-disable action.
//!
//! Inputs and outputs serialize with `camelCase` field names so they can be
//! exchanged with a job runner as plain JSON objects.

use std::collections::HashMap;
use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::{ActionError, ErrorKind};

/// Placeholder reported by `halt` when no user principal name was supplied.
pub const UNKNOWN_USER: &str = "unknown";

/// Parameters of the `invoke` handler.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeParams {
    /// Account to disable. Required; must be non-empty after trimming.
    #[serde(default)]
    pub user_principal_name: Option<String>,
    /// Base URL override; takes precedence over the environment default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl InvokeParams {
    #[must_use]
    pub fn new(user_principal_name: impl Into<String>) -> Self {
        Self {
            user_principal_name: Some(user_principal_name.into()),
            address: None,
        }
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// A failure previously raised by `invoke`, as handed back by the job runner.
///
/// `status_code` and `kind` are the structured classification inputs; a
/// runner that only kept the message text may leave them empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl ReportedError {
    #[must_use]
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
            kind: None,
        }
    }
}

impl From<&ActionError> for ReportedError {
    fn from(err: &ActionError) -> Self {
        Self {
            message: err.to_string(),
            status_code: err.status_code(),
            kind: err.kind(),
        }
    }
}

/// Parameters of the `error` handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorParams {
    pub error: ReportedError,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_principal_name: Option<String>,
}

/// Parameters of the `halt` handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HaltParams {
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_principal_name: Option<String>,
}

/// Per-invocation context supplied by the job runner.
///
/// Holds string configuration (`environment`), sensitive values (`secrets`)
/// and job-scoped data used for parameter templating. Its `Debug` output lists
/// keys only.
#[derive(Default)]
pub struct ExecutionContext {
    pub environment: HashMap<String, String>,
    pub secrets: HashMap<String, SecretString>,
    pub data: serde_json::Value,
}

impl ExecutionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_secret(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets
            .insert(key.into(), SecretString::from(value.into()));
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    /// Environment value for `key`, if set.
    #[must_use]
    pub fn env(&self, key: &str) -> Option<&str> {
        self.environment.get(key).map(String::as_str)
    }

    /// Secret value for `key`, if set.
    #[must_use]
    pub fn secret(&self, key: &str) -> Option<&SecretString> {
        self.secrets.get(key)
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut env_keys: Vec<&str> = self.environment.keys().map(String::as_str).collect();
        env_keys.sort_unstable();
        let mut secret_keys: Vec<&str> = self.secrets.keys().map(String::as_str).collect();
        secret_keys.sort_unstable();
        f.debug_struct("ExecutionContext")
            .field("environment", &env_keys)
            .field("secrets", &secret_keys)
            .field("has_data", &!self.data.is_null())
            .finish()
    }
}

/// Outcome discriminator shared by all handler results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    Success,
    Halted,
    RetryRequested,
}

/// Result of a successful `invoke`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisableResult {
    pub status: ResultStatus,
    pub user_principal_name: String,
    pub account_enabled: bool,
}

impl DisableResult {
    #[must_use]
    pub fn success(user_principal_name: impl Into<String>, account_enabled: bool) -> Self {
        Self {
            status: ResultStatus::Success,
            user_principal_name: user_principal_name.into(),
            account_enabled,
        }
    }
}

/// Result of the `error` handler when the failure should be retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryDecision {
    pub status: ResultStatus,
}

impl RetryDecision {
    #[must_use]
    pub fn retry_requested() -> Self {
        Self {
            status: ResultStatus::RetryRequested,
        }
    }
}

/// Result of the `halt` handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HaltResult {
    pub status: ResultStatus,
    pub user_principal_name: String,
    pub reason: String,
}
