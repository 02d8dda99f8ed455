//! Error types for the user-disable action.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::AuthError;
use crate::models::ReportedError;

/// Coarse classification of an [`ActionError`].
///
/// Serialized alongside a [`ReportedError`] so a job runner can hand a failure
/// back to the `error` handler without losing its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Configuration,
    Authentication,
    Api,
    Network,
}

/// Errors raised by the user-disable lifecycle handlers.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Invocation parameters are missing or malformed. Raised before any network I/O.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// No usable base URL (or other required setting) could be resolved.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// The auth collaborator could not produce a bearer credential.
    #[error("authentication error: {0}")]
    Authentication(#[from] AuthError),

    /// The directory service answered with a non-2xx status.
    ///
    /// The message embeds the numeric status, so text-based consumers still see
    /// e.g. `"403"`; structured consumers should use [`ActionError::status_code`].
    #[error("Graph API request failed: HTTP {status_code} {status_text}: {body}")]
    Api {
        status_code: u16,
        status_text: String,
        body: String,
    },

    /// Transport-level failure (DNS, connection refused, TLS, timeout).
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A previously reported failure re-raised by the `error` handler as fatal.
    #[error("{}", .0.message)]
    Rethrown(ReportedError),
}

impl ActionError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an API error from a non-2xx response.
    #[must_use]
    pub fn api(status_code: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Api {
            status_code,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// Create a network error wrapping a transport failure.
    #[must_use]
    pub fn network(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Network(source.into())
    }

    /// Category of this error, if known.
    ///
    /// A rethrown report keeps whatever kind the runner supplied with it.
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Validation { .. } => Some(ErrorKind::Validation),
            Self::Configuration { .. } => Some(ErrorKind::Configuration),
            Self::Authentication(_) => Some(ErrorKind::Authentication),
            Self::Api { .. } => Some(ErrorKind::Api),
            Self::Network(_) => Some(ErrorKind::Network),
            Self::Rethrown(report) => report.kind,
        }
    }

    /// HTTP status code returned by the directory service, if any.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status_code, .. } => Some(*status_code),
            Self::Rethrown(report) => report.status_code,
            _ => None,
        }
    }
}
