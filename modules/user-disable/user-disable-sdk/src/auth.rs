//! Bearer credential collaborator.
//!
//! Token acquisition (static secret, `OAuth2` client credentials, `OAuth2`
//! authorization code) lives behind [`AuthHeaderProvider`]. The action only
//! consumes the resulting [`AuthHeaders`].

use async_trait::async_trait;
use http::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::models::ExecutionContext;

/// Errors produced while building auth headers.
///
/// Variants never carry the credential itself.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The credential source named by the key is not configured.
    #[error("missing credential: {0}")]
    MissingCredential(String),

    /// The credential exists but cannot be used in a header.
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// The provider failed to obtain a token.
    #[error("token acquisition failed: {0}")]
    Acquisition(String),
}

/// Header set carrying a bearer credential.
///
/// Always contains an `Authorization: Bearer <token>` entry, marked sensitive
/// so it is not rendered by `http`'s `Debug` implementation.
#[derive(Debug, Clone)]
pub struct AuthHeaders(HeaderMap);

impl AuthHeaders {
    /// Build headers from a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredential`] if the token is empty or not a
    /// valid header value.
    pub fn bearer(token: &SecretString) -> Result<Self, AuthError> {
        let raw = token.expose_secret().trim();
        if raw.is_empty() {
            return Err(AuthError::InvalidCredential("bearer token is empty".to_owned()));
        }
        let mut value = HeaderValue::from_str(&format!("Bearer {raw}")).map_err(|_| {
            AuthError::InvalidCredential("bearer token contains invalid characters".to_owned())
        })?;
        value.set_sensitive(true);

        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, value);
        Ok(Self(map))
    }

    /// Wrap a header map produced by an external provider.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredential`] if the map has no
    /// `Authorization: Bearer ...` entry.
    pub fn from_header_map(mut map: HeaderMap) -> Result<Self, AuthError> {
        let is_bearer = map
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("Bearer ") && v.len() > "Bearer ".len());
        if !is_bearer {
            return Err(AuthError::InvalidCredential(
                "provider did not return a bearer Authorization header".to_owned(),
            ));
        }
        if let Some(value) = map.get_mut(AUTHORIZATION) {
            value.set_sensitive(true);
        }
        Ok(Self(map))
    }

    /// Iterate over all header entries.
    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.0.iter()
    }

    /// The `Authorization` header value.
    #[must_use]
    pub fn authorization(&self) -> Option<&HeaderValue> {
        self.0.get(AUTHORIZATION)
    }
}

/// Supplies the headers that authenticate a request to the directory service.
#[async_trait]
pub trait AuthHeaderProvider: Send + Sync {
    /// Produce auth headers for one request.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if no usable credential can be produced.
    async fn auth_headers(&self, ctx: &ExecutionContext) -> Result<AuthHeaders, AuthError>;
}
