//! The disable request sent to Microsoft Graph.

use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use http::Request;
use http_body_util::Full;
use user_disable_sdk::{ActionError, AuthHeaders};

/// Versioned path of the users collection.
pub const USERS_PATH: &str = "/v1.0/users/";

/// The only body this action ever sends.
pub const DISABLE_BODY: &[u8] = br#"{"accountEnabled":false}"#;

const APPLICATION_JSON: &str = "application/json";

/// `PATCH <base>/v1.0/users/<encoded UPN>` with `{"accountEnabled": false}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisableRequest {
    url: String,
}

impl DisableRequest {
    /// Build the request target. `base_url` must not end with a slash.
    ///
    /// The UPN is percent-encoded as a single path segment, so characters such
    /// as `@`, `/`, `?`, `#` and spaces cannot change the request path.
    #[must_use]
    pub fn new(base_url: &str, user_principal_name: &str) -> Self {
        Self {
            url: format!(
                "{base_url}{USERS_PATH}{}",
                urlencoding::encode(user_principal_name)
            ),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Assemble the HTTP request with the given auth headers.
    ///
    /// `Accept` and `Content-Type` are always `application/json`, whatever the
    /// auth provider supplied.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Configuration`] if the URL is not a valid URI,
    /// which can only come from a malformed base URL.
    pub fn into_http(self, auth: &AuthHeaders) -> Result<Request<Full<Bytes>>, ActionError> {
        let mut builder = Request::patch(self.url.as_str());
        for (name, value) in auth.iter() {
            builder = builder.header(name, value.clone());
        }
        let mut request = builder
            .body(Full::new(Bytes::from_static(DISABLE_BODY)))
            .map_err(|e| {
                ActionError::configuration(format!("invalid base URL in '{}': {e}", self.url))
            })?;

        let headers = request.headers_mut();
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        Ok(request)
    }
}
