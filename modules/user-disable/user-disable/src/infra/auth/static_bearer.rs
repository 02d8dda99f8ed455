use async_trait::async_trait;
use tracing::debug;
use user_disable_sdk::{AuthError, AuthHeaderProvider, AuthHeaders, ExecutionContext};

/// Reads a pre-issued bearer token from the execution context secrets.
///
/// Token acquisition and refresh are the secret owner's concern; this provider
/// only turns the stored value into an `Authorization` header.
#[derive(Debug, Clone)]
pub struct StaticBearerProvider {
    secret_key: String,
}

impl StaticBearerProvider {
    #[must_use]
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
        }
    }
}

#[async_trait]
impl AuthHeaderProvider for StaticBearerProvider {
    async fn auth_headers(&self, ctx: &ExecutionContext) -> Result<AuthHeaders, AuthError> {
        let token = ctx
            .secret(&self.secret_key)
            .ok_or_else(|| AuthError::MissingCredential(self.secret_key.clone()))?;
        debug!(secret_key = %self.secret_key, "using static bearer token");
        AuthHeaders::bearer(token)
    }
}
