//! Lifecycle handlers of the user-disable action.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use user_disable_sdk::{
    ActionError, AuthHeaderProvider, DisableResult, ErrorParams, ExecutionContext, HaltParams,
    HaltResult, InvokeParams, ResultStatus, RetryDecision, TemplateResolver, UNKNOWN_USER,
    UserDisableClient,
};

use super::classify::{Classification, classify};
use super::params::{apply_templates, resolve};
use super::request::DisableRequest;
use super::response::interpret;
use crate::config::UserDisableConfig;
use crate::infra::auth::StaticBearerProvider;
use crate::infra::http::{HttpClient, HttpError};

/// Disables directory accounts through Microsoft Graph.
///
/// Every `invoke` sends at most one request; retry is left to the job runner,
/// which consults [`UserDisableClient::error`] after a failure.
pub struct UserDisableService {
    http: HttpClient,
    auth: Arc<dyn AuthHeaderProvider>,
    templates: Option<Arc<dyn TemplateResolver>>,
    base_url_env_key: String,
}

impl UserDisableService {
    /// Create a service that authenticates through `auth`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the HTTP client cannot be built from `config.http`.
    pub fn new(
        config: &UserDisableConfig,
        auth: Arc<dyn AuthHeaderProvider>,
    ) -> Result<Self, HttpError> {
        Ok(Self {
            http: HttpClient::new(&config.http)?,
            auth,
            templates: None,
            base_url_env_key: config.base_url_env_key.clone(),
        })
    }

    /// Create a service that reads a bearer token from the secret named by
    /// `config.bearer_token_secret_key`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the HTTP client cannot be built from `config.http`.
    pub fn with_static_bearer(config: &UserDisableConfig) -> Result<Self, HttpError> {
        let auth = Arc::new(StaticBearerProvider::new(
            config.bearer_token_secret_key.clone(),
        ));
        Self::new(config, auth)
    }

    /// Substitute placeholders in invocation parameters before validation.
    #[must_use]
    pub fn with_template_resolver(mut self, resolver: Arc<dyn TemplateResolver>) -> Self {
        self.templates = Some(resolver);
        self
    }
}

#[async_trait]
impl UserDisableClient for UserDisableService {
    #[tracing::instrument(skip_all, fields(upn = tracing::field::Empty))]
    async fn invoke(
        &self,
        params: InvokeParams,
        ctx: &ExecutionContext,
    ) -> Result<DisableResult, ActionError> {
        let params = match &self.templates {
            Some(resolver) => apply_templates(params, resolver.as_ref(), &ctx.data),
            None => params,
        };

        let resolved = resolve(&params, ctx, &self.base_url_env_key)?;
        tracing::Span::current().record("upn", resolved.user_principal_name.as_str());

        let auth = self.auth.auth_headers(ctx).await?;

        let request = DisableRequest::new(&resolved.base_url, &resolved.user_principal_name);
        debug!(url = %request.url(), "Disabling user account");

        let response = self
            .http
            .send(request.into_http(&auth)?)
            .await
            .map_err(action_error_from_http)?;
        debug!(status = response.status.as_u16(), "Directory service responded");

        match interpret(&resolved.user_principal_name, &response) {
            Ok(result) => {
                info!(account_enabled = result.account_enabled, "User account disabled");
                Ok(result)
            }
            Err(e) => {
                warn!(error = %e, "Directory service rejected the disable request");
                Err(e)
            }
        }
    }

    #[tracing::instrument(skip_all, fields(upn = %params.user_principal_name.as_deref().unwrap_or(UNKNOWN_USER)))]
    async fn error(
        &self,
        params: ErrorParams,
        _ctx: &ExecutionContext,
    ) -> Result<RetryDecision, ActionError> {
        let report = params.error;
        match classify(&report) {
            Classification::Retry => {
                info!(
                    error = %report.message,
                    status = ?report.status_code,
                    "Disable failed, requesting retry"
                );
                Ok(RetryDecision::retry_requested())
            }
            Classification::Fatal => {
                warn!(
                    error = %report.message,
                    status = ?report.status_code,
                    "Disable failed permanently"
                );
                Err(ActionError::Rethrown(report))
            }
        }
    }

    async fn halt(&self, params: HaltParams, _ctx: &ExecutionContext) -> HaltResult {
        // Echoed as received; only a missing or blank UPN is replaced
        let user_principal_name = params
            .user_principal_name
            .filter(|upn| !upn.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_USER.to_owned());
        info!(upn = %user_principal_name, reason = %params.reason, "User disable halted");

        HaltResult {
            status: ResultStatus::Halted,
            user_principal_name,
            reason: params.reason,
        }
    }
}

/// Malformed or disallowed URLs can only come from the base URL, so they are
/// configuration errors; everything else happened on the wire.
fn action_error_from_http(err: HttpError) -> ActionError {
    match err {
        HttpError::InvalidUri { .. } | HttpError::InvalidScheme { .. } => {
            ActionError::configuration(err.to_string())
        }
        other => ActionError::network(other),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;
    use tracing_test::traced_test;
    use user_disable_sdk::{ErrorKind, ReportedError};

    fn service() -> UserDisableService {
        let config = UserDisableConfig {
            http: crate::config::HttpSettings::for_testing(),
            ..UserDisableConfig::default()
        };
        UserDisableService::with_static_bearer(&config).unwrap()
    }

    #[test]
    fn url_errors_map_to_configuration() {
        let err = action_error_from_http(HttpError::InvalidScheme {
            scheme: "ftp".to_owned(),
            reason: "only http and https are supported".to_owned(),
        });
        assert_eq!(err.kind(), Some(ErrorKind::Configuration));

        let err = action_error_from_http(HttpError::InvalidUri {
            url: "/relative".to_owned(),
            reason: "URL must be absolute with a host".to_owned(),
        });
        assert_eq!(err.kind(), Some(ErrorKind::Configuration));
    }

    #[test]
    fn transport_errors_map_to_network() {
        let err = action_error_from_http(HttpError::Timeout(Duration::from_secs(1)));
        assert_eq!(err.kind(), Some(ErrorKind::Network));
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn halt_echoes_reason_and_upn() {
        let result = service()
            .halt(
                HaltParams {
                    reason: "operator cancelled".to_owned(),
                    user_principal_name: Some("jane@contoso.com".to_owned()),
                },
                &ExecutionContext::new(),
            )
            .await;

        assert_eq!(result.status, ResultStatus::Halted);
        assert_eq!(result.user_principal_name, "jane@contoso.com");
        assert_eq!(result.reason, "operator cancelled");
    }

    #[tokio::test]
    async fn halt_echoes_upn_as_received() {
        let result = service()
            .halt(
                HaltParams {
                    reason: "operator cancelled".to_owned(),
                    user_principal_name: Some(" jane@contoso.com ".to_owned()),
                },
                &ExecutionContext::new(),
            )
            .await;

        assert_eq!(result.user_principal_name, " jane@contoso.com ");
    }

    #[tokio::test]
    async fn halt_without_upn_reports_unknown() {
        for upn in [None, Some(String::new()), Some(" \t ".to_owned())] {
            let result = service()
                .halt(
                    HaltParams {
                        reason: "timeout".to_owned(),
                        user_principal_name: upn,
                    },
                    &ExecutionContext::new(),
                )
                .await;
            assert_eq!(result.user_principal_name, UNKNOWN_USER);
        }
    }

    #[tokio::test]
    async fn fatal_error_is_rethrown_unchanged() {
        let report = ReportedError {
            message: "Graph API request failed: HTTP 403 Forbidden: denied".to_owned(),
            status_code: Some(403),
            kind: Some(ErrorKind::Api),
        };
        let err = service()
            .error(
                ErrorParams {
                    error: report.clone(),
                    user_principal_name: None,
                },
                &ExecutionContext::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), report.message);
        assert_eq!(err.status_code(), Some(403));
        match err {
            ActionError::Rethrown(inner) => assert_eq!(inner, report),
            other => panic!("expected Rethrown, got {other:?}"),
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn bearer_token_never_reaches_logs() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PATCH).path("/v1.0/users/jane%40contoso.com");
            then.status(204);
        });
        let ctx = ExecutionContext::new()
            .with_env("GRAPH_BASE_URL", server.base_url())
            .with_secret("GRAPH_BEARER_TOKEN", "very-secret-token-value");

        service()
            .invoke(InvokeParams::new("jane@contoso.com"), &ctx)
            .await
            .unwrap();

        mock.assert_calls(1);
        assert!(logs_contain("Disabling user account"));
        assert!(!logs_contain("very-secret-token-value"));
    }
}
