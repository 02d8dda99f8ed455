#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for the `invoke` handler against a mock directory service

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use common::{
    bearer, context_for, create_service, create_service_with_auth, create_service_with_body_limit,
};
use httpmock::prelude::*;
use serde_json::json;
use user_disable_sdk::{
    ActionError, AuthError, AuthHeaderProvider, AuthHeaders, ErrorKind, ExecutionContext,
    InvokeParams, ResultStatus, TemplateError, TemplateResolver, UserDisableClient,
};

// =============================================================================
// Request shape
// =============================================================================

#[tokio::test]
async fn test_sends_single_patch_with_headers_and_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PATCH)
            .path("/v1.0/users/jane.doe%40contoso.com")
            .header("authorization", bearer())
            .header("content-type", "application/json")
            .header("accept", "application/json")
            .json_body(json!({ "accountEnabled": false }));
        then.status(204);
    });

    let result = create_service()
        .invoke(InvokeParams::new("jane.doe@contoso.com"), &context_for(&server))
        .await
        .unwrap();

    mock.assert_calls(1);
    assert_eq!(result.status, ResultStatus::Success);
    assert_eq!(result.user_principal_name, "jane.doe@contoso.com");
    assert!(!result.account_enabled);
}

#[tokio::test]
async fn test_upn_with_reserved_characters_is_encoded() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PATCH)
            .path("/v1.0/users/first%20last%2Fops%40contoso.com");
        then.status(204);
    });

    let result = create_service()
        .invoke(InvokeParams::new("first last/ops@contoso.com"), &context_for(&server))
        .await
        .unwrap();

    mock.assert_calls(1);
    assert_eq!(result.user_principal_name, "first last/ops@contoso.com");
}

#[tokio::test]
async fn test_upn_is_trimmed_before_use() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PATCH).path("/v1.0/users/jane%40contoso.com");
        then.status(204);
    });

    let result = create_service()
        .invoke(InvokeParams::new("  jane@contoso.com\t"), &context_for(&server))
        .await
        .unwrap();

    mock.assert_calls(1);
    assert_eq!(result.user_principal_name, "jane@contoso.com");
}

#[tokio::test]
async fn test_address_parameter_overrides_environment() {
    let env_server = MockServer::start();
    let env_mock = env_server.mock(|when, then| {
        when.method(PATCH);
        then.status(204);
    });
    let override_server = MockServer::start();
    let override_mock = override_server.mock(|when, then| {
        when.method(PATCH).path("/v1.0/users/jane%40contoso.com");
        then.status(204);
    });

    // Trailing slash must not produce a double slash in the path
    let params = InvokeParams::new("jane@contoso.com")
        .with_address(format!("{}/", override_server.base_url()));
    create_service()
        .invoke(params, &context_for(&env_server))
        .await
        .unwrap();

    override_mock.assert_calls(1);
    env_mock.assert_calls(0);
}

// =============================================================================
// Response handling
// =============================================================================

#[tokio::test]
async fn test_ok_response_reports_account_enabled_from_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(PATCH);
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({ "id": "1", "accountEnabled": true }));
    });

    let result = create_service()
        .invoke(InvokeParams::new("jane@contoso.com"), &context_for(&server))
        .await
        .unwrap();

    assert_eq!(result.status, ResultStatus::Success);
    assert!(result.account_enabled);
}

#[tokio::test]
async fn test_forbidden_is_api_error_with_status() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PATCH);
        then.status(403)
            .json_body(json!({ "error": { "code": "Authorization_RequestDenied" } }));
    });

    let err = create_service()
        .invoke(InvokeParams::new("jane@contoso.com"), &context_for(&server))
        .await
        .unwrap_err();

    mock.assert_calls(1);
    assert_eq!(err.kind(), Some(ErrorKind::Api));
    assert_eq!(err.status_code(), Some(403));
    let message = err.to_string();
    assert!(message.contains("403"));
    assert!(message.contains("Forbidden"));
    assert!(message.contains("Authorization_RequestDenied"));
}

#[tokio::test]
async fn test_oversized_success_body_still_reports_success() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PATCH);
        then.status(200)
            .header("content-type", "application/json")
            .body(format!(r#"{{"accountEnabled":false,"notes":"{}"}}"#, "x".repeat(4096)));
    });

    let result = create_service_with_body_limit(1024)
        .invoke(InvokeParams::new("jane@contoso.com"), &context_for(&server))
        .await
        .unwrap();

    mock.assert_calls(1);
    assert_eq!(result.status, ResultStatus::Success);
    assert!(!result.account_enabled);
}

#[tokio::test]
async fn test_server_error_is_not_retried_internally() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PATCH);
        then.status(503).body("unavailable");
    });

    let err = create_service()
        .invoke(InvokeParams::new("jane@contoso.com"), &context_for(&server))
        .await
        .unwrap_err();

    mock.assert_calls(1);
    assert_eq!(err.status_code(), Some(503));
}

#[tokio::test]
async fn test_repeated_invoke_sends_identical_requests() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PATCH)
            .path("/v1.0/users/jane%40contoso.com")
            .json_body(json!({ "accountEnabled": false }));
        then.status(204);
    });
    let service = create_service();
    let ctx = context_for(&server);

    let first = service
        .invoke(InvokeParams::new("jane@contoso.com"), &ctx)
        .await
        .unwrap();
    let second = service
        .invoke(InvokeParams::new("jane@contoso.com"), &ctx)
        .await
        .unwrap();

    mock.assert_calls(2);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_connection_failure_is_network_error() {
    let ctx = ExecutionContext::new()
        .with_env(common::BASE_URL_KEY, "http://127.0.0.1:1")
        .with_secret(common::TOKEN_KEY, common::TOKEN);

    let err = create_service()
        .invoke(InvokeParams::new("jane@contoso.com"), &ctx)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Network));
}

// =============================================================================
// Failures before any request
// =============================================================================

#[tokio::test]
async fn test_missing_or_blank_upn_makes_no_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PATCH);
        then.status(204);
    });
    let service = create_service();
    let ctx = context_for(&server);

    for params in [InvokeParams::default(), InvokeParams::new(""), InvokeParams::new("   ")] {
        let err = service.invoke(params, &ctx).await.unwrap_err();
        assert!(matches!(err, ActionError::Validation { .. }), "got {err:?}");
    }

    mock.assert_calls(0);
}

#[tokio::test]
async fn test_missing_base_url_makes_no_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PATCH);
        then.status(204);
    });
    // The server URL sits under a key the service does not read
    let ctx = ExecutionContext::new()
        .with_env("OTHER_BASE_URL", server.base_url())
        .with_secret(common::TOKEN_KEY, common::TOKEN);

    let err = create_service()
        .invoke(InvokeParams::new("jane@contoso.com"), &ctx)
        .await
        .unwrap_err();

    assert!(matches!(err, ActionError::Configuration { .. }), "got {err:?}");
    assert!(err.to_string().contains(common::BASE_URL_KEY));
    mock.assert_calls(0);
}

#[tokio::test]
async fn test_plain_http_rejected_without_insecure_flag() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PATCH);
        then.status(204);
    });
    let service = user_disable::UserDisableService::with_static_bearer(
        &user_disable::UserDisableConfig::default(),
    )
    .unwrap();

    let err = service
        .invoke(InvokeParams::new("jane@contoso.com"), &context_for(&server))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Configuration));
    mock.assert_calls(0);
}

#[tokio::test]
async fn test_missing_token_is_authentication_error() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PATCH);
        then.status(204);
    });
    let ctx = ExecutionContext::new().with_env(common::BASE_URL_KEY, server.base_url());

    let err = create_service()
        .invoke(InvokeParams::new("jane@contoso.com"), &ctx)
        .await
        .unwrap_err();

    assert!(
        matches!(err, ActionError::Authentication(AuthError::MissingCredential(_))),
        "got {err:?}"
    );
    mock.assert_calls(0);
}

struct FailingAuth;

#[async_trait]
impl AuthHeaderProvider for FailingAuth {
    async fn auth_headers(&self, _ctx: &ExecutionContext) -> Result<AuthHeaders, AuthError> {
        Err(AuthError::Acquisition("token endpoint unreachable".to_owned()))
    }
}

#[tokio::test]
async fn test_auth_provider_failure_makes_no_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PATCH);
        then.status(204);
    });

    let err = create_service_with_auth(Arc::new(FailingAuth))
        .invoke(InvokeParams::new("jane@contoso.com"), &context_for(&server))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Authentication));
    assert!(err.to_string().contains("token endpoint unreachable"));
    mock.assert_calls(0);
}

// =============================================================================
// Templating
// =============================================================================

/// Resolves `{{key}}` against the job data.
struct MustacheResolver;

impl TemplateResolver for MustacheResolver {
    fn resolve(&self, value: &str, data: &serde_json::Value) -> Result<String, TemplateError> {
        match value.strip_prefix("{{").and_then(|v| v.strip_suffix("}}")) {
            Some(key) => data
                .get(key)
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
                .ok_or_else(|| TemplateError::Unresolved(key.to_owned())),
            None => Ok(value.to_owned()),
        }
    }
}

#[tokio::test]
async fn test_templated_upn_is_resolved_from_job_data() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PATCH).path("/v1.0/users/leaver%40contoso.com");
        then.status(204);
    });
    let service = create_service().with_template_resolver(Arc::new(MustacheResolver));
    let ctx = context_for(&server).with_data(json!({ "leaver": "leaver@contoso.com" }));

    let result = service
        .invoke(InvokeParams::new("{{leaver}}"), &ctx)
        .await
        .unwrap();

    mock.assert_calls(1);
    assert_eq!(result.user_principal_name, "leaver@contoso.com");
}
