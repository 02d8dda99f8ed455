#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Common test utilities for user-disable integration tests

use std::sync::Arc;

use httpmock::MockServer;
use user_disable::{HttpSettings, UserDisableConfig, UserDisableService};
use user_disable_sdk::{AuthHeaderProvider, ExecutionContext};

pub const BASE_URL_KEY: &str = "GRAPH_BASE_URL";
pub const TOKEN_KEY: &str = "GRAPH_BEARER_TOKEN";
pub const TOKEN: &str = "test-token";

pub fn test_config() -> UserDisableConfig {
    UserDisableConfig {
        http: HttpSettings::for_testing(),
        ..UserDisableConfig::default()
    }
}

pub fn create_service() -> UserDisableService {
    UserDisableService::with_static_bearer(&test_config()).unwrap()
}

pub fn create_service_with_body_limit(max_body_size: usize) -> UserDisableService {
    let config = UserDisableConfig {
        http: HttpSettings {
            max_body_size,
            ..HttpSettings::for_testing()
        },
        ..UserDisableConfig::default()
    };
    UserDisableService::with_static_bearer(&config).unwrap()
}

pub fn create_service_with_auth(auth: Arc<dyn AuthHeaderProvider>) -> UserDisableService {
    UserDisableService::new(&test_config(), auth).unwrap()
}

/// Context pointing at the mock server, with a bearer token.
pub fn context_for(server: &MockServer) -> ExecutionContext {
    ExecutionContext::new()
        .with_env(BASE_URL_KEY, server.base_url())
        .with_secret(TOKEN_KEY, TOKEN)
}

pub fn bearer() -> String {
    format!("Bearer {TOKEN}")
}
