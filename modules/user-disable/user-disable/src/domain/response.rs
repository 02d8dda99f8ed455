//! Interpretation of the directory service response.

use http::StatusCode;
use serde::Deserialize;
use tracing::warn;
use user_disable_sdk::{ActionError, DisableResult};

use crate::infra::http::HttpResponse;

const TRUNCATION_MARKER: &str = "... [truncated]";

/// The part of a Graph user resource this action reads.
#[derive(Debug, Deserialize)]
struct UserState {
    #[serde(rename = "accountEnabled", default)]
    account_enabled: Option<bool>,
}

/// Map a response to the action result.
///
/// - `204` -> success, account reported disabled
/// - other `2xx` -> success, `accountEnabled` taken from the JSON body when present
/// - anything else -> [`ActionError::Api`] with status, reason phrase and body
///   text, marked when the body was cut at the size limit
///
/// # Errors
///
/// Returns [`ActionError::Api`] for non-2xx statuses.
pub fn interpret(user_principal_name: &str, response: &HttpResponse) -> Result<DisableResult, ActionError> {
    let status = response.status;

    if status == StatusCode::NO_CONTENT {
        return Ok(DisableResult::success(user_principal_name, false));
    }

    if status.is_success() {
        return Ok(DisableResult::success(
            user_principal_name,
            account_enabled_from_body(response),
        ));
    }

    let mut body = response.text();
    if response.truncated {
        body.push_str(TRUNCATION_MARKER);
    }
    Err(ActionError::api(
        status.as_u16(),
        status.canonical_reason().unwrap_or_default(),
        body,
    ))
}

fn account_enabled_from_body(response: &HttpResponse) -> bool {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return false;
    }
    match serde_json::from_slice::<UserState>(&response.body) {
        Ok(state) => state.account_enabled.unwrap_or(false),
        Err(e) => {
            warn!(
                status = response.status.as_u16(),
                error = %e,
                "2xx response body is not a JSON user object; reporting account as disabled"
            );
            false
        }
    }
}
