//! Parameter templating, validation and base URL resolution.

use tracing::warn;
use user_disable_sdk::{ActionError, ExecutionContext, InvokeParams, TemplateResolver};

/// Invocation parameters after validation, ready to build a request from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedParams {
    /// Trimmed, non-empty user principal name.
    pub user_principal_name: String,
    /// Base URL without trailing slash.
    pub base_url: String,
}

/// Substitute placeholders in every string parameter.
///
/// Best effort: a value that fails to resolve is kept as-is and a warning is logged.
#[must_use]
pub fn apply_templates(
    mut params: InvokeParams,
    resolver: &dyn TemplateResolver,
    data: &serde_json::Value,
) -> InvokeParams {
    let fields = [
        ("userPrincipalName", &mut params.user_principal_name),
        ("address", &mut params.address),
    ];
    for (name, slot) in fields {
        let Some(raw) = slot.as_deref() else {
            continue;
        };
        match resolver.resolve(raw, data) {
            Ok(resolved) => *slot = Some(resolved),
            Err(e) => warn!(param = name, error = %e, "template substitution failed, using raw value"),
        }
    }
    params
}

/// Validate the user principal name and resolve the base URL.
///
/// The base URL comes from `params.address` if set and non-blank, otherwise from
/// the environment entry named by `base_url_env_key`.
///
/// # Errors
///
/// - [`ActionError::Validation`] if the user principal name is missing or blank
/// - [`ActionError::Configuration`] if no base URL is available
pub fn resolve(
    params: &InvokeParams,
    ctx: &ExecutionContext,
    base_url_env_key: &str,
) -> Result<ResolvedParams, ActionError> {
    let user_principal_name = non_blank(params.user_principal_name.as_deref())
        .ok_or_else(|| ActionError::validation("userPrincipalName is required"))?
        .to_owned();

    let base_url = non_blank(params.address.as_deref())
        .or_else(|| non_blank(ctx.env(base_url_env_key)))
        .map(|url| url.trim_end_matches('/'))
        .filter(|url| !url.is_empty())
        .ok_or_else(|| {
            ActionError::configuration(format!(
                "no base URL: set the `address` parameter or the `{base_url_env_key}` environment value"
            ))
        })?
        .to_owned();

    Ok(ResolvedParams {
        user_principal_name,
        base_url,
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
