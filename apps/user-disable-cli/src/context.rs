use std::path::Path;

use anyhow::{Context, Result};
use user_disable::UserDisableConfig;
use user_disable_sdk::ExecutionContext;

/// Build the execution context a job runner would supply.
///
/// Every process environment variable lands in the environment map, except the
/// configured bearer-token key, which becomes the only secret.
pub fn from_process(config: &UserDisableConfig, data: Option<&Path>) -> Result<ExecutionContext> {
    let vars = std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)));
    let mut ctx = from_vars(config, vars);

    if let Some(path) = data {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read job data from {}", path.display()))?;
        let data = serde_json::from_str(&raw)
            .with_context(|| format!("job data in {} is not valid JSON", path.display()))?;
        ctx = ctx.with_data(data);
    }

    Ok(ctx)
}

fn from_vars(
    config: &UserDisableConfig,
    vars: impl IntoIterator<Item = (String, String)>,
) -> ExecutionContext {
    vars.into_iter()
        .fold(ExecutionContext::new(), |ctx, (key, value)| {
            if key == config.bearer_token_secret_key {
                ctx.with_secret(key, value)
            } else {
                ctx.with_env(key, value)
            }
        })
}
