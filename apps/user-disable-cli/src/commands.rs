use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use user_disable::{UserDisableConfig, UserDisableService};
use user_disable_sdk::{
    ErrorKind, ErrorParams, HaltParams, InvokeParams, ReportedError, UserDisableClient,
};

use crate::context;
use crate::template::JobDataResolver;

#[derive(Args)]
pub struct InvokeArgs {
    /// User principal name of the account to disable
    #[arg(long)]
    upn: Option<String>,

    /// Directory service base URL (defaults to the configured environment variable)
    #[arg(long)]
    address: Option<String>,

    /// JSON file with job data for `{{ ... }}` placeholders
    #[arg(long)]
    data: Option<PathBuf>,
}

impl InvokeArgs {
    pub async fn run(self, config: &UserDisableConfig) -> Result<()> {
        let ctx = context::from_process(config, self.data.as_deref())?;
        let service = service(config)?.with_template_resolver(Arc::new(JobDataResolver));

        let params = InvokeParams {
            user_principal_name: self.upn,
            address: self.address,
        };
        match service.invoke(params, &ctx).await {
            Ok(result) => print_json(&result),
            Err(err) => {
                // Printed so a runner can feed it straight back into `error`
                print_json(&ReportedError::from(&err))?;
                Err(err.into())
            }
        }
    }
}

#[derive(Args)]
pub struct ErrorArgs {
    /// Message of the failure being reported
    #[arg(long)]
    message: String,

    /// HTTP status code of the failure, if any
    #[arg(long)]
    status: Option<u16>,

    /// Error kind (validation, configuration, authentication, api, network)
    #[arg(long, value_parser = parse_kind)]
    kind: Option<ErrorKind>,

    /// User principal name the failure relates to
    #[arg(long)]
    upn: Option<String>,
}

impl ErrorArgs {
    pub async fn run(self, config: &UserDisableConfig) -> Result<()> {
        let ctx = context::from_process(config, None)?;
        let params = ErrorParams {
            error: ReportedError {
                message: self.message,
                status_code: self.status,
                kind: self.kind,
            },
            user_principal_name: self.upn,
        };

        let decision = service(config)?.error(params, &ctx).await?;
        print_json(&decision)
    }
}

#[derive(Args)]
pub struct HaltArgs {
    /// Why the job was halted
    #[arg(long)]
    reason: String,

    /// User principal name of the halted job
    #[arg(long)]
    upn: Option<String>,
}

impl HaltArgs {
    pub async fn run(self, config: &UserDisableConfig) -> Result<()> {
        let ctx = context::from_process(config, None)?;
        let params = HaltParams {
            reason: self.reason,
            user_principal_name: self.upn,
        };

        let result = service(config)?.halt(params, &ctx).await;
        print_json(&result)
    }
}

fn service(config: &UserDisableConfig) -> Result<UserDisableService> {
    UserDisableService::with_static_bearer(config).context("failed to build HTTP client")
}

fn parse_kind(raw: &str) -> Result<ErrorKind, String> {
    serde_json::from_value(serde_json::Value::String(raw.to_ascii_lowercase()))
        .map_err(|_| format!("unknown error kind '{raw}'"))
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
