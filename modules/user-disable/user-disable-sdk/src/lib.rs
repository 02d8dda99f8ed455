#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! User-Disable SDK
//!
//! This crate provides the public contract of the `user-disable` action:
//!
//! - [`UserDisableClient`] - Lifecycle API (`invoke`, `error`, `halt`) called by a job runner
//! - [`AuthHeaderProvider`] - Collaborator that supplies the bearer credential
//! - [`TemplateResolver`] - Collaborator that substitutes placeholders in parameters
//! - [`InvokeParams`], [`ErrorParams`], [`HaltParams`], [`ExecutionContext`] - Inputs
//! - [`DisableResult`], [`RetryDecision`], [`HaltResult`] - Outputs
//! - [`ActionError`] - Error taxonomy
//!
//! ## Usage
//!
//! ```ignore
//! use user_disable_sdk::{ExecutionContext, InvokeParams, UserDisableClient};
//!
//! let params = InvokeParams::new("jane.doe@contoso.com");
//! let result = client.invoke(params, &ctx).await?;
//! assert!(!result.account_enabled);
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod auth;
pub mod error;
pub mod models;
pub mod template;

pub use api::UserDisableClient;
pub use auth::{AuthError, AuthHeaderProvider, AuthHeaders};
pub use error::{ActionError, ErrorKind};
pub use models::{
    DisableResult, ErrorParams, ExecutionContext, HaltParams, HaltResult, InvokeParams,
    ReportedError, ResultStatus, RetryDecision, UNKNOWN_USER,
};
pub use template::{TemplateError, TemplateResolver};
