//! Public API trait for the user-disable action.
//!
//! A job runner drives the three lifecycle handlers:
//!
//! ```ignore
//! let client: Arc<dyn UserDisableClient> = ...;
//!
//! match client.invoke(params, &ctx).await {
//!     Ok(result) => report(result),
//!     Err(err) => {
//!         // Let the action decide between retry and fatal failure
//!         let report = ReportedError::from(&err);
//!         let decision = client.error(ErrorParams { error: report, user_principal_name }, &ctx).await?;
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::error::ActionError;
use crate::models::{
    DisableResult, ErrorParams, ExecutionContext, HaltParams, HaltResult, InvokeParams,
    RetryDecision,
};

/// Lifecycle handlers of the user-disable action.
#[async_trait]
pub trait UserDisableClient: Send + Sync {
    /// Disable the account named by `params` with a single PATCH request.
    ///
    /// # Errors
    ///
    /// - `Validation` if the user principal name is missing or blank
    /// - `Configuration` if no base URL can be resolved
    /// - `Authentication` if the auth collaborator fails
    /// - `Api` for any non-2xx response
    /// - `Network` for transport failures
    async fn invoke(
        &self,
        params: InvokeParams,
        ctx: &ExecutionContext,
    ) -> Result<DisableResult, ActionError>;

    /// Decide whether a failure reported by the runner should be retried.
    ///
    /// # Errors
    ///
    /// Returns `Rethrown` carrying the original report when the failure is fatal.
    async fn error(
        &self,
        params: ErrorParams,
        ctx: &ExecutionContext,
    ) -> Result<RetryDecision, ActionError>;

    /// Report a halt. Performs no I/O.
    async fn halt(&self, params: HaltParams, ctx: &ExecutionContext) -> HaltResult;
}
