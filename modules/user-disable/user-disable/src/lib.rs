#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! User-Disable Action
//!
//! Disables a Microsoft Entra ID (Azure AD) account by sending
//! `PATCH {base}/v1.0/users/{upn}` with `{"accountEnabled": false}` to
//! Microsoft Graph, and implements the `error`/`halt` lifecycle handlers a
//! job runner calls around it.
//!
//! [`UserDisableService`] is the [`UserDisableClient`] implementation:
//!
//! ```ignore
//! let config = UserDisableConfig::load(None)?;
//! let service = UserDisableService::with_static_bearer(&config)?;
//!
//! let ctx = ExecutionContext::new()
//!     .with_env("GRAPH_BASE_URL", "https://graph.microsoft.com")
//!     .with_secret("GRAPH_BEARER_TOKEN", token);
//! let result = service.invoke(InvokeParams::new("jane.doe@contoso.com"), &ctx).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod config;
pub mod domain;
pub mod infra;

pub use config::{ConfigError, HttpSettings, TlsRoots, UserDisableConfig};
pub use domain::UserDisableService;
pub use infra::auth::StaticBearerProvider;
pub use infra::http::{HttpClient, HttpError, HttpResponse};

pub use user_disable_sdk::UserDisableClient;
