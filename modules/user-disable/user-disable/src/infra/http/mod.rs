//! Outbound HTTP transport to the directory service.

mod client;
mod error;
mod tls;

pub use client::{HttpClient, HttpResponse};
pub use error::HttpError;
