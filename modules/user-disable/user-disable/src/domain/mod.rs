//! Domain layer of the user-disable action.

pub mod classify;
pub mod params;
pub mod request;
pub mod response;
pub mod service;

pub use classify::{Classification, classify};
pub use request::DisableRequest;
pub use service::UserDisableService;
