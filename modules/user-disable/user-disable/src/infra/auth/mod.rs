//! Built-in auth header providers.

mod static_bearer;

pub use static_bearer::StaticBearerProvider;
