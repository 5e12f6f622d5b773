//! Contact form relay library.
//!
//! Accepts browser form posts on `/submit` and forwards each one as a single
//! record-creation call to an Airtable-compatible API.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;

pub use config::schema::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
