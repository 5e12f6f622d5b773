//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID assigned and propagated)
//!     → cors.rs (route layer on /submit: CORS headers on every response)
//!     → submit.rs (method gate, honeypot, relay call)
//!         → form.rs (urlencoded / multipart body → FormSubmission)
//!     → response.rs (negotiated JSON ack or 301 redirect)
//!     → Send to client
//! ```

pub mod cors;
pub mod form;
pub mod request;
pub mod response;
pub mod server;
pub mod submit;

pub use cors::CorsPolicy;
pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::ResponseMode;
pub use server::{AppState, HttpServer, ServerError};
