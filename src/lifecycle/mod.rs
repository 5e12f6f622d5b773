//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → every subscriber (HTTP server) stops accepting → drain → exit
//! ```
//!
//! # Design Decisions
//! - Startup is linear in main: config, logging, metrics, listener, server
//! - In-flight requests finish; their relay calls are not cancelled

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
