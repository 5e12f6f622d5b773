//! Relay error definitions.

use thiserror::Error;

/// Errors that can occur while forwarding a submission upstream.
#[derive(Debug, Error)]
pub enum RelayError {
    /// HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Record store URL could not be built from the configuration.
    #[error("Invalid record store URL: {0}")]
    InvalidUrl(String),

    /// Connection, TLS or body transfer failed.
    #[error("Record store unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// Record store did not answer within the relay deadline.
    #[error("Record store timed out after {0} seconds")]
    Timeout(u64),

    /// Record store answered with a non-success status.
    #[error("Record store returned {status}: {body}")]
    Upstream { status: u16, body: String },
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;
