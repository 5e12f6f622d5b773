//! Submission relay subsystem.
//!
//! # Data Flow
//! ```text
//! form pairs (urlencoded or multipart)
//!     → submission.rs (FormSubmission, honeypot check)
//!     → record.rs (RecordPayload with the seven record fields + UTC date)
//!     → client.rs (single POST to the record store API)
//!     → RelayResult<()> back to the submit handler
//! ```
//!
//! # Design Decisions
//! - One relay call per accepted submission, never retried
//! - Nothing is retained after the call returns
//! - Upstream response bodies are only read for logging

pub mod client;
pub mod record;
pub mod submission;
pub mod types;

pub use client::RecordStoreClient;
pub use record::{CreateRecordRequest, RecordPayload};
pub use submission::FormSubmission;
pub use types::{RelayError, RelayResult};
