//! Response construction for the submit endpoint.
//!
//! # Responsibilities
//! - Decide between a JSON acknowledgment and a redirect (`Accept` header)
//! - Build each fixed response shape the endpoint can return
//!
//! # Design Decisions
//! - Browser form posts always get the thank-you redirect, even when the
//!   relay failed; only JSON callers can observe a failure
//! - Failure JSON carries a generic message; details stay in the logs

use axum::{
    http::{
        header::{ACCEPT, ALLOW, LOCATION},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const BOT_SUSPECTED: &str = "Bot suspected";
pub const RELAY_FAILED: &str = "Failed to store submission";

/// How the caller wants to be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// `Accept` mentions `application/json`.
    Json,
    /// Anything else: plain browser form post.
    Redirect,
}

impl ResponseMode {
    pub fn negotiate(headers: &HeaderMap) -> Self {
        let wants_json = headers
            .get_all(ACCEPT)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .any(|v| v.contains("application/json"));

        if wants_json {
            ResponseMode::Json
        } else {
            ResponseMode::Redirect
        }
    }
}

/// JSON body returned to JSON-accepting callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitAck {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmitAck {
    fn ok() -> Self {
        Self {
            success: true,
            reason: None,
            error: None,
        }
    }

    fn rejected(reason: &str) -> Self {
        Self {
            success: false,
            reason: Some(reason.to_string()),
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            reason: None,
            error: Some(error.into()),
        }
    }
}

/// 204 for a CORS preflight.
pub fn preflight() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

pub fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(ALLOW, HeaderValue::from_static("POST, OPTIONS"))],
        "Method Not Allowed",
    )
        .into_response()
}

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

/// Honeypot hit: looks like an ordinary 200 so the sender learns nothing.
pub fn bot_suspected() -> Response {
    (StatusCode::OK, Json(SubmitAck::rejected(BOT_SUSPECTED))).into_response()
}

pub fn acknowledged() -> Response {
    (StatusCode::OK, Json(SubmitAck::ok())).into_response()
}

pub fn relay_failed() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(SubmitAck::failed(RELAY_FAILED)),
    )
        .into_response()
}

/// 301 to the thank-you page. `Redirect::permanent` would be a 308.
pub fn redirect(location: &HeaderValue) -> Response {
    (StatusCode::MOVED_PERMANENTLY, [(LOCATION, location.clone())]).into_response()
}

/// 4xx for a body that is not a readable form (400, 413 or 415).
pub fn invalid_form(mode: ResponseMode, status: StatusCode, detail: &str) -> Response {
    match mode {
        ResponseMode::Json => (status, Json(SubmitAck::failed(detail))).into_response(),
        ResponseMode::Redirect => {
            (status, format!("Invalid form body: {detail}")).into_response()
        }
    }
}
