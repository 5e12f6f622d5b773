//! `/submit` handler.

use axum::{
    extract::{Request, State},
    http::Method,
    response::Response,
};

use crate::http::form::read_submission;
use crate::http::request::request_id;
use crate::http::response::{self, ResponseMode};
use crate::http::server::AppState;
use crate::observability::metrics::{self, Outcome};
use crate::relay::{RecordPayload, RelayError};

/// Accepts a contact form post and forwards it to the record store.
///
/// `OPTIONS` answers the preflight, every method other than `POST` is a 405.
/// CORS headers are added by the route layer, not here.
pub async fn submit(State(state): State<AppState>, request: Request) -> Response {
    let request_id = request_id(request.headers()).to_owned();
    let method = request.method().clone();

    if method == Method::OPTIONS {
        return response::preflight();
    }
    if method != Method::POST {
        tracing::debug!(request_id = %request_id, method = %method, "Rejected method");
        return response::method_not_allowed();
    }

    let mode = ResponseMode::negotiate(request.headers());

    let submission = match read_submission(request).await {
        Ok(submission) => submission,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Unreadable form body");
            metrics::record_submission(Outcome::Invalid);
            return response::invalid_form(mode, e.status(), &e.to_string());
        }
    };

    if submission.is_bot_suspected() {
        tracing::info!(request_id = %request_id, "Honeypot filled, submission dropped");
        metrics::record_submission(Outcome::Bot);
        return response::bot_suspected();
    }

    let payload = RecordPayload::stamped_now(&submission);
    let relayed = tokio::time::timeout(state.relay_timeout, state.store.create_record(&payload))
        .await
        .unwrap_or_else(|_| Err(RelayError::Timeout(state.relay_timeout.as_secs())));

    match &relayed {
        Ok(()) => {
            tracing::info!(request_id = %request_id, date = %payload.date_of_entry, "Submission relayed");
            metrics::record_submission(Outcome::Relayed);
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Relay call failed");
            metrics::record_submission(Outcome::Failed);
        }
    }

    match (mode, relayed) {
        (ResponseMode::Json, Ok(())) => response::acknowledged(),
        (ResponseMode::Json, Err(_)) => response::relay_failed(),
        (ResponseMode::Redirect, _) => response::redirect(&state.thank_you_url),
    }
}

/// Everything that is not `/submit`.
pub async fn not_found() -> Response {
    response::not_found()
}
