//! Form body extraction.
//!
//! Accepts both encodings a browser `<form>` can produce:
//! `application/x-www-form-urlencoded` and `multipart/form-data`.
//! File parts of a multipart body are skipped.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::FormRejection,
        FromRequest, Multipart, Request,
    },
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Form,
};
use thiserror::Error;

use crate::relay::FormSubmission;

/// Body could not be read as a form.
#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Urlencoded(#[from] FormRejection),

    #[error(transparent)]
    MultipartRejected(#[from] MultipartRejection),

    #[error(transparent)]
    Multipart(#[from] MultipartError),
}

impl FormError {
    /// Status axum would have answered the rejection with.
    pub fn status(&self) -> StatusCode {
        match self {
            FormError::Urlencoded(e) => e.status(),
            FormError::MultipartRejected(e) => e.status(),
            FormError::Multipart(e) => e.status(),
        }
    }
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"))
}

/// Consume the request body into a [`FormSubmission`].
pub async fn read_submission(request: Request) -> Result<FormSubmission, FormError> {
    if !is_multipart(request.headers()) {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(request, &()).await?;
        return Ok(FormSubmission::from_pairs(pairs));
    }

    let mut multipart = Multipart::from_request(request, &()).await?;
    let mut pairs = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        pairs.push((name, field.text().await?));
    }
    Ok(FormSubmission::from_pairs(pairs))
}
