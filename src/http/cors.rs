//! CORS headers for the submit endpoint.
//!
//! Unlike a general purpose CORS layer, every response on `/submit` carries
//! the full header set, and an origin outside the allow-list gets the literal
//! `null` instead of no header at all.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE, ORIGIN, VARY,
        },
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::Response,
};

use crate::config::CorsConfig;

pub const ALLOWED_METHODS: &str = "POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// Read-only origin allow-list, built once at startup.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origins: Vec<HeaderValue>,
    max_age: HeaderValue,
}

impl CorsPolicy {
    pub fn from_config(config: &CorsConfig) -> Self {
        let allowed_origins = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        Self {
            allowed_origins,
            max_age: HeaderValue::from(config.max_age_secs),
        }
    }

    /// Echo `origin` when it is allowed, otherwise `null`.
    pub fn allow_origin(&self, origin: Option<&HeaderValue>) -> HeaderValue {
        origin
            .filter(|o| self.allowed_origins.contains(*o))
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static("null"))
    }

    /// Write the CORS header set onto a response.
    pub fn apply(&self, origin: Option<&HeaderValue>, headers: &mut HeaderMap) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin(origin));
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
        headers.insert(ACCESS_CONTROL_MAX_AGE, self.max_age.clone());
        headers.append(VARY, HeaderValue::from_static("Origin"));
    }
}

/// Route layer attaching CORS headers to whatever the handler returned.
pub async fn cors_headers(
    State(policy): State<Arc<CorsPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request.headers().get(ORIGIN).cloned();
    let mut response = next.run(request).await;
    policy.apply(origin.as_ref(), response.headers_mut());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> CorsPolicy {
        CorsPolicy::from_config(&CorsConfig::default())
    }

    #[test]
    fn test_allowed_origin_is_echoed() {
        let origin = HeaderValue::from_static("https://eurochennai.design");
        assert_eq!(policy().allow_origin(Some(&origin)), origin);
    }

    #[test]
    fn test_unlisted_or_missing_origin_is_null() {
        let origin = HeaderValue::from_static("https://evil.example");
        assert_eq!(policy().allow_origin(Some(&origin)), "null");
        assert_eq!(policy().allow_origin(None), "null");
    }

    #[test]
    fn test_origin_match_is_exact() {
        // Trailing slash or different scheme is a different origin.
        let policy = policy();
        let slash = HeaderValue::from_static("https://eurochennai.design/");
        let http = HeaderValue::from_static("http://eurochennai.design");
        assert_eq!(policy.allow_origin(Some(&slash)), "null");
        assert_eq!(policy.allow_origin(Some(&http)), "null");
    }

    #[test]
    fn test_apply_sets_full_header_set() {
        let mut headers = HeaderMap::new();
        policy().apply(None, &mut headers);

        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "null");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], "POST, OPTIONS");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
        assert_eq!(headers[ACCESS_CONTROL_MAX_AGE], "86400");
        assert_eq!(headers[VARY], "Origin");
    }

    #[test]
    fn test_invalid_configured_origin_is_skipped() {
        let config = CorsConfig {
            allowed_origins: vec!["https://ok.example".into(), "bad\norigin".into()],
            max_age_secs: 60,
        };
        let policy = CorsPolicy::from_config(&config);
        let ok = HeaderValue::from_static("https://ok.example");
        assert_eq!(policy.allow_origin(Some(&ok)), ok);
        assert_eq!(policy.allowed_origins.len(), 1);
    }
}
