//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the submit route and 404 fallback
//! - Wire up middleware (tracing, timeout, body limit, request ID, CORS)
//! - Bind server to listener
//! - Stop accepting on shutdown signal

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::any,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::cors::{cors_headers, CorsPolicy};
use crate::http::request::{MakeRequestUuidV4, X_REQUEST_ID};
use crate::http::submit::{not_found, submit};
use crate::relay::{RecordStoreClient, RelayError};

/// Errors building the server from configuration.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Relay(#[from] RelayError),

    #[error("Invalid thank-you URL: {0}")]
    Redirect(String),
}

/// Extra time the server-wide timeout allows past the relay deadline, so a
/// slow record store is answered by the handler (301 or 500 JSON with CORS
/// headers) rather than by a bare 408.
const BACKSTOP_GRACE_SECS: u64 = 5;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: RecordStoreClient,
    pub thank_you_url: HeaderValue,
    /// Deadline for one relay call; elapsing is an ordinary relay failure.
    pub relay_timeout: Duration,
}

/// HTTP server for the form relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, ServerError> {
        let store = RecordStoreClient::new(&config.upstream)?;
        let thank_you_url = HeaderValue::from_str(&config.redirect.thank_you_url)
            .map_err(|_| ServerError::Redirect(config.redirect.thank_you_url.clone()))?;
        let cors = Arc::new(CorsPolicy::from_config(&config.cors));

        let state = AppState {
            store,
            thank_you_url,
            relay_timeout: Duration::from_secs(config.timeouts.request_secs),
        };

        let router = Self::build_router(&config, state, cors);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RelayConfig, state: AppState, cors: Arc<CorsPolicy>) -> Router {
        Router::new()
            .route("/submit", any(submit))
            .route_layer(middleware::from_fn_with_state(cors, cors_headers))
            .fallback(not_found)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs + BACKSTOP_GRACE_SECS,
                    )))
                    .layer(DefaultBodyLimit::max(config.security.max_body_size)),
            )
    }

    /// The fully layered router, for in-process use (tests, embedding).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
