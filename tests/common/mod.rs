//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    Router,
};
use form_relay::RelayConfig;
use tokio::net::TcpListener;

/// One request the mock record store received.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct CapturedCall {
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

/// In-process stand-in for the record store API.
pub struct MockStore {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<CapturedCall>>>,
}

#[allow(dead_code)]
impl MockStore {
    pub fn calls(&self) -> Vec<CapturedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    delay: Duration,
    calls: Arc<Mutex<Vec<CapturedCall>>>,
}

async fn capture(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };
    state.calls.lock().unwrap().push(CapturedCall {
        path: uri.path().to_string(),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    });

    tokio::time::sleep(state.delay).await;

    let body = if state.status.is_success() {
        r#"{"id":"recMOCK","fields":{}}"#
    } else {
        r#"{"error":{"type":"INVALID_PERMISSIONS"}}"#
    };
    (state.status, body)
}

/// Start a record store that answers every request with `status`.
pub async fn start_record_store(status: u16) -> MockStore {
    start_slow_record_store(status, Duration::ZERO).await
}

/// Same as [`start_record_store`], but each answer is held back by `delay`.
#[allow(dead_code)]
pub async fn start_slow_record_store(status: u16, delay: Duration) -> MockStore {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let calls = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new().fallback(capture).with_state(MockState {
        status: StatusCode::from_u16(status).unwrap(),
        delay,
        calls: calls.clone(),
    });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockStore { addr, calls }
}

/// Relay configuration pointed at `store`.
pub fn relay_config(store_url: &str) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.api_base_url = store_url.into();
    config.upstream.base_id = "appTEST".into();
    config.upstream.table_name = "Contact Form".into();
    config.upstream.access_token = "patTEST".into();
    config.upstream.use_system_proxy = false;
    config
}
