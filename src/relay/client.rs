//! Record store HTTP client.
//!
//! # Responsibilities
//! - Build the create-record endpoint from the upstream configuration
//! - Send one authenticated POST per submission
//! - Classify transport errors and non-success statuses as failures
//!
//! No request timeout is set on the client; the submit handler bounds each
//! call by `timeouts.request_secs`.

use std::time::Instant;

use url::Url;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::relay::record::{CreateRecordRequest, RecordPayload};
use crate::relay::types::{RelayError, RelayResult};

/// Longest upstream error body kept in a [`RelayError::Upstream`].
const MAX_ERROR_BODY: usize = 512;

/// Client for the tabular-data API that stores form submissions.
#[derive(Clone)]
pub struct RecordStoreClient {
    http: reqwest::Client,
    endpoint: Url,
    access_token: String,
}

impl RecordStoreClient {
    /// Create a client for the table named in `config`.
    pub fn new(config: &UpstreamConfig) -> RelayResult<Self> {
        let endpoint = record_endpoint(config)?;

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("form-relay/", env!("CARGO_PKG_VERSION")));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|e| RelayError::Client(e.to_string()))?;

        tracing::info!(
            endpoint = %endpoint,
            "Record store client initialized"
        );

        Ok(Self {
            http,
            endpoint,
            access_token: config.access_token.clone(),
        })
    }

    /// Create one record. Any non-2xx answer is an error.
    pub async fn create_record(&self, payload: &RecordPayload) -> RelayResult<()> {
        let started = Instant::now();
        let result = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.access_token)
            .json(&CreateRecordRequest { fields: payload })
            .send()
            .await;
        metrics::record_upstream_duration(started);

        let response = result?;
        let status = response.status();
        if status.is_success() {
            tracing::debug!(status = %status, "Record created");
            return Ok(());
        }

        let mut body = response.text().await.unwrap_or_default();
        if body.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }

        Err(RelayError::Upstream {
            status: status.as_u16(),
            body,
        })
    }
}

/// `<api_base_url>/v0/<base_id>/<table_name>` with each segment percent-encoded.
pub fn record_endpoint(config: &UpstreamConfig) -> RelayResult<Url> {
    let mut url = Url::parse(&config.api_base_url)
        .map_err(|e| RelayError::InvalidUrl(format!("{}: {}", config.api_base_url, e)))?;

    url.path_segments_mut()
        .map_err(|_| RelayError::InvalidUrl(format!("{}: cannot be a base", config.api_base_url)))?
        .pop_if_empty()
        .push("v0")
        .push(&config.base_id)
        .push(&config.table_name);

    Ok(url)
}
