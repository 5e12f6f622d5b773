//! Contact form relay.
//!
//! # Architecture Overview
//!
//! ```text
//!   Browser form / fetch()                                   Record store API
//!   ──────────────────────┐                                 ┌───────────────
//!                         ▼                                 │
//!   ┌──────────────────────────────────────────────────┐    │
//!   │  request id → trace → timeout → body limit        │    │
//!   │        │                                          │    │
//!   │        ▼                                          │    │
//!   │  /submit ── cors ── submit handler ── relay client ┼────┘
//!   │  *       ── 404                                   │
//!   └──────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use form_relay::config::load_config;
use form_relay::lifecycle::{signals, Shutdown};
use form_relay::observability::{logging, metrics};
use form_relay::HttpServer;

#[derive(Parser)]
#[command(name = "form-relay")]
#[command(about = "Relays contact form submissions to a record store", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults plus AIRTABLE_* environment when omitted.
    #[arg(short, long, env = "FORM_RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);

    tracing::info!("form-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.api_base_url,
        table = %config.upstream.table_name,
        allowed_origins = ?config.cors.allowed_origins,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
