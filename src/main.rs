//! CyberHub transaction relay.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser                  ┌───────────────────────────────────────────┐
//!     ───────────────────────▶ │ http::server (CORS, request ID, tracing)  │
//!                              │     │                                     │
//!                              │     ▼                                     │
//!                              │ http::handlers ──▶ relay::payload         │
//!                              │     │              (shipping-fee patch)   │
//!                              │     ▼                                     │
//!     ◀─────────────────────── │ relay::client ─────────────────────────── ┼──▶ Payment API
//!     status + body verbatim   └───────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use cyberhub_relay::config::resolve_config;
use cyberhub_relay::lifecycle::signals::spawn_signal_listener;
use cyberhub_relay::observability::logging;
use cyberhub_relay::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "cyberhub-relay")]
#[command(about = "Relays browser transaction requests to the CyberHub payment API", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// KEY=VALUE file consulted for credentials missing from the environment.
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref(), &cli.env_file)?;

    logging::init(&config.observability);

    tracing::info!("cyberhub-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        upstream = %config.upstream.url,
        upstream_timeout_secs = config.upstream.timeout_secs,
        max_body_size = config.security.max_body_size,
        "Configuration loaded"
    );
    if !config.credentials.is_complete() {
        tracing::warn!("Upstream credentials are incomplete; requests will likely be rejected");
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    spawn_signal_listener(shutdown);

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
