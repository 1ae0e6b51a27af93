//! Shared utilities for integration tests.

use std::net::SocketAddr;

use cyberhub_relay::config::RelayConfig;
use cyberhub_relay::{HttpServer, Shutdown};
use tokio::net::TcpListener;

/// Relay configuration pointing at `upstream_url` with test credentials.
pub fn test_config(upstream_url: String) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;
    config.upstream.url = upstream_url;
    config.upstream.timeout_secs = 5;
    config.credentials.public_key = "pk".into();
    config.credentials.private_key = "sk".into();
    config
}

/// Start the relay on an ephemeral port.
///
/// Keep the returned `Shutdown` alive for the duration of the test.
pub async fn spawn_relay(config: RelayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind(config.listener.bind_address()).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// An address nothing is listening on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Client that bypasses any system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
