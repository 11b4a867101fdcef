//! `shame serve`

use anyhow::{anyhow, Result};
use tracing::info;

use crate::adapters::http::{Backend, ShameHttpServer};
use crate::domain::models::Config;

/// Serve the HTTP API until the process is stopped
///
/// # Errors
/// Fails when the address cannot be bound.
pub async fn execute(host: Option<String>, port: Option<u16>, config: &Config) -> Result<()> {
    let mut server_config = config.server.clone();
    if let Some(host) = host {
        server_config.host = host;
    }
    if let Some(port) = port {
        server_config.port = port;
    }

    let backend = Backend::from_config(config);
    let server = ShameHttpServer::new(backend, server_config);

    server
        .serve_with_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
            }
        })
        .await
        .map_err(|err| anyhow!(err))
}
