//! Server lifecycle management
//!
//! Binds the HTTP listener, serves the callback router and drains
//! in-flight requests on SIGINT/SIGTERM.

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};

use streamauth_core::{Config, CredentialGateway};

/// `StreamAuth` server
pub struct StreamAuthServer {
    config: Config,
}

impl StreamAuthServer {
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Start the HTTP server and wait for a shutdown signal
    pub async fn start(self) -> anyhow::Result<()> {
        let gateway = Arc::new(CredentialGateway::new(&self.config.gateway));
        let router = streamauth_api::create_router(gateway);

        let http_address = self.config.http_address();
        let listener = tokio::net::TcpListener::bind(&http_address)
            .await
            .with_context(|| format!("Failed to bind HTTP address {http_address}"))?;

        let local_addr = listener.local_addr()?;
        info!("HTTP server listening on {}", local_addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")?;

        info!("StreamAuth server shut down complete");
        Ok(())
    }
}

/// Wait for a shutdown signal (SIGTERM or SIGINT/Ctrl+C)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("Received Ctrl+C, starting graceful shutdown..."); }
        () = terminate => { info!("Received SIGTERM, starting graceful shutdown..."); }
    }
}
