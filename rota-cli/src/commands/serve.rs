//! Serve command - run the HTTP API

use std::sync::Arc;

use clap::Args;
use rota_core::{Config, MemoryStore, ReviewService};
use tokio::net::TcpListener;

/// Run the HTTP API until interrupted
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on (overrides config and env)
    #[arg(short, long)]
    bind: Option<String>,

    /// Keep all data in memory instead of the database
    #[arg(long)]
    memory: bool,
}

impl ServeArgs {
    pub async fn execute(self, config: Config) -> anyhow::Result<()> {
        let config = config.with_cli_overrides(None, self.bind);

        let service = if self.memory {
            tracing::warn!("Using in-memory store; data is lost on shutdown");
            ReviewService::new(Arc::new(MemoryStore::new()))
        } else {
            super::open_service(&config).await?
        };

        let listener = TcpListener::bind(&config.server.bind)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", config.server.bind, e))?;

        rota_http::serve(listener, service, shutdown_signal()).await?;
        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
