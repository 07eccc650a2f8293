//! rolegate serve command

use std::net::SocketAddr;

use anyhow::Context;
use clap::Args;
use shared::AppConfig;

use crate::app::{build_router, build_state};

#[derive(Debug, Default, Args)]
pub struct ServeCommand {
    /// Listen address (overrides ROLEGATE_BIND)
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,
}

impl ServeCommand {
    pub async fn run(&self) -> anyhow::Result<()> {
        let config = AppConfig::from_env_or_yaml().context("failed to load configuration")?;
        let addr = self.bind.unwrap_or(config.server.bind_addr);

        let state = build_state(&config)?;
        let app = build_router(state);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;
        tracing::info!(%addr, "rolegate listening");

        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("shutdown signal received");
            })
            .await?;
        Ok(())
    }
}
