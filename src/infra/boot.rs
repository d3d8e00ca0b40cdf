use std::net::SocketAddr;
use std::sync::Arc;

use crate::clients::nature_vision::NatureVisionRemote;
use crate::domain::SpeciesIdentifier;
use crate::infra::config::{Config, Mode};
use crate::infra::runtime::mcp_transport::serve_stdio;
use crate::tools::species::tool_router::make_factory;

/// Resolve configuration, build the upstream client and serve the configured transport.
pub async fn run_server() -> anyhow::Result<()> {
    let cfg = Config::from_env()?;
    run_with(cfg).await
}

pub async fn run_with(cfg: Config) -> anyhow::Result<()> {
    tracing::info!(
        mode = %cfg.mode,
        port = cfg.port,
        endpoint = %cfg.endpoint,
        "BOOT nature-vision-mcp"
    );

    let identifier: Arc<dyn SpeciesIdentifier> = Arc::new(NatureVisionRemote::from_config(&cfg)?);

    match cfg.mode {
        Mode::Stdio => {
            let reason = serve_stdio(make_factory(identifier)).await?;
            tracing::info!(?reason, "stdio session closed");
        }
        Mode::Server => {
            let app = crate::infra::http_app::build_app(identifier);
            let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
            let listener = tokio::net::TcpListener::bind(addr).await?;
            tracing::info!(%addr, "nature vision started");
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
