//! rmcp plumbing shared by both transports. Knows nothing about species.

use std::sync::Arc;
use std::time::Duration;

use rmcp::handler::server::router::Router;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::serve_server;
use rmcp::service::QuitReason;
use rmcp::transport::streamable_http_server::tower::{StreamableHttpServerConfig, StreamableHttpService};

pub use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
pub use rmcp::ServerHandler;

const SSE_KEEP_ALIVE: Duration = Duration::from_secs(15);

/// Bind a handler to its tool router.
pub fn compose<H>((handler, tools): (H, ToolRouter<H>)) -> Router<H>
where
    H: ServerHandler,
{
    Router::new(handler).with_tools(tools)
}

/// Serve one MCP session over stdin/stdout and report why it ended.
pub async fn serve_stdio<H>(
    factory: impl FnOnce() -> (H, ToolRouter<H>),
) -> anyhow::Result<QuitReason>
where
    H: ServerHandler,
{
    let running = serve_server(compose(factory()), (tokio::io::stdin(), tokio::io::stdout())).await?;
    tracing::info!("nature vision started");
    tracing::info!("waiting for client to request...");
    Ok(running.waiting().await?)
}

/// Sessions are kept per client so `initialize` and later calls share one handler.
pub fn session_config() -> StreamableHttpServerConfig {
    let mut cfg = StreamableHttpServerConfig::default();
    cfg.sse_keep_alive = Some(SSE_KEEP_ALIVE);
    cfg.stateful_mode = true;
    cfg
}

pub fn streamable_http_service<H>(
    factory: impl Fn() -> (H, ToolRouter<H>) + Send + Sync + Clone + 'static,
    sessions: Arc<LocalSessionManager>,
) -> StreamableHttpService<Router<H>, LocalSessionManager>
where
    H: ServerHandler,
{
    StreamableHttpService::new(move || Ok(compose(factory())), sessions, session_config())
}
