use axum::{
    routing::{any_service, get},
    Router,
};
use std::sync::Arc;

use crate::domain::SpeciesIdentifier;
use crate::infra::runtime::mcp_transport::{streamable_http_service, LocalSessionManager};
use crate::tools::species::tool_router::make_factory;

/// `/healthz` + streamable MCP at `/mcp`.
pub fn build_app(identifier: Arc<dyn SpeciesIdentifier>) -> Router {
    let session_mgr = Arc::new(LocalSessionManager::default());
    let mcp_service = streamable_http_service(make_factory(identifier), session_mgr);

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route_service("/mcp", any_service(mcp_service))
}
