use std::future::Future;
use std::sync::Arc;

use rmcp::handler::server::tool::{Parameters, ToolRouter};
use rmcp::model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo};
use rmcp::ErrorData as McpError;

use crate::core::content::ToolOutcome;
use crate::core::error::GatewayError;
use crate::domain::{IdentificationRequest, IdentificationResult, SpeciesIdentifier};
use crate::infra::runtime::mcp_transport::ServerHandler;
use crate::tools::species::args::IdentifySpeciesArgs;

pub const TOOL_NAME: &str = "identify_species";

/// MCP handler for `identify_species`. Holds whichever identifier it is given.
#[derive(Clone)]
pub struct SpeciesSvc {
    identifier: Arc<dyn SpeciesIdentifier>,
}

impl ServerHandler for SpeciesSvc {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nature-vision-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Call identify_species with either image_url or image_data (base64), \
                 optionally a category and top_k."
                    .into(),
            ),
            ..Default::default()
        }
    }
}

#[rmcp::tool_router]
impl SpeciesSvc {
    #[rmcp::tool(
        name = "identify_species",
        description = "Identify species from an image and return Latin names with confidence"
    )]
    async fn identify_species(
        &self,
        params: Parameters<IdentifySpeciesArgs>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            has_url = params.0.image_url.is_some(),
            has_data = params.0.image_data.is_some(),
            "identify_species invoked"
        );
        let args = params.0.validated()?;
        Ok(self.identify(args).await.into())
    }
}

pub type SpeciesRouter = ToolRouter<SpeciesSvc>;

impl SpeciesSvc {
    pub fn new(identifier: Arc<dyn SpeciesIdentifier>) -> Self {
        Self { identifier }
    }

    pub fn router() -> SpeciesRouter {
        // Wrapper to expose the macro-generated private tool_router
        Self::tool_router()
    }

    /// Run one identification. Every failure is logged and flattened into
    /// `ToolOutcome::Failed`.
    pub async fn identify(&self, args: IdentifySpeciesArgs) -> ToolOutcome {
        match self.try_identify(args).await.and_then(render) {
            Ok(text) => ToolOutcome::Text(text),
            Err(e) => {
                tracing::error!(error = %e, kind = e.kind(), "request failed");
                ToolOutcome::Failed
            }
        }
    }

    async fn try_identify(
        &self,
        args: IdentifySpeciesArgs,
    ) -> Result<IdentificationResult, GatewayError> {
        let request = IdentificationRequest::try_from(args)?;
        self.identifier.identify(&request).await
    }
}

fn render(result: IdentificationResult) -> Result<String, GatewayError> {
    serde_json::to_string_pretty(&result).map_err(GatewayError::Encode)
}

/// Factory required by rmcp Streamable HTTP & stdio transports:
/// must return a `(handler, ToolRouter<handler>)` pair.
pub fn make_factory(
    identifier: Arc<dyn SpeciesIdentifier>,
) -> impl Fn() -> (SpeciesSvc, SpeciesRouter) + Clone + Send + Sync + 'static {
    move || (SpeciesSvc::new(identifier.clone()), SpeciesSvc::router())
}
