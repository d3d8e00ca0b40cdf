use thiserror::Error;

/// Gateway-wide error model. Per-request variants never reach the MCP client;
/// they are logged and flattened into an empty failure envelope.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("NATURE_VISION_API_KEY environment variable is not set")]
    MissingApiKey,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("only one of image_url or image_data may be set")]
    ConflictingImageSources,

    #[error("upstream status {0}")]
    UpstreamStatus(reqwest::StatusCode),

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid upstream json: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("upstream returned a null body")]
    NullBody,

    #[error("failed to encode result: {0}")]
    Encode(#[source] serde_json::Error),
}

impl GatewayError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::MissingApiKey | GatewayError::Config(_) => "config",
            GatewayError::ConflictingImageSources => "validation",
            GatewayError::UpstreamStatus(_) => "status",
            GatewayError::Transport(_) => "transport",
            GatewayError::Decode(_) | GatewayError::NullBody => "decode",
            GatewayError::Encode(_) => "encode",
        }
    }
}
