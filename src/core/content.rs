//! Tool result envelope.
//!
//! Callers only ever see `isError` plus a single text block, so the handler
//! produces a `ToolOutcome` and the diagnostic detail goes to the log.

use rmcp::model::{CallToolResult, Content};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// Pretty-printed JSON payload for the caller.
    Text(String),
    /// Opaque failure: empty text, `isError: true`.
    Failed,
}

impl ToolOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, ToolOutcome::Failed)
    }

    pub fn text(&self) -> &str {
        match self {
            ToolOutcome::Text(s) => s,
            ToolOutcome::Failed => "",
        }
    }
}

impl From<ToolOutcome> for CallToolResult {
    fn from(outcome: ToolOutcome) -> Self {
        match outcome {
            ToolOutcome::Text(text) => CallToolResult::success(vec![Content::text(text)]),
            ToolOutcome::Failed => CallToolResult::error(vec![Content::text("")]),
        }
    }
}
