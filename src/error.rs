//! Errors raised before a tool call reaches the shortcut engine.

use thiserror::Error;

/// JSON-RPC code used for both variants: the call's parameters are at fault.
pub(crate) const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Error)]
pub(crate) enum ToolCallError {
    /// No registered operation has this name.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// An argument is missing or has the wrong type.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}
