//! Uniform response envelope shared by every tool.
//!
//! Handlers produce a [`ToolOutcome`]: `Ok(text)` on success or a
//! [`ToolError`] carrying a machine-usable [`ErrorCode`]. The outcome is only
//! flattened into the MCP wire shape (`content`, `isError`, `_meta`) at the
//! server boundary by [`into_call_tool_result`].

use rmcp::model::{CallToolResult, Content, Meta};
use serde_json::json;
use std::fmt;

/// Fallback text for failures that carry no usable message.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Result of a single tool invocation before it is put on the wire.
pub type ToolOutcome = Result<String, ToolError>;

/// Machine-usable classification attached to every failed envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// No tool is registered under the requested name.
    UnknownTool,
    /// Arguments did not satisfy the tool's schema.
    InvalidArgument,
    /// The API reported a failure, or the call itself failed.
    UnknownError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownTool => "UNKNOWN_TOOL",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed tool invocation.
///
/// `text` is what the host shows to a human; `message` is the raw error
/// message exposed as `errorMessage`. Both are always non-empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ToolError {
    pub code: ErrorCode,
    pub message: String,
    pub text: String,
}

impl ToolError {
    /// Builds an error whose display text equals its message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = non_empty_or_fallback(message.into());
        Self {
            code,
            text: message.clone(),
            message,
        }
    }

    pub fn unknown_tool(name: &str) -> Self {
        Self::new(ErrorCode::UnknownTool, format!("Unknown tool: {name}"))
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, message)
    }

    /// A logical failure the API reported in its response body.
    pub fn reported(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnknownError, message)
    }

    /// A transport or otherwise unexpected failure.
    ///
    /// The host sees `An unexpected error occurred: <message>`; an empty
    /// message degrades to the bare fallback phrase for both fields.
    pub fn unexpected(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            return Self::new(ErrorCode::UnknownError, UNEXPECTED_ERROR);
        }
        Self {
            code: ErrorCode::UnknownError,
            text: format!("{UNEXPECTED_ERROR}: {message}"),
            message,
        }
    }
}

fn non_empty_or_fallback(message: String) -> String {
    if message.trim().is_empty() {
        UNEXPECTED_ERROR.to_string()
    } else {
        message
    }
}

/// Flattens a tool outcome into the MCP result shape.
///
/// Success carries one text element and no `isError`. Failure carries the
/// human-readable text, `isError: true`, and `_meta.errorCode` /
/// `_meta.errorMessage`.
pub fn into_call_tool_result(outcome: ToolOutcome) -> CallToolResult {
    match outcome {
        Ok(text) => CallToolResult {
            content: vec![Content::text(text)],
            structured_content: None,
            is_error: None,
            meta: None,
        },
        Err(err) => {
            let mut meta = Meta::new();
            meta.insert("errorCode".into(), json!(err.code.as_str()));
            meta.insert("errorMessage".into(), json!(err.message));
            CallToolResult {
                content: vec![Content::text(err.text)],
                structured_content: None,
                is_error: Some(true),
                meta: Some(meta),
            }
        }
    }
}
