//! Tool gateway: schema declaration, validation, dispatch, and the uniform
//! response envelope.
//!
//! Every tool call flows through [`ToolRegistry::dispatch`]:
//!
//! 1. unknown tool names are answered with `UNKNOWN_TOOL`
//! 2. arguments are checked against the tool's [`ToolDescriptor`] and
//!    rejected with `INVALID_ARGUMENT` before the handler runs
//! 3. the handler's [`ToolOutcome`] is returned unchanged
//!
//! The outcome is flattened into an MCP `CallToolResult` with
//! [`into_call_tool_result`] at the server boundary.

mod envelope;
mod registry;

pub use envelope::{into_call_tool_result, ErrorCode, ToolError, ToolOutcome, UNEXPECTED_ERROR};
pub use registry::{
    ParamSpec, RegistryError, ToolDescriptor, ToolHandler, ToolRegistry,
};
