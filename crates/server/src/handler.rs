//! MCP ServerHandler implementation for ChatterboxService.
//!
//! - `get_info()` - advertises the tools capability
//! - `list_tools()` - lists the meeting tools with their JSON schemas
//! - `call_tool()` - dispatches through the tool registry
//!
//! Tool failures are always returned as results with `isError: true`, never
//! as protocol-level errors.

use crate::app::ChatterboxService;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, InitializeResult, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities,
};
use rmcp::ServerHandler;

impl ServerHandler for ChatterboxService {
    fn get_info(&self) -> InitializeResult {
        InitializeResult {
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            instructions: Some(
                "Chatterbox meeting bot: join Zoom, Google Meet or Teams calls, fetch \
                 recordings and transcripts, and build summary prompts."
                    .into(),
            ),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, rmcp::ErrorData>> + Send + '_
    {
        std::future::ready(Ok(ListToolsResult {
            tools: self.tools(),
            next_cursor: None,
        }))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, rmcp::ErrorData>> + Send + '_
    {
        async move {
            Ok(self
                .call(request.name.as_ref(), request.arguments.as_ref())
                .await)
        }
    }
}
