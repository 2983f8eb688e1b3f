//! Handler for the `list-tools` command.

use crate::tools::descriptors;
use anyhow::Result;
use rmcp::model::Tool;

/// Tool definitions exactly as advertised over MCP.
pub(crate) fn tool_listing() -> Vec<Tool> {
    descriptors().iter().map(|d| d.to_tool()).collect()
}

/// Handle the `list-tools` command.
pub(crate) fn handle_list_tools_command() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&tool_listing())?);
    Ok(())
}
