//! CLI command handlers for the chatterbox application.

mod list_tools;
mod serve;

pub(crate) use list_tools::handle_list_tools_command;
pub(crate) use serve::handle_serve_command;
