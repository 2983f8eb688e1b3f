//! Meeting tools exposed to MCP hosts.
//!
//! - `joinMeeting`: deploy a bot into a Zoom, Google Meet or Teams call
//! - `getMeetingInfo`: fetch recording link, timestamps and transcript
//! - `summarizeMeeting`: render a summarization prompt for the host's model

mod join_meeting;
mod meeting_info;
mod summarize;

pub use join_meeting::JoinMeetingTool;
pub use meeting_info::{render_transcript, MeetingInfo, MeetingInfoTool, NO_TRANSCRIPT};
pub use summarize::{summary_prompt, SummarizeTool};

use crate::client::{ApiError, ChatterboxClient};
use crate::gateway::{RegistryError, ToolDescriptor, ToolError, ToolHandler, ToolRegistry};
use rmcp::model::JsonObject;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

pub const JOIN_MEETING: &str = "joinMeeting";
pub const GET_MEETING_INFO: &str = "getMeetingInfo";
pub const SUMMARIZE_MEETING: &str = "summarizeMeeting";

/// One entry of the tool catalog: how to describe the tool and how to build
/// its handler around the shared API client.
struct CatalogEntry {
    descriptor: fn() -> ToolDescriptor,
    handler: fn(&Arc<ChatterboxClient>) -> Arc<dyn ToolHandler>,
}

/// Every tool, in the order it is advertised. Both the live registry and
/// `list-tools` are built from this list.
const CATALOG: [CatalogEntry; 3] = [
    CatalogEntry {
        descriptor: join_meeting::descriptor,
        handler: |client| Arc::new(JoinMeetingTool::new(client.clone())),
    },
    CatalogEntry {
        descriptor: meeting_info::descriptor,
        handler: |client| Arc::new(MeetingInfoTool::new(client.clone())),
    },
    CatalogEntry {
        descriptor: summarize::descriptor,
        handler: |_| Arc::new(SummarizeTool),
    },
];

/// Descriptors for every tool, in the order they are advertised.
pub fn descriptors() -> Vec<ToolDescriptor> {
    CATALOG.iter().map(|entry| (entry.descriptor)()).collect()
}

/// Builds the registry with all meeting tools sharing one API client.
pub fn build_registry(client: Arc<ChatterboxClient>) -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    for entry in &CATALOG {
        registry.register((entry.descriptor)(), (entry.handler)(&client))?;
    }
    Ok(registry)
}

/// Decodes validated arguments into a typed struct.
pub(crate) fn parse_args<T: DeserializeOwned>(args: &JsonObject) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(args.clone()))
        .map_err(|e| ToolError::invalid_argument(e.to_string()))
}

/// Unified handling for failed API calls: logs with the tool name and
/// converts the failure into an envelope error.
pub(crate) fn handle_api_error(context: &str, err: &ApiError) -> ToolError {
    tracing::error!(target: "chatterbox::tools", tool = context, error = %err, "Error in {context}");
    ToolError::unexpected(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;
    use crate::gateway::ErrorCode;

    fn registry() -> ToolRegistry {
        let config = GatewayConfig::new("http://127.0.0.1:9", "key").unwrap();
        build_registry(Arc::new(ChatterboxClient::new(&config).unwrap())).unwrap()
    }

    #[test]
    fn registry_exposes_three_tools_in_order() {
        let names: Vec<_> = registry().tools().into_iter().map(|t| t.name).collect();
        assert_eq!(names, [JOIN_MEETING, GET_MEETING_INFO, SUMMARIZE_MEETING]);
        let listed: Vec<_> = descriptors().into_iter().map(|d| d.name).collect();
        assert_eq!(listed, [JOIN_MEETING, GET_MEETING_INFO, SUMMARIZE_MEETING]);
    }

    #[test]
    fn listing_matches_live_registry() {
        let live = serde_json::to_value(registry().tools()).unwrap();
        let listed: Vec<_> = descriptors().iter().map(|d| d.to_tool()).collect();
        assert_eq!(live, serde_json::to_value(listed).unwrap());
    }

    #[test]
    fn every_tool_has_description_and_object_schema() {
        for tool in registry().tools() {
            assert!(tool.description.is_some(), "{} lacks description", tool.name);
            assert_eq!(
                tool.input_schema.get("type"),
                Some(&serde_json::json!("object"))
            );
        }
    }

    #[test]
    fn api_errors_become_unknown_error_envelopes() {
        let err = handle_api_error(JOIN_MEETING, &ApiError::MissingSessionId);
        assert_eq!(err.code, ErrorCode::UnknownError);
        assert_eq!(err.message, "response did not include a sessionId");
        assert_eq!(
            err.text,
            "An unexpected error occurred: response did not include a sessionId"
        );
    }
}
