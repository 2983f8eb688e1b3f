//! `getMeetingInfo`: recording link, timestamps and transcript for a session.

use super::{handle_api_error, parse_args, GET_MEETING_INFO};
use crate::client::{ChatterboxClient, SessionInfo, SessionReply, Utterance};
use crate::gateway::{ParamSpec, ToolDescriptor, ToolError, ToolHandler, ToolOutcome};
use async_trait::async_trait;
use rmcp::model::JsonObject;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Transcript text used when the API returned no transcript array.
pub const NO_TRANSCRIPT: &str = "No transcript data available";

pub(super) fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        GET_MEETING_INFO,
        "Get meeting recording and transcript",
        "Get information about a meeting: recording link, start and end time, and transcript",
    )
    .param(
        "sessionId",
        ParamSpec::string("The session ID to get information for"),
    )
}

/// Joins utterances as `speaker: text` lines in API order.
pub fn render_transcript(utterances: Option<&[Utterance]>) -> String {
    match utterances {
        Some(utterances) => utterances
            .iter()
            .map(|u| format!("{}: {}", u.speaker, u.text))
            .collect::<Vec<_>>()
            .join("\n"),
        None => NO_TRANSCRIPT.to_string(),
    }
}

/// Combined result returned to the host as JSON text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_link: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Value>,
    pub transcript: String,
}

impl From<SessionInfo> for MeetingInfo {
    fn from(info: SessionInfo) -> Self {
        Self {
            transcript: render_transcript(info.transcript.as_deref()),
            recording_link: info.recording_link,
            start_time: info.start_timestamp,
            end_time: info.end_timestamp,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionArgs {
    session_id: String,
}

pub struct MeetingInfoTool {
    client: Arc<ChatterboxClient>,
}

impl MeetingInfoTool {
    pub fn new(client: Arc<ChatterboxClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for MeetingInfoTool {
    async fn call(&self, args: &JsonObject) -> ToolOutcome {
        let SessionArgs { session_id } = parse_args(args)?;
        match self.client.session(&session_id).await {
            Ok(SessionReply::Info(info)) => serde_json::to_string(&MeetingInfo::from(info))
                .map_err(|e| ToolError::unexpected(e.to_string())),
            Ok(SessionReply::Reported { message }) => {
                tracing::warn!(
                    target: "chatterbox::tools",
                    session_id = %session_id,
                    message = %message,
                    "session lookup reported an error"
                );
                Err(ToolError::reported(message))
            }
            Err(err) => Err(handle_api_error(GET_MEETING_INFO, &err)),
        }
    }
}
