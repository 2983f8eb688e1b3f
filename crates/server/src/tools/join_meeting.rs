//! `joinMeeting`: sends a bot into a live call.

use super::{handle_api_error, parse_args, JOIN_MEETING};
use crate::client::{ChatterboxClient, JoinRequest, Platform};
use crate::gateway::{ParamSpec, ToolDescriptor, ToolHandler, ToolOutcome};
use async_trait::async_trait;
use rmcp::model::JsonObject;
use serde::Deserialize;
use std::sync::Arc;

pub(super) fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        JOIN_MEETING,
        "Join a meeting with a recording bot",
        "Join a Zoom, Google Meet or Microsoft Teams meeting using the provided meeting ID and \
         password and capture transcript and audio recording",
    )
    .param(
        "platform",
        ParamSpec::string("The online conference platform (zoom, googlemeet or teams)")
            .one_of(Platform::ALL.iter().map(Platform::as_str)),
    )
    .param(
        "meetingId",
        ParamSpec::string(
            "The ID of the Zoom ('###########'), Google Meet ('xxx-xxxx-xxx') or Teams meeting",
        ),
    )
    .param(
        "meetingPassword",
        ParamSpec::string("The password for the meeting (optional)").optional(),
    )
    .param("botName", ParamSpec::string("The name of the bot"))
    .param(
        "webhookUrl",
        ParamSpec::string("URL to receive webhook events for meeting status (optional)")
            .optional(),
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JoinArgs {
    platform: Platform,
    meeting_id: String,
    meeting_password: Option<String>,
    bot_name: String,
    webhook_url: Option<String>,
}

impl From<JoinArgs> for JoinRequest {
    fn from(args: JoinArgs) -> Self {
        Self {
            platform: args.platform,
            meeting_id: args.meeting_id,
            meeting_password: args.meeting_password.unwrap_or_default(),
            bot_name: args.bot_name,
            webhook_url: args.webhook_url.unwrap_or_default(),
        }
    }
}

pub struct JoinMeetingTool {
    client: Arc<ChatterboxClient>,
}

impl JoinMeetingTool {
    pub fn new(client: Arc<ChatterboxClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for JoinMeetingTool {
    async fn call(&self, args: &JsonObject) -> ToolOutcome {
        let request: JoinRequest = parse_args::<JoinArgs>(args)?.into();
        match self.client.join(&request).await {
            Ok(session_id) => {
                tracing::info!(
                    target: "chatterbox::tools",
                    platform = request.platform.as_str(),
                    session_id = %session_id,
                    "meeting joined"
                );
                Ok(format!(
                    "Meeting joined successfully. Session ID: {session_id}"
                ))
            }
            Err(err) => Err(handle_api_error(JOIN_MEETING, &err)),
        }
    }
}
