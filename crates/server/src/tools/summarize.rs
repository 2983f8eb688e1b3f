//! `summarizeMeeting`: no API call, only a prompt for the host's own model.

use super::{parse_args, SUMMARIZE_MEETING};
use crate::gateway::{ParamSpec, ToolDescriptor, ToolHandler, ToolOutcome};
use async_trait::async_trait;
use rmcp::model::JsonObject;
use serde::Deserialize;

const PROMPT_PREAMBLE: &str = "Given an online call transcript formatted as:
Speaker: Transcript

Identify main topics of the conversation, summarize them in the following format:
- Topic Title
Topic summary

Remove smalltalk and insignificant topics. Do not include any introductory wording.

Transcript:
";

pub(super) fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        SUMMARIZE_MEETING,
        "Summarize a meeting transcript",
        "Generate a concise summary of a meeting's contents from its transcript",
    )
    .param(
        "transcript",
        ParamSpec::string("The meeting transcript to summarize"),
    )
}

/// Renders the summarization instructions with the transcript appended verbatim.
pub fn summary_prompt(transcript: &str) -> String {
    format!("{PROMPT_PREAMBLE}{transcript}")
}

#[derive(Debug, Deserialize)]
struct SummarizeArgs {
    transcript: String,
}

pub struct SummarizeTool;

#[async_trait]
impl ToolHandler for SummarizeTool {
    async fn call(&self, args: &JsonObject) -> ToolOutcome {
        let SummarizeArgs { transcript } = parse_args(args)?;
        Ok(summary_prompt(&transcript))
    }
}
