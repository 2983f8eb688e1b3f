//! HTTP client for the Chatterbox meeting-bot API.
//!
//! Two endpoints are used:
//!
//! - `POST {endpoint}/join` deploys a bot into a live meeting and answers
//!   with `{"sessionId": ...}`
//! - `GET {endpoint}/session/{sessionId}` returns the recording link,
//!   timestamps and transcript, or `{"message": ...}` when the API reports
//!   a logical failure (often with a 2xx status)
//!
//! Every request carries `Content-Type: application/json` and
//! `Authorization: Bearer <api key>`. No retries are attempted.

use crate::config::GatewayConfig;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Failures of a single API call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Status { status: StatusCode, message: String },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response did not include a sessionId")]
    MissingSessionId,
    #[error("cannot build request url from {0}")]
    InvalidUrl(Url),
}

/// Meeting platforms the bot can join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Zoom,
    GoogleMeet,
    Teams,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Zoom, Platform::GoogleMeet, Platform::Teams];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Zoom => "zoom",
            Self::GoogleMeet => "googlemeet",
            Self::Teams => "teams",
        }
    }
}

/// Body of `POST /join`. Optional values are sent as empty strings because
/// the API expects every key to be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub platform: Platform,
    pub meeting_id: String,
    pub meeting_password: String,
    pub bot_name: String,
    pub webhook_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JoinBody {
    session_id: Option<String>,
}

/// One spoken turn of a transcript. A missing or `null` speaker or text
/// decodes as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Utterance {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub speaker: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
}

/// Session details. Link and timestamps are passed through verbatim since
/// the API does not pin down their JSON types: an absent key is `None`, an
/// explicit `null` is `Some(Value::Null)`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    #[serde(default, deserialize_with = "present")]
    pub recording_link: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub start_timestamp: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub end_timestamp: Option<Value>,
    pub transcript: Option<Vec<Utterance>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Non-empty string `message` of a session body, if any.
fn reported_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}

/// Decoded `GET /session/{id}` reply.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionReply {
    Info(SessionInfo),
    /// The API reported a logical failure such as an unknown session.
    Reported { message: String },
}

/// Thin wrapper over a shared `reqwest::Client` bound to one API endpoint.
#[derive(Debug, Clone)]
pub struct ChatterboxClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl ChatterboxClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Appends path segments to the endpoint, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.endpoint.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&self.api_key)
    }

    /// Deploys a bot into a meeting and returns the new session id.
    ///
    /// Not idempotent: each successful call starts a separate session.
    pub async fn join(&self, request: &JoinRequest) -> Result<String, ApiError> {
        let url = self.url(&["join"])?;
        tracing::debug!(
            target: "chatterbox::client",
            %url,
            platform = request.platform.as_str(),
            "joining meeting"
        );

        let response = self.request(Method::POST, url).json(request).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status, &text));
        }

        let body: JoinBody = serde_json::from_str(&text)?;
        body.session_id
            .filter(|id| !id.is_empty())
            .ok_or(ApiError::MissingSessionId)
    }

    /// Fetches recording and transcript details for a session.
    ///
    /// A body carrying a non-empty `message` is a reported failure whatever
    /// the HTTP status.
    pub async fn session(&self, session_id: &str) -> Result<SessionReply, ApiError> {
        let url = self.url(&["session", session_id])?;
        tracing::debug!(target: "chatterbox::client", %url, "fetching session");

        let response = self.request(Method::GET, url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        // The message is looked up on the raw body so that badly typed
        // sibling fields cannot hide it.
        let body = match serde_json::from_str::<Value>(&text) {
            Ok(body) => body,
            Err(_) if !status.is_success() => return Err(status_error(status, &text)),
            Err(err) => return Err(err.into()),
        };
        if let Some(message) = reported_message(&body) {
            return Ok(SessionReply::Reported { message });
        }
        if !status.is_success() {
            return Err(status_error(status, &text));
        }
        Ok(SessionReply::Info(SessionInfo::deserialize(body)?))
    }
}

/// Builds an error for a non-2xx response, preferring the API's own
/// `message` field.
fn status_error(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| reported_message(&v))
        .unwrap_or_else(|| format!("request failed with status {status}"));
    ApiError::Status { status, message }
}
