//! Tool descriptors, argument validation, and dispatch.

use super::envelope::{ToolError, ToolOutcome};
use async_trait::async_trait;
use indexmap::IndexMap;
use rmcp::model::{JsonObject, Tool, ToolAnnotations};
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;

/// Schema for a single tool parameter. Every parameter the tools take is a
/// JSON string.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub required: bool,
    pub description: String,
    /// Closed set of accepted values; empty means unconstrained.
    pub allowed: Vec<String>,
}

impl ParamSpec {
    /// A required string parameter.
    pub fn string(description: impl Into<String>) -> Self {
        Self {
            required: true,
            description: description.into(),
            allowed: Vec::new(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = values.into_iter().map(Into::into).collect();
        self
    }

    fn to_schema(&self) -> Value {
        let mut schema = json!({
            "type": "string",
            "description": self.description,
        });
        if !self.allowed.is_empty() {
            schema["enum"] = json!(self.allowed);
        }
        schema
    }
}

/// Immutable description of one tool: its name and argument schema.
///
/// Parameters keep their declaration order so the advertised JSON schema
/// is stable.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub title: String,
    pub description: String,
    pub params: IndexMap<String, ParamSpec>,
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            description: description.into(),
            params: IndexMap::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, spec: ParamSpec) -> Self {
        self.params.insert(name.into(), spec);
        self
    }

    /// JSON schema advertised as the tool's `inputSchema`.
    pub fn input_schema(&self) -> JsonObject {
        let properties: JsonObject = self
            .params
            .iter()
            .map(|(name, spec)| (name.clone(), spec.to_schema()))
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|(_, spec)| spec.required)
            .map(|(name, _)| name.as_str())
            .collect();

        let mut schema = JsonObject::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        schema.insert("required".into(), json!(required));
        schema.insert("additionalProperties".into(), json!(false));
        schema
    }

    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.clone().into(),
            title: Some(self.title.clone()),
            description: Some(self.description.clone().into()),
            input_schema: Arc::new(self.input_schema()),
            output_schema: None,
            annotations: Some(ToolAnnotations::default()),
            icons: None,
            meta: None,
        }
    }

    /// Checks `args` against the schema: no undeclared fields, declared
    /// string types, required presence, and enum membership.
    pub fn validate(&self, args: &JsonObject) -> Result<(), ToolError> {
        if let Some(unknown) = args.keys().find(|key| !self.params.contains_key(*key)) {
            return Err(ToolError::invalid_argument(format!(
                "Unknown argument `{unknown}` for tool `{}`",
                self.name
            )));
        }

        for (name, spec) in &self.params {
            let Some(value) = args.get(name) else {
                if spec.required {
                    return Err(ToolError::invalid_argument(format!(
                        "Missing required argument `{name}`"
                    )));
                }
                continue;
            };

            let Some(text) = value.as_str() else {
                return Err(ToolError::invalid_argument(format!(
                    "Argument `{name}` must be a string"
                )));
            };

            if !spec.allowed.is_empty() {
                if !spec.allowed.iter().any(|a| a == text) {
                    return Err(ToolError::invalid_argument(format!(
                        "Invalid value {value} for `{name}`; expected one of: {}",
                        spec.allowed.join(", ")
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Executes a tool once its arguments have passed validation.
///
/// Implementations convert every failure into a [`ToolError`]; nothing is
/// allowed to escape as a protocol fault.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, args: &JsonObject) -> ToolOutcome;
}

/// Startup-time registry configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("tool already registered: {0}")]
    Duplicate(String),
}

struct RegisteredTool {
    descriptor: ToolDescriptor,
    handler: Arc<dyn ToolHandler>,
}

/// Fixed set of tools, routed by name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, RegisteredTool>,
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool; a name collision is a configuration error.
    pub fn register(
        &mut self,
        descriptor: ToolDescriptor,
        handler: Arc<dyn ToolHandler>,
    ) -> Result<(), RegistryError> {
        if self.tools.contains_key(&descriptor.name) {
            return Err(RegistryError::Duplicate(descriptor.name));
        }
        self.tools.insert(
            descriptor.name.clone(),
            RegisteredTool {
                descriptor,
                handler,
            },
        );
        Ok(())
    }

    /// MCP tool definitions in registration order.
    pub fn tools(&self) -> Vec<Tool> {
        self.tools.values().map(|t| t.descriptor.to_tool()).collect()
    }

    /// Route a call to its handler.
    ///
    /// Unknown tools and invalid arguments are answered here without
    /// touching the handler. Missing arguments count as an empty object.
    pub async fn dispatch(&self, name: &str, args: Option<&JsonObject>) -> ToolOutcome {
        let Some(tool) = self.tools.get(name) else {
            return Err(ToolError::unknown_tool(name));
        };

        let empty = JsonObject::new();
        let args = args.unwrap_or(&empty);
        tool.descriptor.validate(args)?;
        tool.handler.call(args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::ErrorCode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingHandler {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ToolHandler for CountingHandler {
        async fn call(&self, args: &JsonObject) -> ToolOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("called with {} args", args.len()))
        }
    }

    fn join_like() -> ToolDescriptor {
        ToolDescriptor::new("joinMeeting", "Join", "Join a meeting")
            .param(
                "platform",
                ParamSpec::string("Platform").one_of(["zoom", "googlemeet", "teams"]),
            )
            .param("meetingId", ParamSpec::string("Meeting id"))
            .param("meetingPassword", ParamSpec::string("Password").optional())
    }

    fn registry_with(handler: Arc<CountingHandler>) -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(join_like(), handler).unwrap();
        registry
    }

    fn args(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = registry_with(Arc::new(CountingHandler::default()));
        let err = registry
            .register(join_like(), Arc::new(CountingHandler::default()))
            .unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate(ref name) if name == "joinMeeting"));
        assert_eq!(registry.tools().len(), 1);
    }

    #[test]
    fn input_schema_lists_required_params_in_order() {
        let schema = join_like().input_schema();
        assert_eq!(schema["type"], json!("object"));
        assert_eq!(schema["required"], json!(["platform", "meetingId"]));
        assert_eq!(schema["additionalProperties"], json!(false));
        assert_eq!(
            schema["properties"]["platform"]["enum"],
            json!(["zoom", "googlemeet", "teams"])
        );
        assert!(schema["properties"]["meetingPassword"].get("enum").is_none());
        let keys: Vec<_> = schema["properties"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, ["platform", "meetingId", "meetingPassword"]);
    }

    #[tokio::test]
    async fn unknown_tool_is_reported_without_dispatch() {
        let handler = Arc::new(CountingHandler::default());
        let registry = registry_with(handler.clone());
        let err = registry.dispatch("leaveMeeting", None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownTool);
        assert_eq!(handler.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn enum_violation_never_reaches_handler() {
        let handler = Arc::new(CountingHandler::default());
        let registry = registry_with(handler.clone());
        let err = registry
            .dispatch(
                "joinMeeting",
                Some(&args(json!({"platform": "webex", "meetingId": "1"}))),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert!(err.message.contains("platform"), "{}", err.message);
        assert!(err.message.contains("webex"), "{}", err.message);
        assert_eq!(handler.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_required_argument_is_rejected() {
        let handler = Arc::new(CountingHandler::default());
        let registry = registry_with(handler.clone());
        let err = registry
            .dispatch("joinMeeting", Some(&args(json!({"platform": "zoom"}))))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert_eq!(err.message, "Missing required argument `meetingId`");

        let err = registry.dispatch("joinMeeting", None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert_eq!(handler.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn undeclared_and_mistyped_arguments_are_rejected() {
        let registry = registry_with(Arc::new(CountingHandler::default()));

        let err = registry
            .dispatch(
                "joinMeeting",
                Some(&args(
                    json!({"platform": "zoom", "meetingId": "1", "extra": true}),
                )),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert!(err.message.contains("extra"));

        let err = registry
            .dispatch(
                "joinMeeting",
                Some(&args(json!({"platform": "zoom", "meetingId": 42}))),
            )
            .await
            .unwrap_err();
        assert_eq!(err.message, "Argument `meetingId` must be a string");

        let err = registry
            .dispatch(
                "joinMeeting",
                Some(&args(
                    json!({"platform": "zoom", "meetingId": "1", "meetingPassword": null}),
                )),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }

    #[tokio::test]
    async fn valid_call_returns_handler_outcome_unchanged() {
        let handler = Arc::new(CountingHandler::default());
        let registry = registry_with(handler.clone());
        let text = registry
            .dispatch(
                "joinMeeting",
                Some(&args(json!({"platform": "teams", "meetingId": "1"}))),
            )
            .await
            .unwrap();
        assert_eq!(text, "called with 2 args");
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn tools_are_listed_in_registration_order() {
        let mut registry = ToolRegistry::new();
        for name in ["b", "a", "c"] {
            registry
                .register(
                    ToolDescriptor::new(name, name, name),
                    Arc::new(CountingHandler::default()),
                )
                .unwrap();
        }
        let names: Vec<_> = registry.tools().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }
}
