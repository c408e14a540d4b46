//! Dispatch router: advertises the tool set and routes invocations.
//!
//! Every failure mode (missing arguments, unknown tool, schema violation,
//! upstream error, anything unexpected) is folded into an error-flagged
//! `CallToolResult`. Nothing throws past this boundary; only a transport
//! fault is fatal to the process.

use crate::{format, schema, tools};
use glean_api::{GleanApi, GleanError};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ErrorData as McpError, ServerHandler};
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct GleanServer {
    api: Arc<dyn GleanApi>,
}

impl GleanServer {
    pub fn new(api: Arc<dyn GleanApi>) -> Self {
        Self { api }
    }

    /// Route one invocation to completion.
    ///
    /// All outcomes come back as a normally-structured result distinguished
    /// by the `is_error` flag.
    pub async fn dispatch(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let Some(arguments) = arguments else {
            return error_text("Arguments are required");
        };
        let Some(tool) = tools::descriptors()
            .into_iter()
            .find(|tool| tool.name == name)
        else {
            return error_text(format!("Unknown tool: {name}"));
        };

        let args = Value::Object(arguments);
        let input_schema = Value::Object(tool.input_schema.as_ref().clone());
        let violations = schema::validate(&input_schema, &args);
        if !violations.is_empty() {
            let mut message = format!("Invalid arguments for {name}:");
            for violation in &violations {
                message.push('\n');
                message.push_str(&violation.to_string());
            }
            return error_text(message);
        }

        let outcome = match name {
            tools::SEARCH_TOOL => tools::search(self.api.as_ref(), &args)
                .await
                .map(|raw| format::format_search_results(&raw)),
            tools::CHAT_TOOL => tools::chat(self.api.as_ref(), &args)
                .await
                .map(|raw| format::format_chat_response(&raw)),
            // A descriptor without a dispatch arm would land here; the
            // lockstep test keeps this unreachable.
            _ => return error_text(format!("Unknown tool: {name}")),
        };

        match outcome {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(err) => match err.downcast_ref::<GleanError>() {
                Some(upstream) => {
                    log::warn!("{name} upstream failure: {upstream}");
                    error_text(upstream.user_message())
                }
                None => {
                    log::warn!("{name} failed: {err:#}");
                    error_text(format!("Error: {err:#}"))
                }
            },
        }
    }
}

fn error_text(message: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message.into())])
}

impl ServerHandler for GleanServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Glean tools for AI agents. Use 'glean_search' to find company \
                 content across connected datasources and 'glean_chat' to ask \
                 Glean's assistant a question grounded in company knowledge."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: tools::descriptors(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.dispatch(request.name.as_ref(), request.arguments).await)
    }
}
