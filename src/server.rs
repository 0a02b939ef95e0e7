//! MCP server handler.
//!
//! Implements `rmcp::ServerHandler` on top of the [`Dispatcher`]; framing and
//! the handshake are left to rmcp's stdio transport.

use std::collections::BTreeMap;
use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, ErrorCode, Implementation, JsonObject,
    ListToolsResult, PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    Tool as McpTool,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::ErrorData as McpError;
use serde_json::Value;

use crate::client::OutlineClient;
use crate::config::Config;
use crate::dispatcher::{
    types::{ToolRequest, ToolResponse},
    Dispatcher,
};
use crate::error::Result;
use crate::tools::{schema::ToolSchema, registry::ToolRegistry};

/// Name advertised to MCP clients.
pub const SERVER_NAME: &str = "outline-mcp";

#[derive(Clone)]
pub struct OutlineServerHandler {
    dispatcher: Arc<Dispatcher>,
}

impl OutlineServerHandler {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Build the shared client, discover the tools and wire the dispatcher.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = OutlineClient::new(config)?;
        tracing::info!("Connecting to API URL: {}", config.api_url);

        let registry = ToolRegistry::discover()?;
        tracing::info!(
            "Loaded {} tools: {}",
            registry.len(),
            serde_json::to_string(&registry.names())?
        );

        Ok(Self::new(Dispatcher::new(Arc::new(registry), Arc::new(client))))
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// One `true` flag per registered tool, declared under `experimental.tools`.
    fn tool_flags(&self) -> JsonObject {
        self.dispatcher
            .tool_names()
            .into_iter()
            .map(|name| (name, Value::Bool(true)))
            .collect()
    }
}

fn to_mcp_tool(schema: ToolSchema) -> McpTool {
    McpTool::new(schema.name, schema.description, Arc::new(schema.input_schema))
}

fn to_call_result(response: ToolResponse) -> std::result::Result<CallToolResult, McpError> {
    match response {
        ToolResponse::Content { content } => Ok(CallToolResult::success(
            content.into_iter().map(|c| Content::text(c.text)).collect(),
        )),
        ToolResponse::Error { error } => {
            Err(McpError::new(ErrorCode(error.kind.code()), error.message, None))
        }
    }
}

impl rmcp::ServerHandler for OutlineServerHandler {
    fn get_info(&self) -> ServerInfo {
        let mut capabilities = ServerCapabilities::builder().enable_tools().build();
        capabilities.experimental =
            Some(BTreeMap::from([("tools".to_string(), self.tool_flags())]));

        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities,
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "Outline knowledge base tools: create_document, get_document, \
                 list_documents and create_comment."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        let tools = self
            .dispatcher
            .list_tools()
            .into_iter()
            .map(to_mcp_tool)
            .collect();
        Ok(ListToolsResult::with_all_items(tools))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let response = self
            .dispatcher
            .dispatch(ToolRequest::new(request.name.to_string(), request.arguments))
            .await;
        to_call_result(response)
    }
}
