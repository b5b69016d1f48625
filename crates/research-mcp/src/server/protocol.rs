//! JSON-RPC 2.0 message types and MCP method dispatch.
//!
//! Shared by the stdio and HTTP transports.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::ToolError;
use crate::prompts;
use crate::resources;
use crate::tools::{McpTool, ToolContext};

/// Protocol version assumed when the client does not send one.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// Name announced in `serverInfo`.
pub const SERVER_NAME: &str = "research";

/// JSON-RPC error codes.
pub mod codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const SERVER_ERROR: i32 = -32000;
}

/// JSON-RPC 2.0 request.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Value,
    #[serde(default)]
    pub id: Option<Value>,
}

impl JsonRpcRequest {
    /// Requests without an id are notifications and get no response.
    #[must_use]
    pub const fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 error.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    const VERSION: &'static str = "2.0";

    #[must_use]
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self { jsonrpc: Cow::Borrowed(Self::VERSION), result: Some(result), error: None, id }
    }

    #[must_use]
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: Cow::Borrowed(Self::VERSION),
            result: None,
            error: Some(JsonRpcError { code, message: message.into(), data: None }),
            id,
        }
    }

    fn from_tool_error(id: Option<Value>, error: &ToolError) -> Self {
        let code = if error.is_invalid_argument() { codes::INVALID_PARAMS } else { codes::SERVER_ERROR };
        Self::error(id, code, error.to_user_message())
    }
}

/// MCP tool info for tools/list response.
#[derive(Debug, Serialize)]
pub struct McpToolInfo {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Everything a transport needs to answer requests.
pub struct ServerState {
    /// Registered tools.
    pub tools: Vec<Box<dyn McpTool>>,

    /// Tool execution context.
    pub ctx: ToolContext,
}

impl ServerState {
    /// Create server state from tools and their context.
    #[must_use]
    pub fn new(tools: Vec<Box<dyn McpTool>>, ctx: ToolContext) -> Self {
        Self { tools, ctx }
    }

    /// Get tool by name.
    #[must_use]
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| t.as_ref())
    }

    /// Handle one request. Returns `None` for notifications.
    pub async fn handle_request(&self, req: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        tracing::debug!(method = %req.method, "Received request");

        if req.is_notification() {
            tracing::debug!(method = %req.method, "Notification acknowledged");
            return None;
        }

        let id = req.id.clone();
        let response = match req.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, initialize_result(&req.params)),
            "ping" | "initialized" | "notifications/initialized" => {
                JsonRpcResponse::success(id, json!({}))
            }
            "tools/list" => JsonRpcResponse::success(id, self.tools_list_result()),
            "tools/call" => self.handle_tools_call(id, &req.params).await,
            "resources/list" => {
                JsonRpcResponse::success(id, json!({ "resources": resources::list_resources() }))
            }
            "resources/templates/list" => JsonRpcResponse::success(
                id,
                json!({ "resourceTemplates": resources::list_templates() }),
            ),
            "resources/read" => self.handle_resources_read(id, &req.params).await,
            "prompts/list" => JsonRpcResponse::success(id, json!({ "prompts": prompts::list_prompts() })),
            "prompts/get" => handle_prompts_get(id, &req.params),
            _ => JsonRpcResponse::error(
                id,
                codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", req.method),
            ),
        };

        Some(response)
    }

    fn tools_list_result(&self) -> Value {
        let tool_list: Vec<McpToolInfo> = self
            .tools
            .iter()
            .map(|t| McpToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.input_schema(),
            })
            .collect();

        json!({ "tools": tool_list })
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: &Value) -> JsonRpcResponse {
        let Some(tool_name) = params.get("name").and_then(Value::as_str) else {
            return JsonRpcResponse::error(id, codes::INVALID_PARAMS, "Missing 'name' parameter");
        };

        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        let Some(tool) = self.get_tool(tool_name) else {
            return JsonRpcResponse::error(
                id,
                codes::INVALID_PARAMS,
                format!("Tool not found: {}", tool_name),
            );
        };

        tracing::info!(tool = %tool_name, "Executing tool");

        match tool.execute(&self.ctx, arguments).await {
            Ok(text) => JsonRpcResponse::success(
                id,
                json!({
                    "content": [{
                        "type": "text",
                        "text": text
                    }]
                }),
            ),
            Err(e) => {
                tracing::error!(tool = %tool_name, error = %e, "Tool execution failed");
                JsonRpcResponse::from_tool_error(id, &e)
            }
        }
    }

    async fn handle_resources_read(&self, id: Option<Value>, params: &Value) -> JsonRpcResponse {
        let Some(uri) = params.get("uri").and_then(Value::as_str) else {
            return JsonRpcResponse::error(id, codes::INVALID_PARAMS, "Missing 'uri' parameter");
        };

        tracing::info!(uri, "Reading resource");

        match resources::read_resource(&self.ctx.store, uri).await {
            Ok(Some(text)) => JsonRpcResponse::success(
                id,
                json!({
                    "contents": [{
                        "uri": uri,
                        "mimeType": "text/markdown",
                        "text": text
                    }]
                }),
            ),
            Ok(None) => JsonRpcResponse::error(
                id,
                codes::INVALID_PARAMS,
                format!("Unknown resource: {}", uri),
            ),
            Err(e) => {
                tracing::error!(uri, error = %e, "Resource read failed");
                JsonRpcResponse::from_tool_error(id, &e)
            }
        }
    }
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState").field("tools", &self.tools.len()).finish()
    }
}

fn initialize_result(params: &Value) -> Value {
    let protocol_version = params
        .get("protocolVersion")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);

    tracing::info!("MCP initialize: protocol version {}", protocol_version);

    json!({
        "protocolVersion": protocol_version,
        "capabilities": {
            "tools": { "listChanged": false },
            "resources": { "subscribe": false, "listChanged": false },
            "prompts": { "listChanged": false }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

fn handle_prompts_get(id: Option<Value>, params: &Value) -> JsonRpcResponse {
    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return JsonRpcResponse::error(id, codes::INVALID_PARAMS, "Missing 'name' parameter");
    };

    let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

    match prompts::get_prompt(name, arguments) {
        Ok(Some(result)) => JsonRpcResponse::success(id, result),
        Ok(None) => {
            JsonRpcResponse::error(id, codes::INVALID_PARAMS, format!("Prompt not found: {}", name))
        }
        Err(e) => JsonRpcResponse::from_tool_error(id, &e),
    }
}
