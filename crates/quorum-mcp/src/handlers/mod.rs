//! MCP request handlers
//!
//! This module contains handlers for all MCP protocol methods.

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::invariants::validate_request;
use crate::prompts;
use crate::protocol::*;
use crate::tools::{ToolContext, ToolRegistry};

/// MCP Server state
pub struct McpServerState {
    /// Protocol version negotiated
    pub protocol_version: Option<String>,

    pub initialized: bool,

    pub client_capabilities: Option<ClientCapabilities>,

    pub client_info: Option<ClientInfo>,

    /// Tools exposed by this server
    pub registry: ToolRegistry,

    pub tool_context: ToolContext,
}

impl McpServerState {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        Self {
            protocol_version: None,
            initialized: false,
            client_capabilities: None,
            client_info: None,
            registry: ToolRegistry::builtin(),
            tool_context: ToolContext::new(config),
        }
    }
}

impl Default for McpServerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle an incoming JSON-RPC request
pub async fn handle_request(
    state: &mut McpServerState,
    request: &JsonRpcRequest,
) -> JsonRpcResponse {
    debug!("Handling request: {} (id: {})", request.method, request.id);

    if let Err(error) = validate_request(request) {
        return JsonRpcResponse::error(request.id.clone(), error);
    }

    if !state.initialized && request.method != "initialize" && request.method != "ping" {
        return JsonRpcResponse::error(request.id.clone(), JsonRpcError::server_not_initialized());
    }

    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(state, request),
        "ping" => Ok(serde_json::json!({})),

        // Tools
        "tools/list" => handle_tools_list(state, request),
        "tools/call" => handle_tools_call(state, request),

        // Prompts
        "prompts/list" => handle_prompts_list(request),
        "prompts/get" => handle_prompts_get(request),

        _ => Err(JsonRpcError::method_not_found(&request.method)),
    };

    match result {
        Ok(value) => JsonRpcResponse::success(request.id.clone(), value),
        Err(error) => {
            debug!("Request {} failed: {}", request.id, error.message);
            JsonRpcResponse::error(request.id.clone(), error)
        }
    }
}

/// Handle an incoming notification
pub async fn handle_notification(state: &mut McpServerState, notification: &JsonRpcNotification) {
    debug!("Handling notification: {}", notification.method);

    match notification.method.as_str() {
        "notifications/initialized" => {
            info!("Client sent initialized notification");
            state.initialized = true;
        }
        "notifications/cancelled" => {
            // Requests complete synchronously, so there is nothing to abort
            let cancelled = notification
                .params
                .clone()
                .map(serde_json::from_value::<CancelledNotification>);
            match cancelled {
                Some(Ok(c)) => warn!(
                    "Request {} cancelled: {}",
                    c.request_id,
                    c.reason.as_deref().unwrap_or("no reason given")
                ),
                _ => warn!("Malformed cancellation notification"),
            }
        }
        _ => {
            debug!("Unknown notification: {}", notification.method);
        }
    }
}

/// Deserialize required request params
fn required_params<T: DeserializeOwned>(request: &JsonRpcRequest) -> Result<T, JsonRpcError> {
    request
        .params
        .as_ref()
        .ok_or_else(|| JsonRpcError::invalid_params("Missing params"))
        .and_then(|p| {
            serde_json::from_value(p.clone())
                .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))
        })
}

/// Deserialize optional request params, defaulting when absent
fn optional_params<T: DeserializeOwned + Default>(
    request: &JsonRpcRequest,
) -> Result<T, JsonRpcError> {
    Ok(request
        .params
        .as_ref()
        .map(|p| serde_json::from_value(p.clone()))
        .transpose()
        .map_err(|e| JsonRpcError::invalid_params(e.to_string()))?
        .unwrap_or_default())
}

fn to_result<T: serde::Serialize>(value: T) -> Result<serde_json::Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}

// ============================================================================
// Lifecycle Handlers
// ============================================================================

fn handle_initialize(
    state: &mut McpServerState,
    request: &JsonRpcRequest,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: InitializeParams = required_params(request)?;

    info!(
        "Initialize request from {} (version: {})",
        params.client_info.name, params.protocol_version
    );

    if params.protocol_version != MCP_PROTOCOL_VERSION {
        // Answer with our version and let the client decide
        warn!(
            "Protocol version mismatch: client={}, server={}",
            params.protocol_version, MCP_PROTOCOL_VERSION
        );
    }

    state.protocol_version = Some(params.protocol_version);
    state.client_capabilities = Some(params.capabilities);
    state.client_info = Some(params.client_info);

    to_result(InitializeResult::new(MCP_PROTOCOL_VERSION.to_string()))
}

// ============================================================================
// Tools Handlers
// ============================================================================

fn handle_tools_list(
    state: &McpServerState,
    request: &JsonRpcRequest,
) -> Result<serde_json::Value, JsonRpcError> {
    let _params: ToolsListParams = optional_params(request)?;

    to_result(ToolsListResult {
        tools: state.registry.definitions(),
        next_cursor: None,
    })
}

fn handle_tools_call(
    state: &McpServerState,
    request: &JsonRpcRequest,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: ToolsCallParams = required_params(request)?;

    debug!("Calling tool: {}", params.name);

    let result = state
        .registry
        .execute(&state.tool_context, &params.name, params.arguments);
    if result.is_error() {
        warn!(
            "Tool {} failed: {}",
            params.name,
            result.content.first().map(ToolContent::as_text).unwrap_or("")
        );
    }

    to_result(result)
}

// ============================================================================
// Prompts Handlers
// ============================================================================

fn handle_prompts_list(request: &JsonRpcRequest) -> Result<serde_json::Value, JsonRpcError> {
    let _params: PromptsListParams = optional_params(request)?;

    to_result(PromptsListResult {
        prompts: prompts::get_all_prompts(),
        next_cursor: None,
    })
}

fn handle_prompts_get(request: &JsonRpcRequest) -> Result<serde_json::Value, JsonRpcError> {
    let params: PromptsGetParams = required_params(request)?;

    debug!("Getting prompt: {}", params.name);

    let result = prompts::get_prompt(&params.name, params.arguments.as_ref())
        .map_err(JsonRpcError::invalid_params)?;

    to_result(result)
}
