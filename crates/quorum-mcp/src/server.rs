//! MCP Server implementation
//!
//! Reads one JSON-RPC message per line, dispatches it and writes the
//! response on a single line.

use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::handlers::{handle_notification, handle_request, McpServerState};
use crate::protocol::{
    JsonRpcError, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, MessageKind, RequestId,
};
use crate::transport::{AsyncStdioTransport, LineTransport};

/// MCP Server
pub struct McpServer {
    state: Arc<RwLock<McpServerState>>,
}

impl McpServer {
    /// Create a server with the default configuration
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(McpServerState::with_config(config))),
        }
    }

    /// Run the server on stdin/stdout until EOF
    pub async fn run_stdio(&self) -> std::io::Result<()> {
        info!("Starting Quorum MCP server (stdio transport)");
        self.serve(AsyncStdioTransport::stdio()).await
    }

    /// Run the server over any line-oriented stream pair until EOF
    pub async fn run<R, W>(&self, reader: R, writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        self.serve(LineTransport::new(reader, writer)).await
    }

    async fn serve<R, W>(&self, mut transport: LineTransport<R, W>) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        while let Some(message) = transport.read_message().await? {
            if let Some(response) = self.handle_message(&message).await {
                transport.write_response(&response).await?;
            }
        }

        info!("EOF received, Quorum MCP server stopped");
        Ok(())
    }

    /// Handle one raw message, returning the response to send if any
    pub async fn handle_message(&self, message: &str) -> Option<JsonRpcResponse> {
        let json: serde_json::Value = match serde_json::from_str(message) {
            Ok(v) => v,
            Err(e) => {
                warn!("Failed to parse JSON: {}", e);
                return Some(JsonRpcResponse::error(
                    RequestId::Null,
                    JsonRpcError::parse_error(),
                ));
            }
        };

        match MessageKind::classify(&json) {
            MessageKind::Request => {
                let id = json
                    .get("id")
                    .cloned()
                    .and_then(|id| serde_json::from_value(id).ok())
                    .unwrap_or(RequestId::Null);

                let request: JsonRpcRequest = match serde_json::from_value(json) {
                    Ok(r) => r,
                    Err(e) => {
                        warn!("Failed to parse request: {}", e);
                        return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()));
                    }
                };

                let mut state = self.state.write().await;
                Some(handle_request(&mut state, &request).await)
            }
            MessageKind::Notification => {
                match serde_json::from_value::<JsonRpcNotification>(json) {
                    Ok(notification) => {
                        let mut state = self.state.write().await;
                        handle_notification(&mut state, &notification).await;
                    }
                    Err(e) => warn!("Failed to parse notification: {}", e),
                }
                None
            }
            MessageKind::Response => {
                // The server never issues requests of its own
                debug!("Ignoring response from client");
                None
            }
            MessageKind::Unknown => {
                error!("Unknown message type: {}", message);
                Some(JsonRpcResponse::error(
                    RequestId::Null,
                    JsonRpcError::invalid_request(),
                ))
            }
        }
    }

    /// Whether the client has completed initialization
    pub async fn is_initialized(&self) -> bool {
        self.state.read().await.initialized
    }
}

impl Default for McpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_creation() {
        let server = McpServer::new();
        assert!(!server.is_initialized().await);
    }

    #[tokio::test]
    async fn test_parse_error() {
        let server = McpServer::new();
        let response = server.handle_message("{not json").await.unwrap();
        assert_eq!(response.id, RequestId::Null);
        assert_eq!(response.error.unwrap().code, -32700);
    }

    #[tokio::test]
    async fn test_initialized_notification_has_no_response() {
        let server = McpServer::new();
        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
        assert!(server.is_initialized().await);
    }

    #[tokio::test]
    async fn test_malformed_request_keeps_id() {
        let server = McpServer::new();
        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","id":9,"method":42}"#)
            .await
            .unwrap();
        assert_eq!(response.id, RequestId::Number(9));
        assert_eq!(response.error.unwrap().code, -32600);
    }

    #[tokio::test]
    async fn test_client_response_ignored() {
        let server = McpServer::new();
        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","id":1,"result":{}}"#)
            .await;
        assert!(response.is_none());
    }
}
