//! MCP lifecycle management
//!
//! Handles initialization and cancellation.

use serde::{Deserialize, Serialize};

use super::capabilities::{ClientCapabilities, ClientInfo, ServerCapabilities, ServerInfo};

/// Initialize request parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    /// Protocol version the client wants to use
    pub protocol_version: String,

    #[serde(default)]
    pub capabilities: ClientCapabilities,

    pub client_info: ClientInfo,
}

/// Initialize response result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    /// Protocol version the server is using
    pub protocol_version: String,

    pub capabilities: ServerCapabilities,

    pub server_info: ServerInfo,

    /// Optional instructions for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl InitializeResult {
    pub fn new(protocol_version: String) -> Self {
        Self {
            protocol_version,
            capabilities: ServerCapabilities::default(),
            server_info: ServerInfo::default(),
            instructions: Some(
                "Quorum builds Merkle voter trees for MerkleVoting governance contracts. \
                 Use quorum_create_merkle_root for the root_hash deployment parameter and \
                 quorum_build_merkle_tree to hand each voter the proof they submit with a vote."
                    .to_string(),
            ),
        }
    }
}

/// Cancellation notification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelledNotification {
    /// The ID of the request to cancel
    pub request_id: super::jsonrpc::RequestId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_params_deserialize() {
        let json = r#"{
            "protocolVersion": "2025-11-25",
            "capabilities": {},
            "clientInfo": {
                "name": "test-client",
                "version": "1.0.0"
            }
        }"#;

        let params: InitializeParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.protocol_version, "2025-11-25");
        assert_eq!(params.client_info.name, "test-client");
    }

    #[test]
    fn test_initialize_params_without_capabilities() {
        let json = r#"{"protocolVersion": "2025-06-18", "clientInfo": {"name": "cli"}}"#;
        let params: InitializeParams = serde_json::from_str(json).unwrap();
        assert!(params.capabilities.roots.is_none());
    }

    #[test]
    fn test_cancelled_notification() {
        let json = r#"{"requestId": 7, "reason": "user aborted"}"#;
        let cancelled: CancelledNotification = serde_json::from_str(json).unwrap();
        assert_eq!(cancelled.request_id, super::super::jsonrpc::RequestId::Number(7));
    }
}
