//! Quorum MCP Server
//!
//! This crate implements a Model Context Protocol (MCP) server that lets an
//! AI agent prepare MerkleVoting governance deployments: build voter trees,
//! hand out per-voter proofs, verify proofs, and assemble governance configs.
//!
//! # Features
//!
//! - **Tools**: Merkle root/tree/proof operations, address validation,
//!   deployment salts, governance config builders
//! - **Prompts**: Guided workflows for setting up a vote and casting a vote
//!
//! Tools are held in an explicit [`ToolRegistry`] populated at startup, so
//! the set of exposed tools is visible in one place.
//!
//! # Example Usage
//!
//! ```no_run
//! use quorum_mcp::McpServer;
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = McpServer::new();
//!     server.run_stdio().await.expect("Server failed");
//! }
//! ```
//!
//! # Protocol Version
//!
//! This implementation targets MCP version 2025-11-25.

pub mod config;
pub mod handlers;
pub mod invariants;
pub mod prompts;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;

pub use config::ServerConfig;
pub use protocol::{
    ClientCapabilities, ClientInfo, InitializeParams, InitializeResult, JsonRpcError,
    JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, MCP_PROTOCOL_VERSION,
    ServerCapabilities, ServerInfo, Tool, ToolContent, ToolsCallResult,
};
pub use server::McpServer;
pub use tools::{ToolContext, ToolRegistry};
