//! MCP Protocol implementation
//!
//! This module contains all the types and handlers for the Model Context Protocol.

pub mod capabilities;
pub mod jsonrpc;
pub mod lifecycle;
pub mod messages;

pub use capabilities::*;
pub use jsonrpc::*;
pub use lifecycle::*;
pub use messages::*;
