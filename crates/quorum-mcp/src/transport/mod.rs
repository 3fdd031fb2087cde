//! MCP transport implementations
//!
//! Only the stdio transport is provided.

pub mod stdio;

pub use stdio::*;
