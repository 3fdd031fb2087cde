//! Invariants and validation for the Quorum MCP server
//!
//! Protocol compliance checks and argument validation shared by the tool
//! handlers. Failures are reported as JSON-RPC errors or as tool error text.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::protocol::{JsonRpcError, JsonRpcRequest};

/// Validation result
pub type ValidationResult<T> = Result<T, JsonRpcError>;

// ============================================================================
// Protocol Invariants
// ============================================================================

/// Validate that a JSON-RPC request is well-formed
pub fn validate_request(request: &JsonRpcRequest) -> ValidationResult<()> {
    if request.jsonrpc != "2.0" {
        return Err(JsonRpcError::invalid_request());
    }

    if request.method.is_empty() {
        return Err(JsonRpcError::invalid_request());
    }

    // Reserved by JSON-RPC
    if request.method.starts_with("rpc.") {
        return Err(JsonRpcError::invalid_request());
    }

    Ok(())
}

// ============================================================================
// Tool Arguments
// ============================================================================

/// Deserialize tool arguments, treating a missing object as empty
pub fn parse_arguments<T: DeserializeOwned>(args: Value) -> Result<T, String> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| format!("Invalid arguments: {}", e))
}

/// Validate a 32-byte digest given as 64 lowercase hex characters (no prefix)
///
/// Roots are compared as lowercase hex, so an uppercase digest is rejected
/// here rather than failing every comparison later.
pub fn validate_digest_hex(field: &str, value: &str) -> Result<(), String> {
    if value.len() != 64 {
        return Err(format!(
            "{} must be 64 hex characters, got {}",
            field,
            value.len()
        ));
    }

    if let Some(c) = value.chars().find(|c| !matches!(c, '0'..='9' | 'a'..='f')) {
        return Err(if c.is_ascii_hexdigit() {
            format!("{} must be lowercase hex, found '{}'", field, c)
        } else {
            format!("{} is not valid hex: invalid character '{}'", field, c)
        });
    }

    Ok(())
}

/// Validate a voter list size against the configured ceiling
pub fn validate_voter_count(count: usize, max_voters: usize) -> Result<usize, String> {
    if count == 0 {
        return Err(quorum_core::Error::EmptyInput.to_string());
    }
    if count > max_voters {
        return Err(format!(
            "Too many voters: {} (server limit is {})",
            count, max_voters
        ));
    }
    Ok(count)
}
