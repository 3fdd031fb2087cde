//! Address validation tool

use serde::Deserialize;

use quorum_core::address::address_kind;

use crate::invariants::parse_arguments;
use crate::protocol::{Tool, ToolAnnotations, ToolContent, ToolsCallResult};

use super::ToolContext;

/// Get the tool definition
pub fn tool_definition() -> Tool {
    Tool {
        name: "quorum_validate_address".to_string(),
        title: Some("Validate Stellar Address".to_string()),
        description: "Check whether a string is a Stellar account (G...) or contract (C...) \
                      address, including its checksum."
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "address": { "type": "string" }
            },
            "required": ["address"],
            "additionalProperties": false
        }),
        output_schema: Some(serde_json::json!({
            "type": "object",
            "properties": {
                "valid": { "type": "boolean" },
                "address": { "type": "string" },
                "type": {
                    "type": "string",
                    "enum": ["public_key", "contract"]
                }
            },
            "required": ["valid", "address"]
        })),
        annotations: Some(ToolAnnotations::pure()),
    }
}

#[derive(Debug, Deserialize)]
struct ValidateAddressArgs {
    address: String,
}

/// Execute the tool
///
/// Always checks StrKey form, independent of the server's address policy.
pub fn execute(_ctx: &ToolContext, args: serde_json::Value) -> ToolsCallResult {
    let args: ValidateAddressArgs = match parse_arguments(args) {
        Ok(a) => a,
        Err(e) => return ToolsCallResult::error(e),
    };

    let (result, text) = match address_kind(&args.address) {
        Some(kind) => (
            serde_json::json!({
                "valid": true,
                "address": args.address,
                "type": kind.as_str()
            }),
            format!("{} is a valid {} address", args.address, kind.as_str()),
        ),
        None => (
            serde_json::json!({
                "valid": false,
                "address": args.address
            }),
            format!("{} is not a valid Stellar address", args.address),
        ),
    };

    ToolsCallResult::success_with_structured(vec![ToolContent::text(text)], result)
}
