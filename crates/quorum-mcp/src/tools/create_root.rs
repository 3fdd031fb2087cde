//! Merkle root tool
//!
//! Computes only the root for an equal-weight voter list. This is the value
//! passed as `root_hash` when deploying a MerkleVoting contract.

use serde::Deserialize;
use tracing::info;

use crate::invariants::{parse_arguments, validate_voter_count};
use crate::protocol::{Tool, ToolAnnotations, ToolContent, ToolsCallResult};

use super::ToolContext;

/// Get the tool definition
pub fn tool_definition() -> Tool {
    Tool {
        name: "quorum_create_merkle_root".to_string(),
        title: Some("Create Merkle Root".to_string()),
        description: "Compute the Merkle root for a list of voter addresses, each with weight 1. \
                      The root is the root_hash deployment parameter of a MerkleVoting \
                      contract. Voter order matters: the same addresses in a different order \
                      give a different root."
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "addresses": {
                    "type": "array",
                    "items": { "type": "string" },
                    "minItems": 1,
                    "description": "Stellar account (G...) or contract (C...) addresses"
                }
            },
            "required": ["addresses"],
            "additionalProperties": false
        }),
        output_schema: Some(serde_json::json!({
            "type": "object",
            "properties": {
                "root": {
                    "type": "string",
                    "pattern": "^[0-9a-f]{64}$"
                },
                "leaf_count": { "type": "integer" }
            },
            "required": ["root", "leaf_count"]
        })),
        annotations: Some(ToolAnnotations::pure()),
    }
}

#[derive(Debug, Deserialize)]
struct CreateRootArgs {
    addresses: Vec<String>,
}

/// Execute the tool
pub fn execute(ctx: &ToolContext, args: serde_json::Value) -> ToolsCallResult {
    let args: CreateRootArgs = match parse_arguments(args) {
        Ok(a) => a,
        Err(e) => return ToolsCallResult::error(e),
    };

    if let Err(e) = validate_voter_count(args.addresses.len(), ctx.config.max_voters) {
        return ToolsCallResult::error(e);
    }

    let root = match quorum_core::create_merkle_root_from_addresses_with(
        &args.addresses,
        ctx.validator.as_ref(),
    ) {
        Ok(r) => r,
        Err(e) => return ToolsCallResult::error(e.to_string()),
    };

    info!("Created Merkle root for {} voters", args.addresses.len());

    let result = serde_json::json!({
        "root": root,
        "leaf_count": args.addresses.len()
    });

    ToolsCallResult::success_with_structured(
        vec![ToolContent::text(format!(
            "Merkle root for {} voters: {}",
            args.addresses.len(),
            root
        ))],
        result,
    )
}
