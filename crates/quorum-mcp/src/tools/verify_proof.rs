//! Merkle proof verification tool

use serde::Deserialize;
use tracing::debug;

use quorum_core::VoterLeaf;

use crate::invariants::{parse_arguments, validate_digest_hex};
use crate::protocol::{Tool, ToolAnnotations, ToolContent, ToolsCallResult};

use super::ToolContext;

/// Get the tool definition
pub fn tool_definition() -> Tool {
    Tool {
        name: "quorum_verify_merkle_proof".to_string(),
        title: Some("Verify Merkle Proof".to_string()),
        description: "Check that a voter (address and weight) is committed to a Merkle root, \
                      using the proof returned by quorum_build_merkle_tree. Run this before \
                      submitting a vote to catch a wrong proof or weight locally."
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "address": { "type": "string" },
                "weight": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Voting weight the voter was committed with (default: 1)"
                },
                "proof": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Sibling hashes, bottom-up"
                },
                "root": {
                    "type": "string",
                    "description": "Merkle root as 64 lowercase hex characters"
                }
            },
            "required": ["address", "proof", "root"],
            "additionalProperties": false
        }),
        output_schema: Some(serde_json::json!({
            "type": "object",
            "properties": {
                "valid": { "type": "boolean" }
            },
            "required": ["valid"]
        })),
        annotations: Some(ToolAnnotations::pure()),
    }
}

#[derive(Debug, Deserialize)]
struct VerifyArgs {
    address: String,
    #[serde(default)]
    weight: Option<u64>,
    proof: Vec<String>,
    root: String,
}

/// Execute the tool
pub fn execute(_ctx: &ToolContext, args: serde_json::Value) -> ToolsCallResult {
    let args: VerifyArgs = match parse_arguments(args) {
        Ok(a) => a,
        Err(e) => return ToolsCallResult::error(e),
    };

    if let Err(e) = validate_digest_hex("root", &args.root) {
        return ToolsCallResult::error(e);
    }

    let leaf = VoterLeaf {
        address: args.address,
        weight: args.weight,
    };
    let valid = quorum_core::verify_merkle_proof(&leaf, &args.proof, &args.root);
    debug!(
        "Proof for {} ({} entries): {}",
        leaf.address,
        args.proof.len(),
        valid
    );

    let text = if valid {
        format!(
            "Valid: {} with weight {} is in the tree",
            leaf.address,
            leaf.effective_weight()
        )
    } else {
        format!(
            "Invalid: proof does not link {} with weight {} to the root",
            leaf.address,
            leaf.effective_weight()
        )
    };

    ToolsCallResult::success_with_structured(
        vec![ToolContent::text(text)],
        serde_json::json!({ "valid": valid }),
    )
}
