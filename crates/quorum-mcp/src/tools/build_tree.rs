//! Merkle tree tool
//!
//! Builds the full voter tree and returns every voter's proof. Each voter
//! submits their own proof together with their vote.

use serde::Deserialize;
use tracing::info;

use quorum_core::VoterLeaf;

use crate::invariants::{parse_arguments, validate_voter_count};
use crate::protocol::{Tool, ToolAnnotations, ToolContent, ToolsCallResult};

use super::ToolContext;

/// Get the tool definition
pub fn tool_definition() -> Tool {
    Tool {
        name: "quorum_build_merkle_tree".to_string(),
        title: Some("Build Merkle Voting Tree".to_string()),
        description: "Build the Merkle tree for a weighted voter list. Returns the root and a \
                      proof for every voter address. If an address appears more than once, \
                      its proof is the one for its last occurrence."
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "voters": {
                    "type": "array",
                    "minItems": 1,
                    "items": {
                        "type": "object",
                        "properties": {
                            "address": {
                                "type": "string",
                                "description": "Stellar account (G...) or contract (C...) address"
                            },
                            "weight": {
                                "type": "integer",
                                "minimum": 1,
                                "description": "Voting weight (default: 1)"
                            }
                        },
                        "required": ["address"]
                    }
                }
            },
            "required": ["voters"],
            "additionalProperties": false
        }),
        output_schema: Some(serde_json::json!({
            "type": "object",
            "properties": {
                "root": { "type": "string" },
                "proofs": {
                    "type": "object",
                    "additionalProperties": {
                        "type": "array",
                        "items": { "type": "string" }
                    }
                },
                "voter_count": { "type": "integer" }
            },
            "required": ["root", "proofs", "voter_count"]
        })),
        annotations: Some(ToolAnnotations::pure()),
    }
}

#[derive(Debug, Deserialize)]
struct BuildTreeArgs {
    voters: Vec<VoterLeaf>,
}

/// Execute the tool
pub fn execute(ctx: &ToolContext, args: serde_json::Value) -> ToolsCallResult {
    let args: BuildTreeArgs = match parse_arguments(args) {
        Ok(a) => a,
        Err(e) => return ToolsCallResult::error(e),
    };

    if let Err(e) = validate_voter_count(args.voters.len(), ctx.config.max_voters) {
        return ToolsCallResult::error(e);
    }

    let tree = match quorum_core::build_merkle_tree_with(&args.voters, ctx.validator.as_ref()) {
        Ok(t) => t,
        Err(e) => return ToolsCallResult::error(e.to_string()),
    };

    info!(
        "Built Merkle tree for {} voters ({} distinct)",
        args.voters.len(),
        tree.proofs.len()
    );

    let result = serde_json::json!({
        "root": tree.root,
        "proofs": tree.proofs,
        "voter_count": args.voters.len()
    });

    let mut lines = vec![
        format!("Root: {}", tree.root),
        format!("Voters: {}", args.voters.len()),
    ];
    if tree.proofs.len() < args.voters.len() {
        lines.push(format!(
            "Warning: {} duplicate address entries; each keeps the proof of its last occurrence",
            args.voters.len() - tree.proofs.len()
        ));
    }

    ToolsCallResult::success_with_structured(vec![ToolContent::text(lines.join("\n"))], result)
}
