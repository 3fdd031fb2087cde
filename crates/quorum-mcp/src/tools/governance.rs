//! Governance config tools

use serde::Deserialize;
use tracing::info;

use quorum_core::governance::{
    build_governance_config, build_merkle_voting_config, validate_governance_config,
};
use quorum_core::GovernanceConfig;

use crate::invariants::{parse_arguments, validate_voter_count};
use crate::protocol::{Tool, ToolAnnotations, ToolContent, ToolsCallResult};

use super::ToolContext;

fn config_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "governance_type": {
                "type": "string",
                "enum": ["MerkleVoting"]
            },
            "admin": { "type": "string" },
            "root_hash": { "type": "string" },
            "salt": { "type": "string" }
        },
        "required": ["governance_type", "admin", "salt"]
    })
}

/// Get the validation tool definition
pub fn validate_tool_definition() -> Tool {
    Tool {
        name: "quorum_validate_governance_config".to_string(),
        title: Some("Validate Governance Config".to_string()),
        description: "Check a MerkleVoting deployment config and list every problem found: \
                      admin address, root_hash presence and format, salt format."
            .to_string(),
        input_schema: config_schema(),
        output_schema: Some(serde_json::json!({
            "type": "object",
            "properties": {
                "valid": { "type": "boolean" },
                "errors": {
                    "type": "array",
                    "items": { "type": "string" }
                }
            },
            "required": ["valid", "errors"]
        })),
        annotations: Some(ToolAnnotations::pure()),
    }
}

/// Get the config builder tool definition
pub fn build_config_tool_definition() -> Tool {
    Tool {
        name: "quorum_build_governance_config".to_string(),
        title: Some("Build Governance Config".to_string()),
        description: "Assemble a MerkleVoting deployment config from an admin address and \
                      an existing Merkle root. Pass a salt to pin the contract address; \
                      a fresh salt is generated when it is omitted. Fails listing every \
                      problem if the result does not validate."
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "admin": {
                    "type": "string",
                    "description": "Admin account or contract address"
                },
                "root_hash": {
                    "type": "string",
                    "description": "Merkle root as 64 hex characters"
                },
                "salt": {
                    "type": "string",
                    "description": "Deployment salt as 64 hex characters (default: random)"
                }
            },
            "required": ["admin", "root_hash"],
            "additionalProperties": false
        }),
        output_schema: Some(config_schema()),
        annotations: Some(ToolAnnotations::random()),
    }
}

/// Get the build tool definition
pub fn build_tool_definition() -> Tool {
    Tool {
        name: "quorum_build_merkle_voting".to_string(),
        title: Some("Build Merkle Voting Config".to_string()),
        description: "Build a complete MerkleVoting deployment config from an admin address \
                      and the voter list: computes the root (weight 1 per voter) and \
                      generates a fresh salt."
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "admin": {
                    "type": "string",
                    "description": "Admin account or contract address"
                },
                "voter_addresses": {
                    "type": "array",
                    "items": { "type": "string" },
                    "minItems": 1
                }
            },
            "required": ["admin", "voter_addresses"],
            "additionalProperties": false
        }),
        output_schema: Some(config_schema()),
        annotations: Some(ToolAnnotations::random()),
    }
}

#[derive(Debug, Deserialize)]
struct BuildConfigArgs {
    admin: String,
    root_hash: String,
    #[serde(default)]
    salt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BuildArgs {
    admin: String,
    voter_addresses: Vec<String>,
}

/// Execute the validation tool
pub fn execute_validate(ctx: &ToolContext, args: serde_json::Value) -> ToolsCallResult {
    let config: GovernanceConfig = match parse_arguments(args) {
        Ok(c) => c,
        Err(e) => return ToolsCallResult::error(e),
    };

    let report = validate_governance_config(&config, ctx.validator.as_ref());

    let text = if report.valid {
        "Governance config is valid".to_string()
    } else {
        let mut lines = vec![format!("{} problem(s) found:", report.errors.len())];
        lines.extend(report.errors.iter().map(|e| format!("- {}", e)));
        lines.join("\n")
    };

    let result = match serde_json::to_value(&report) {
        Ok(v) => v,
        Err(e) => return ToolsCallResult::error(format!("Failed to encode report: {}", e)),
    };

    ToolsCallResult::success_with_structured(vec![ToolContent::text(text)], result)
}

/// Execute the config builder tool
pub fn execute_build_config(ctx: &ToolContext, args: serde_json::Value) -> ToolsCallResult {
    let args: BuildConfigArgs = match parse_arguments(args) {
        Ok(a) => a,
        Err(e) => return ToolsCallResult::error(e),
    };

    let salt_given = args.salt.as_deref().is_some_and(|s| !s.is_empty());
    let config = match build_governance_config(
        &args.admin,
        &args.root_hash,
        args.salt,
        ctx.validator.as_ref(),
    ) {
        Ok(c) => c,
        Err(e) => return ToolsCallResult::error(e.to_string()),
    };

    info!(
        "Built MerkleVoting config for admin {} ({} salt)",
        config.admin,
        if salt_given { "given" } else { "generated" }
    );

    let result = match serde_json::to_value(&config) {
        Ok(v) => v,
        Err(e) => return ToolsCallResult::error(format!("Failed to encode config: {}", e)),
    };

    ToolsCallResult::success_with_structured(vec![ToolContent::json(&config)], result)
}

/// Execute the build tool
pub fn execute_build(ctx: &ToolContext, args: serde_json::Value) -> ToolsCallResult {
    let args: BuildArgs = match parse_arguments(args) {
        Ok(a) => a,
        Err(e) => return ToolsCallResult::error(e),
    };

    if let Err(e) = validate_voter_count(args.voter_addresses.len(), ctx.config.max_voters) {
        return ToolsCallResult::error(e);
    }

    let config =
        match build_merkle_voting_config(&args.admin, &args.voter_addresses, ctx.validator.as_ref())
        {
            Ok(c) => c,
            Err(e) => return ToolsCallResult::error(e.to_string()),
        };

    info!(
        "Built MerkleVoting config for {} voters, admin {}",
        args.voter_addresses.len(),
        config.admin
    );

    let result = match serde_json::to_value(&config) {
        Ok(v) => v,
        Err(e) => return ToolsCallResult::error(format!("Failed to encode config: {}", e)),
    };

    ToolsCallResult::success_with_structured(vec![ToolContent::json(&config)], result)
}
