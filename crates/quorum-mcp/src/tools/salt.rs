//! Deployment salt tools

use serde::Deserialize;
use tracing::debug;

use crate::invariants::parse_arguments;
use crate::protocol::{Tool, ToolAnnotations, ToolContent, ToolsCallResult};

use super::ToolContext;

/// Get the single-salt tool definition
pub fn single_tool_definition() -> Tool {
    Tool {
        name: "quorum_generate_salt".to_string(),
        title: Some("Generate Deployment Salt".to_string()),
        description: "Generate a 32-byte salt (64 hex characters) for deploying a \
                      governance contract through the factory. Random unless a seed is \
                      given; the same seed always yields the same salt, and so the same \
                      contract address."
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "seed": {
                    "type": "string",
                    "minLength": 1,
                    "description": "Derive the salt as SHA-256 of this string instead of randomly"
                }
            },
            "additionalProperties": false
        }),
        output_schema: Some(serde_json::json!({
            "type": "object",
            "properties": {
                "salt": {
                    "type": "string",
                    "pattern": "^[0-9a-f]{64}$"
                }
            },
            "required": ["salt"]
        })),
        annotations: Some(ToolAnnotations::random()),
    }
}

/// Get the batch tool definition
pub fn batch_tool_definition() -> Tool {
    Tool {
        name: "quorum_generate_multiple_salts".to_string(),
        title: Some("Generate Multiple Salts".to_string()),
        description: "Generate several distinct deployment salts at once, one per contract \
                      to be deployed."
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "count": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": quorum_core::MAX_SALT_BATCH,
                    "description": "Number of salts to generate"
                }
            },
            "required": ["count"],
            "additionalProperties": false
        }),
        output_schema: Some(serde_json::json!({
            "type": "object",
            "properties": {
                "salts": {
                    "type": "array",
                    "items": { "type": "string" }
                },
                "count": { "type": "integer" }
            },
            "required": ["salts", "count"]
        })),
        annotations: Some(ToolAnnotations::random()),
    }
}

#[derive(Debug, Deserialize)]
struct SingleArgs {
    #[serde(default)]
    seed: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BatchArgs {
    count: usize,
}

/// Execute the single-salt tool
pub fn execute_single(_ctx: &ToolContext, args: serde_json::Value) -> ToolsCallResult {
    let args: SingleArgs = match parse_arguments(args) {
        Ok(a) => a,
        Err(e) => return ToolsCallResult::error(e),
    };

    let salt = match args.seed.as_deref() {
        Some("") => return ToolsCallResult::error("seed must not be empty"),
        Some(seed) => {
            debug!("Deriving salt from a {}-byte seed", seed.len());
            quorum_core::salt::generate_deterministic_salt(seed)
        }
        None => quorum_core::salt::generate_salt(),
    };
    let result = serde_json::json!({ "salt": salt });

    ToolsCallResult::success_with_structured(vec![ToolContent::text(salt)], result)
}

/// Execute the batch tool
pub fn execute_batch(ctx: &ToolContext, args: serde_json::Value) -> ToolsCallResult {
    let args: BatchArgs = match parse_arguments(args) {
        Ok(a) => a,
        Err(e) => return ToolsCallResult::error(e),
    };

    if args.count > ctx.config.max_salt_batch {
        return ToolsCallResult::error(format!(
            "Salt count must be between 1 and {}",
            ctx.config.max_salt_batch
        ));
    }

    let salts = match quorum_core::salt::generate_multiple_salts(args.count) {
        Ok(s) => s,
        Err(e) => return ToolsCallResult::error(e.to_string()),
    };

    let result = serde_json::json!({
        "salts": salts,
        "count": salts.len()
    });

    ToolsCallResult::success_with_structured(vec![ToolContent::text(salts.join("\n"))], result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::tools::tests::{ctx, structured};
    use quorum_core::salt::is_valid_salt;

    #[test]
    fn test_generate_salt() {
        let result = execute_single(&ctx(), serde_json::Value::Null);
        let salt = structured(&result)["salt"].as_str().unwrap().to_string();
        assert!(is_valid_salt(&salt));
        assert_eq!(result.content[0].as_text(), salt);
    }

    #[test]
    fn test_seeded_salt_is_repeatable() {
        let first = execute_single(&ctx(), serde_json::json!({ "seed": "governance-v1" }));
        let second = execute_single(&ctx(), serde_json::json!({ "seed": "governance-v1" }));
        let salt = structured(&first)["salt"].as_str().unwrap();
        assert_eq!(salt, structured(&second)["salt"]);
        assert_eq!(
            salt,
            quorum_core::salt::generate_deterministic_salt("governance-v1")
        );

        let other = execute_single(&ctx(), serde_json::json!({ "seed": "governance-v2" }));
        assert_ne!(structured(&other)["salt"], salt);
    }

    #[test]
    fn test_empty_seed_rejected() {
        let result = execute_single(&ctx(), serde_json::json!({ "seed": "" }));
        assert!(result.is_error());
        assert!(result.content[0].as_text().contains("seed"));
    }

    #[test]
    fn test_generate_multiple_salts() {
        let result = execute_batch(&ctx(), serde_json::json!({ "count": 5 }));
        let value = structured(&result);
        assert_eq!(value["count"], 5);
        assert_eq!(value["salts"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_zero_count_rejected() {
        let result = execute_batch(&ctx(), serde_json::json!({ "count": 0 }));
        assert!(result.is_error());
    }

    #[test]
    fn test_config_limit_applies() {
        let ctx = ToolContext::new(ServerConfig {
            max_salt_batch: 3,
            ..ServerConfig::default()
        });
        let result = execute_batch(&ctx, serde_json::json!({ "count": 4 }));
        assert!(result.is_error());
        assert!(result.content[0].as_text().contains("between 1 and 3"));
    }

    #[test]
    fn test_missing_count() {
        let result = execute_batch(&ctx(), serde_json::json!({}));
        assert!(result.is_error());
    }
}
