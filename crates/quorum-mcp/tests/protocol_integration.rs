//! Integration tests for MCP protocol flow
//!
//! These tests drive the server the way a client would: initialization,
//! tool discovery, and a full voter tree workflow through `tools/call`.

use quorum_mcp::handlers::{handle_notification, handle_request, McpServerState};
use quorum_mcp::protocol::*;
use quorum_mcp::{McpServer, ServerConfig};

const ADMIN: &str = "CAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABSC4";
const VOTERS: [&str; 3] = [
    "GAAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQDZ7H",
    "GABAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEJXA",
    "GABQGAYDAMBQGAYDAMBQGAYDAMBQGAYDAMBQGAYDAMBQGAYDAMBQHGPC",
];

/// Helper to create an initialized server state
fn create_initialized_state() -> McpServerState {
    let mut state = McpServerState::new();
    state.initialized = true;
    state.protocol_version = Some(MCP_PROTOCOL_VERSION.to_string());
    state
}

fn request(id: i64, method: &str, params: serde_json::Value) -> JsonRpcRequest {
    JsonRpcRequest::new(id, method).with_params(params)
}

async fn call_tool(
    state: &mut McpServerState,
    name: &str,
    arguments: serde_json::Value,
) -> serde_json::Value {
    let response = handle_request(
        state,
        &request(
            10,
            "tools/call",
            serde_json::json!({ "name": name, "arguments": arguments }),
        ),
    )
    .await;
    assert!(response.error.is_none(), "tools/call should not be a protocol error");
    response.result.expect("Should have result")
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_full_initialization_flow() {
    let mut state = McpServerState::new();

    let init_request = request(
        1,
        "initialize",
        serde_json::json!({
            "protocolVersion": "2025-11-25",
            "capabilities": {
                "roots": { "listChanged": true }
            },
            "clientInfo": {
                "name": "test-client",
                "version": "1.0.0"
            }
        }),
    );

    let response = handle_request(&mut state, &init_request).await;
    assert!(response.error.is_none(), "Initialize should succeed");
    let result = response.result.expect("Should have result");

    assert_eq!(result["protocolVersion"], "2025-11-25");

    let capabilities = &result["capabilities"];
    assert!(capabilities["tools"].is_object());
    assert!(capabilities["prompts"].is_object());
    assert!(capabilities.get("resources").is_none());

    assert_eq!(result["serverInfo"]["name"], "quorum-mcp");
    assert!(result["instructions"]
        .as_str()
        .unwrap()
        .contains("quorum_create_merkle_root"));

    // Not usable until the initialized notification arrives
    let early = handle_request(&mut state, &request(2, "tools/list", serde_json::json!({}))).await;
    assert_eq!(early.error.unwrap().code, -32002);

    handle_notification(&mut state, &JsonRpcNotification::new("notifications/initialized")).await;
    assert!(state.initialized);

    let listed = handle_request(&mut state, &request(3, "tools/list", serde_json::json!({}))).await;
    assert!(listed.result.is_some());
}

#[tokio::test]
async fn test_version_mismatch_still_answers_with_server_version() {
    let mut state = McpServerState::new();
    let response = handle_request(
        &mut state,
        &request(
            1,
            "initialize",
            serde_json::json!({
                "protocolVersion": "2024-11-05",
                "clientInfo": { "name": "old-client" }
            }),
        ),
    )
    .await;

    let result = response.result.expect("Should have result");
    assert_eq!(result["protocolVersion"], MCP_PROTOCOL_VERSION);
    assert_eq!(state.protocol_version.as_deref(), Some("2024-11-05"));
}

// ============================================================================
// Tool Workflow Tests
// ============================================================================

#[tokio::test]
async fn test_tools_list_has_schemas() {
    let mut state = create_initialized_state();
    let response = handle_request(&mut state, &request(1, "tools/list", serde_json::json!({}))).await;
    let result = response.result.unwrap();

    let tools = result["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 9);
    for tool in tools {
        assert!(tool["name"].as_str().unwrap().starts_with("quorum_"));
        assert_eq!(tool["inputSchema"]["type"], "object");
        assert!(tool["outputSchema"].is_object());
    }
}

#[tokio::test]
async fn test_tree_then_verify_every_voter() {
    let mut state = create_initialized_state();

    let voters: Vec<serde_json::Value> = VOTERS
        .iter()
        .enumerate()
        .map(|(i, address)| serde_json::json!({ "address": address, "weight": i as u64 + 1 }))
        .collect();

    let tree = call_tool(
        &mut state,
        "quorum_build_merkle_tree",
        serde_json::json!({ "voters": voters }),
    )
    .await;
    let root = tree["structuredContent"]["root"].as_str().unwrap().to_string();
    assert_eq!(root.len(), 64);

    for (i, address) in VOTERS.iter().enumerate() {
        let proof = tree["structuredContent"]["proofs"][*address].clone();
        assert_eq!(proof.as_array().unwrap().len(), 2);

        let verified = call_tool(
            &mut state,
            "quorum_verify_merkle_proof",
            serde_json::json!({
                "address": address,
                "weight": i as u64 + 1,
                "proof": proof,
                "root": root
            }),
        )
        .await;
        assert_eq!(verified["structuredContent"]["valid"], true, "voter {}", i);
    }

    // Claiming more weight than committed fails verification
    let inflated = call_tool(
        &mut state,
        "quorum_verify_merkle_proof",
        serde_json::json!({
            "address": VOTERS[0],
            "weight": 100,
            "proof": tree["structuredContent"]["proofs"][VOTERS[0]],
            "root": root
        }),
    )
    .await;
    assert_eq!(inflated["structuredContent"]["valid"], false);
}

#[tokio::test]
async fn test_root_matches_between_tools() {
    let mut state = create_initialized_state();

    let root_only = call_tool(
        &mut state,
        "quorum_create_merkle_root",
        serde_json::json!({ "addresses": VOTERS }),
    )
    .await;

    let voters: Vec<serde_json::Value> = VOTERS
        .iter()
        .map(|address| serde_json::json!({ "address": address }))
        .collect();
    let tree = call_tool(
        &mut state,
        "quorum_build_merkle_tree",
        serde_json::json!({ "voters": voters }),
    )
    .await;

    let config = call_tool(
        &mut state,
        "quorum_build_merkle_voting",
        serde_json::json!({ "admin": ADMIN, "voter_addresses": VOTERS }),
    )
    .await;

    let root = &root_only["structuredContent"]["root"];
    assert_eq!(root, &tree["structuredContent"]["root"]);
    assert_eq!(root, &config["structuredContent"]["root_hash"]);
}

#[tokio::test]
async fn test_deployment_config_round_trip() {
    let mut state = create_initialized_state();

    let salt = call_tool(&mut state, "quorum_generate_salt", serde_json::json!({})).await;
    let root = call_tool(
        &mut state,
        "quorum_create_merkle_root",
        serde_json::json!({ "addresses": VOTERS }),
    )
    .await;

    let report = call_tool(
        &mut state,
        "quorum_validate_governance_config",
        serde_json::json!({
            "governance_type": "MerkleVoting",
            "admin": ADMIN,
            "root_hash": root["structuredContent"]["root"],
            "salt": salt["structuredContent"]["salt"]
        }),
    )
    .await;

    assert_eq!(report["structuredContent"]["valid"], true);
    assert!(report["structuredContent"]["errors"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_seeded_salt_pins_governance_config() {
    let mut state = create_initialized_state();

    let salt = call_tool(
        &mut state,
        "quorum_generate_salt",
        serde_json::json!({ "seed": "council-2026" }),
    )
    .await;
    let root = call_tool(
        &mut state,
        "quorum_create_merkle_root",
        serde_json::json!({ "addresses": VOTERS }),
    )
    .await;

    let config = call_tool(
        &mut state,
        "quorum_build_governance_config",
        serde_json::json!({
            "admin": ADMIN,
            "root_hash": root["structuredContent"]["root"],
            "salt": salt["structuredContent"]["salt"]
        }),
    )
    .await;
    assert_eq!(config["structuredContent"]["salt"], salt["structuredContent"]["salt"]);
    assert_eq!(config["structuredContent"]["root_hash"], root["structuredContent"]["root"]);

    let again = call_tool(
        &mut state,
        "quorum_generate_salt",
        serde_json::json!({ "seed": "council-2026" }),
    )
    .await;
    assert_eq!(again["structuredContent"]["salt"], salt["structuredContent"]["salt"]);
}

#[tokio::test]
async fn test_invalid_voter_is_tool_error() {
    let mut state = create_initialized_state();
    let result = call_tool(
        &mut state,
        "quorum_create_merkle_root",
        serde_json::json!({ "addresses": [VOTERS[0], "GBADADDRESS"] }),
    )
    .await;

    assert_eq!(result["isError"], true);
    assert!(result["content"][0]["text"]
        .as_str()
        .unwrap()
        .contains("GBADADDRESS"));
}

#[tokio::test]
async fn test_lenient_config_accepts_placeholder_addresses() {
    let mut state = McpServerState::with_config(ServerConfig {
        validate_addresses: false,
        ..ServerConfig::default()
    });
    state.initialized = true;

    let result = call_tool(
        &mut state,
        "quorum_create_merkle_root",
        serde_json::json!({ "addresses": ["alice", "bob", "carol"] }),
    )
    .await;
    assert_eq!(result["structuredContent"]["leaf_count"], 3);
}

// ============================================================================
// Prompt Tests
// ============================================================================

#[tokio::test]
async fn test_prompts_get_setup() {
    let mut state = create_initialized_state();
    let response = handle_request(
        &mut state,
        &request(
            1,
            "prompts/get",
            serde_json::json!({
                "name": "setup_merkle_voting",
                "arguments": { "admin": ADMIN, "voters": VOTERS.join(",") }
            }),
        ),
    )
    .await;

    let result = response.result.expect("Should have result");
    let text = result["messages"][0]["content"]["text"].as_str().unwrap();
    assert_eq!(result["messages"][0]["role"], "user");
    assert!(text.contains(ADMIN));
    assert!(text.contains("3 voter(s)"));
}

#[tokio::test]
async fn test_prompts_get_missing_argument() {
    let mut state = create_initialized_state();
    let response = handle_request(
        &mut state,
        &request(
            1,
            "prompts/get",
            serde_json::json!({ "name": "cast_merkle_vote", "arguments": { "address": VOTERS[0] } }),
        ),
    )
    .await;

    let error = response.error.expect("Should be an error");
    assert_eq!(error.code, -32602);
    assert!(error.message.contains("root"));
}

// ============================================================================
// Transport Tests
// ============================================================================

#[tokio::test]
async fn test_line_session() {
    let input = [
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-11-25","clientInfo":{"name":"pipe"}}}"#,
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"quorum_validate_address","arguments":{"address":"GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF"}}}"#,
        "not json",
        r#"{"jsonrpc":"2.0","id":"last","method":"ping"}"#,
    ]
    .join("\n");

    let server = McpServer::new();
    let mut output = Vec::new();
    server
        .run(input.as_bytes(), &mut output)
        .await
        .expect("session should end cleanly at EOF");

    let responses: Vec<serde_json::Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    // One line per request plus the parse error; none for the notification
    assert_eq!(responses.len(), 4);
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[1]["id"], 2);
    assert_eq!(responses[1]["result"]["structuredContent"]["type"], "public_key");
    assert_eq!(responses[2]["id"], serde_json::Value::Null);
    assert_eq!(responses[2]["error"]["code"], -32700);
    assert_eq!(responses[3]["id"], "last");
    assert!(responses[3]["result"].is_object());
}
