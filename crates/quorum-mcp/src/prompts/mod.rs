//! Quorum MCP prompt definitions
//!
//! Prompts walk an agent through the two sides of a Merkle vote: setting up
//! the contract and casting a vote against it.

use serde_json::{Map, Value};

use crate::protocol::{Prompt, PromptArgument, PromptMessage, PromptsGetResult};

/// Get all prompt definitions
pub fn get_all_prompts() -> Vec<Prompt> {
    vec![
        Prompt {
            name: "setup_merkle_voting".to_string(),
            title: Some("Set Up Merkle Voting".to_string()),
            description: Some(
                "Guided workflow for committing a voter list and preparing a MerkleVoting \
                 deployment"
                    .to_string(),
            ),
            arguments: Some(vec![
                PromptArgument {
                    name: "admin".to_string(),
                    description: Some("Admin account or contract address".to_string()),
                    required: Some(true),
                },
                PromptArgument {
                    name: "voters".to_string(),
                    description: Some(
                        "Voter addresses, comma separated, optionally as address:weight"
                            .to_string(),
                    ),
                    required: Some(true),
                },
            ]),
        },
        Prompt {
            name: "cast_merkle_vote".to_string(),
            title: Some("Cast Merkle Vote".to_string()),
            description: Some(
                "Check a voter's proof against the contract root before voting".to_string(),
            ),
            arguments: Some(vec![
                PromptArgument {
                    name: "address".to_string(),
                    description: Some("Voter address".to_string()),
                    required: Some(true),
                },
                PromptArgument {
                    name: "root".to_string(),
                    description: Some("Merkle root stored by the contract".to_string()),
                    required: Some(true),
                },
            ]),
        },
    ]
}

/// Get a specific prompt with arguments
pub fn get_prompt(
    name: &str,
    arguments: Option<&Map<String, Value>>,
) -> Result<PromptsGetResult, String> {
    match name {
        "setup_merkle_voting" => get_setup_merkle_voting_prompt(arguments),
        "cast_merkle_vote" => get_cast_merkle_vote_prompt(arguments),
        _ => Err(format!("Unknown prompt: {}", name)),
    }
}

fn required_str<'a>(args: &'a Map<String, Value>, name: &str) -> Result<&'a str, String> {
    args.get(name)
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| format!("Missing required argument: {}", name))
}

/// Split "A, B:3 ,C" into voter entries for the build tool
fn parse_voter_list(voters: &str) -> Vec<Value> {
    voters
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| match entry.rsplit_once(':') {
            Some((address, weight)) => match weight.trim().parse::<u64>() {
                Ok(w) => serde_json::json!({ "address": address.trim(), "weight": w }),
                Err(_) => serde_json::json!({ "address": entry }),
            },
            None => serde_json::json!({ "address": entry }),
        })
        .collect()
}

fn get_setup_merkle_voting_prompt(
    arguments: Option<&Map<String, Value>>,
) -> Result<PromptsGetResult, String> {
    let args = arguments.ok_or("Missing arguments for setup_merkle_voting")?;
    let admin = required_str(args, "admin")?;
    let voters = parse_voter_list(required_str(args, "voters")?);
    if voters.is_empty() {
        return Err("Missing required argument: voters".to_string());
    }

    let voters_json =
        serde_json::to_string_pretty(&voters).map_err(|e| format!("Invalid voters: {}", e))?;

    let prompt_text = format!(
        r#"Set up a MerkleVoting governance contract administered by {admin} with {count} voter(s).

## 1. Check addresses

Call `quorum_validate_address` on the admin and on any voter address you are unsure of.
Every address must be a Stellar account (G...) or contract (C...).

## 2. Build the voter tree

Call `quorum_build_merkle_tree` with:

```json
{{ "voters": {voters_json} }}
```

Keep the voter order exactly as given. Reordering the list changes the root.
If the result warns about duplicate addresses, ask the user which entry is intended.

## 3. Assemble the deployment config

Use the `root` from step 2 as `root_hash`, generate a salt with `quorum_generate_salt`,
and check the result with `quorum_validate_governance_config`:

- governance_type: MerkleVoting
- admin: {admin}
- root_hash: <root from step 2>
- salt: <generated salt>

If every voter has weight 1, `quorum_build_merkle_voting` does steps 2 and 3 in one call,
but it does not return proofs.

## 4. Distribute proofs

Give each voter their entry from `proofs`. A voter needs their address, weight and proof
to vote; the root is public."#,
        admin = admin,
        count = voters.len(),
        voters_json = voters_json,
    );

    Ok(PromptsGetResult {
        description: Some(format!("Set up Merkle voting for {} voters", voters.len())),
        messages: vec![PromptMessage::user(prompt_text)],
    })
}

fn get_cast_merkle_vote_prompt(
    arguments: Option<&Map<String, Value>>,
) -> Result<PromptsGetResult, String> {
    let args = arguments.ok_or("Missing arguments for cast_merkle_vote")?;
    let address = required_str(args, "address")?;
    let root = required_str(args, "root")?;

    let prompt_text = format!(
        r#"Prepare a vote from {address} on the MerkleVoting contract with root {root}.

## Pre-flight Checks

1. **Find the proof** for {address} in the output of `quorum_build_merkle_tree`
   that produced this root, along with the voter's weight.
2. **Verify locally** with `quorum_verify_merkle_proof`:
   - address: {address}
   - weight: <committed weight, omit if 1>
   - proof: <proof list>
   - root: {root}
3. Only submit the vote if `valid` is true. The contract recomputes the same check
   and rejects a vote whose proof or weight does not match.

## If verification fails

- Confirm the weight matches the one committed in the tree.
- Confirm the root is the one stored by the contract, in lowercase hex.
- Rebuild the tree from the original voter list in the original order."#,
        address = address,
        root = root,
    );

    Ok(PromptsGetResult {
        description: Some(format!("Cast a Merkle vote from {}", address)),
        messages: vec![PromptMessage::user(prompt_text)],
    })
}
