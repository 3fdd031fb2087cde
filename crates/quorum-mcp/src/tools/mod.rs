//! Quorum MCP tool definitions
//!
//! Every tool lives in its own module exposing `tool_definition()` and
//! `execute()`. [`ToolRegistry::builtin`] registers them explicitly; there
//! is no dynamic discovery.

mod build_tree;
mod create_root;
mod governance;
mod salt;
mod validate_address;
mod verify_proof;

use std::collections::HashMap;
use std::sync::Arc;

use quorum_core::AddressValidator;
use tracing::debug;

use crate::config::ServerConfig;
use crate::protocol::{Tool, ToolsCallResult};

/// Tool execution context
pub struct ToolContext {
    pub config: ServerConfig,
    /// Validator applied to voter and admin addresses
    pub validator: Arc<dyn AddressValidator>,
}

impl ToolContext {
    pub fn new(config: ServerConfig) -> Self {
        let validator = config.address_validator();
        Self { config, validator }
    }
}

impl Default for ToolContext {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}

/// Tool entry point
pub type ToolHandler = fn(&ToolContext, serde_json::Value) -> ToolsCallResult;

/// A tool definition paired with its handler
#[derive(Clone)]
pub struct RegisteredTool {
    pub definition: Tool,
    pub handler: ToolHandler,
}

/// Name-to-tool table, fixed once the server starts
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every Quorum tool
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(salt::single_tool_definition(), salt::execute_single);
        registry.register(salt::batch_tool_definition(), salt::execute_batch);
        registry.register(create_root::tool_definition(), create_root::execute);
        registry.register(build_tree::tool_definition(), build_tree::execute);
        registry.register(verify_proof::tool_definition(), verify_proof::execute);
        registry.register(validate_address::tool_definition(), validate_address::execute);
        registry.register(governance::validate_tool_definition(), governance::execute_validate);
        registry.register(
            governance::build_config_tool_definition(),
            governance::execute_build_config,
        );
        registry.register(governance::build_tool_definition(), governance::execute_build);
        registry
    }

    /// Add a tool, replacing any tool already registered under the same name
    pub fn register(&mut self, definition: Tool, handler: ToolHandler) {
        let name = definition.name.clone();
        if self
            .tools
            .insert(name.clone(), RegisteredTool { definition, handler })
            .is_none()
        {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.get(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Tool definitions in registration order
    pub fn definitions(&self) -> Vec<Tool> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.definition.clone())
            .collect()
    }

    /// Execute a tool by name
    pub fn execute(
        &self,
        ctx: &ToolContext,
        name: &str,
        arguments: serde_json::Value,
    ) -> ToolsCallResult {
        match self.tools.get(name) {
            Some(tool) => {
                debug!("Executing tool {}", name);
                (tool.handler)(ctx, arguments)
            }
            None => ToolsCallResult::error(format!("Unknown tool: {}", name)),
        }
    }
}
