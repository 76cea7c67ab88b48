//! Tool Registry
//!
//! Manages tool registration, discovery, and execution with per-tool
//! timeout protection.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use claims_agent_adjudication::{AdjudicationDeps, ClaimAdjudicator};
use claims_agent_config::AdjudicationConfig;
use claims_agent_stores::{
    InMemoryAccumulatorStore, InMemoryGuidelineStore, InMemoryMembershipStore,
    InMemoryPolicyStore, InMemoryPreAuthStore, InMemoryProviderDirectory,
};

use crate::claim_tools::{
    AdjudicateClaimTool, CheckEligibilityTool, CheckNetworkStatusTool, ValidateClaimTool,
};
use crate::mcp::{Tool, ToolError, ToolOutput, ToolSchema};

/// Tool executor trait
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute a tool by name
    async fn execute(&self, name: &str, arguments: Value) -> Result<ToolOutput, ToolError>;

    /// List available tools
    fn list_tools(&self) -> Vec<ToolSchema>;

    /// Get tool schema by name
    fn get_tool(&self, name: &str) -> Option<ToolSchema>;
}

/// Tool registry
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    /// Register a boxed tool
    pub fn register_boxed(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Get tool by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Check if tool exists
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get all tool names
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }
}

#[async_trait]
impl ToolExecutor for ToolRegistry {
    /// Execute a tool with timeout protection
    async fn execute(&self, name: &str, arguments: Value) -> Result<ToolOutput, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::not_found(format!("Tool not found: {}", name)))?;

        tool.validate(&arguments)?;

        let timeout_secs = tool.timeout_secs();
        tracing::trace!(tool = name, timeout_secs, "Executing tool");

        match tokio::time::timeout(Duration::from_secs(timeout_secs), tool.execute(arguments)).await
        {
            Ok(result) => result,
            Err(_elapsed) => Err(ToolError::timeout(name, timeout_secs)),
        }
    }

    fn list_tools(&self) -> Vec<ToolSchema> {
        self.tools.values().map(|t| t.schema()).collect()
    }

    fn get_tool(&self, name: &str) -> Option<ToolSchema> {
        self.tools.get(name).map(|t| t.schema())
    }
}

/// Build the collaborator set backed by the demo stores
pub fn demo_dependencies() -> AdjudicationDeps {
    AdjudicationDeps {
        eligibility: Arc::new(InMemoryMembershipStore::with_demo_data()),
        network: Arc::new(InMemoryProviderDirectory::with_demo_data()),
        preauth: Arc::new(InMemoryPreAuthStore::with_demo_data()),
        guidelines: Arc::new(InMemoryGuidelineStore::with_demo_data()),
        policies: Arc::new(InMemoryPolicyStore::with_demo_data()),
        accumulators: Arc::new(InMemoryAccumulatorStore::with_demo_data()),
    }
}

/// Create a registry wired to the demo stores with default configuration
pub fn create_demo_registry() -> ToolRegistry {
    create_registry(demo_dependencies(), AdjudicationConfig::default())
}

/// Create a registry over the given collaborators and configuration
pub fn create_registry(deps: AdjudicationDeps, config: AdjudicationConfig) -> ToolRegistry {
    let adjudicator = Arc::new(ClaimAdjudicator::new(deps.clone(), config));

    let mut registry = ToolRegistry::new();
    registry.register(ValidateClaimTool::new());
    registry.register(CheckEligibilityTool::new(deps.eligibility.clone()));
    registry.register(CheckNetworkStatusTool::new(deps.network.clone()));
    registry.register(AdjudicateClaimTool::new(adjudicator));

    tracing::info!(tools = registry.len(), "Created claim tool registry");
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_basic() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry.register(ValidateClaimTool::new());
        assert_eq!(registry.len(), 1);
        assert!(registry.has("validate_claim"));
    }

    #[test]
    fn test_demo_registry_has_all_tools() {
        let registry = create_demo_registry();
        assert_eq!(registry.len(), 4);
        assert!(registry.has("validate_claim"));
        assert!(registry.has("check_eligibility"));
        assert!(registry.has("check_network_status"));
        assert!(registry.has("adjudicate_claim"));
    }

    #[test]
    fn test_list_tools_exposes_schemas() {
        let registry = create_demo_registry();
        let tools = registry.list_tools();
        assert!(tools.iter().any(|t| t.name == "adjudicate_claim"));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_not_found() {
        let registry = create_demo_registry();
        let err = registry
            .execute("no_such_tool", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_required_argument_rejected() {
        let registry = create_demo_registry();
        let err = registry
            .execute("check_eligibility", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));
    }
}
