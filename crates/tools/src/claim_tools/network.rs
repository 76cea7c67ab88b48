//! Network Status Tool
//!
//! Classifies a provider as in- or out-of-network under a plan.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use claims_agent_core::ProviderDirectory;

use crate::mcp::{InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema};

const TOOL_NAME: &str = "check_network_status";

/// Provider network lookup tool
pub struct CheckNetworkStatusTool {
    directory: Arc<dyn ProviderDirectory>,
}

impl CheckNetworkStatusTool {
    pub fn new(directory: Arc<dyn ProviderDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl Tool for CheckNetworkStatusTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Check a provider's network status under a member's plan. A \
         provider without a rule for the plan is reported as \
         Not-Found-For-Plan and priced out-of-network."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: TOOL_NAME.to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object()
                .property(
                    "provider_npi",
                    PropertySchema::string("Rendering provider's NPI"),
                    true,
                )
                .property(
                    "plan_id",
                    PropertySchema::string("Member's insurance plan"),
                    true,
                ),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let provider_npi = input
            .get("provider_npi")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::invalid_params("provider_npi is required"))?;
        let plan_id = input
            .get("plan_id")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::invalid_params("plan_id is required"))?;

        let result = self
            .directory
            .network_status(provider_npi, plan_id)
            .await
            .map_err(|e| ToolError::execution(e.to_string()))?;

        let content = serde_json::to_value(&result)
            .map_err(|e| ToolError::execution(e.to_string()))?;
        Ok(ToolOutput::json(content))
    }
}
