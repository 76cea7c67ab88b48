//! Eligibility Check Tool
//!
//! Verifies member eligibility for a date of service against the
//! membership system of record.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use claims_agent_core::EligibilitySource;

use crate::mcp::{InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema};

const TOOL_NAME: &str = "check_eligibility";

/// Member eligibility lookup tool
pub struct CheckEligibilityTool {
    eligibility: Arc<dyn EligibilitySource>,
}

impl CheckEligibilityTool {
    pub fn new(eligibility: Arc<dyn EligibilitySource>) -> Self {
        Self { eligibility }
    }
}

#[async_trait]
impl Tool for CheckEligibilityTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Check whether a member's coverage is active on a date of service. \
         Returns the member's plan, and a reason when coverage is inactive."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: TOOL_NAME.to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object()
                .property(
                    "member_id",
                    PropertySchema::string("Member ID from the insurance documents"),
                    true,
                )
                .property(
                    "date_of_service",
                    PropertySchema::string("Date of service (YYYY-MM-DD)"),
                    true,
                ),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let member_id = input
            .get("member_id")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::invalid_params("member_id is required"))?;

        let date_of_service = input
            .get("date_of_service")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::invalid_params("date_of_service is required"))?;
        let date_of_service = NaiveDate::parse_from_str(date_of_service, "%Y-%m-%d")
            .map_err(|_| ToolError::invalid_params("date_of_service must be YYYY-MM-DD"))?;

        let result = self
            .eligibility
            .check_eligibility(member_id, date_of_service)
            .await
            .map_err(|e| ToolError::execution(e.to_string()))?;

        let content = serde_json::to_value(&result)
            .map_err(|e| ToolError::execution(e.to_string()))?;
        Ok(ToolOutput::json(content))
    }
}
