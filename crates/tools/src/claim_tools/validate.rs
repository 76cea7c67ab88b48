//! Claim Validation Tool
//!
//! Performs structural validation on a submitted claim payload, reporting
//! every violation in one pass.

use async_trait::async_trait;
use serde_json::{json, Value};

use claims_agent_adjudication::ClaimValidator;

use crate::mcp::{InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema};

const TOOL_NAME: &str = "validate_claim";

/// Structural claim validation tool
#[derive(Default)]
pub struct ValidateClaimTool;

impl ValidateClaimTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for ValidateClaimTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Validate the structure of a submitted claim: required fields, \
         date formats, and charge amounts. Reports every violation found."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: TOOL_NAME.to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object().property(
                "claim",
                PropertySchema::object(
                    "Claim payload: member_id, patient_name, and services \
                     [{date_of_service, cpt_code, icd_10_code, provider_npi, charge_amount}]. \
                     A JSON-encoded string is also accepted.",
                ),
                true,
            ),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let claim = input
            .get("claim")
            .ok_or_else(|| ToolError::invalid_params("claim is required"))?;

        let outcome = match claim {
            Value::String(payload) => ClaimValidator::validate_json(payload),
            other => ClaimValidator::validate_value(other),
        };

        Ok(ToolOutput::json(json!({
            "valid": outcome.is_valid(),
            "violations": outcome.violations,
            "claim": outcome.claim,
        })))
    }
}
