//! Claim Adjudication Tool
//!
//! Runs a claim through the full pipeline: validation, eligibility,
//! per-line network / pre-auth / guideline checks, benefits, aggregation,
//! and accumulator write-back.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use claims_agent_adjudication::ClaimAdjudicator;
use claims_agent_core::Error;

use crate::mcp::{InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema};

const TOOL_NAME: &str = "adjudicate_claim";

/// Full-pipeline adjudication tool
pub struct AdjudicateClaimTool {
    adjudicator: Arc<ClaimAdjudicator>,
}

impl AdjudicateClaimTool {
    pub fn new(adjudicator: Arc<ClaimAdjudicator>) -> Self {
        Self { adjudicator }
    }
}

#[async_trait]
impl Tool for AdjudicateClaimTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Adjudicate a claim: apply policy benefits line by line and return \
         the claim annotated with per-line results, a claim summary, and \
         the overall claim status."
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

    /// Adjudication can fan out to several systems of record
    fn timeout_secs(&self) -> u64 {
        60
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let claim = input
            .get("claim")
            .ok_or_else(|| ToolError::invalid_params("claim is required"))?;

        let result = match claim {
            Value::String(payload) => self.adjudicator.process_submission(payload).await,
            other => self.adjudicator.process_value(other).await,
        };

        match result {
            Ok(adjudicated) => {
                let content = serde_json::to_value(&adjudicated)
                    .map_err(|e| ToolError::execution(e.to_string()))?;
                Ok(ToolOutput::json(content))
            }
            // Structural rejection is a business outcome the agent needs to
            // see, not a protocol failure.
            Err(Error::Validation(violations)) => Ok(ToolOutput::json(json!({
                "claim_level_status": "Rejected",
                "violations": violations,
            }))),
            Err(e) => Err(ToolError::execution(e.to_string())),
        }
    }
}
