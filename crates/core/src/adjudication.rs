//! Adjudication result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::accumulator::AccumulatorState;
use crate::claim::ClaimSubmission;
use crate::money::round_to_cents;

/// Disposition of a single service line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStatus {
    #[serde(rename = "Adjudicated")]
    Adjudicated,
    #[serde(rename = "Denied - PreAuth Missing/Not Approved")]
    DeniedPreAuth,
    #[serde(rename = "Denied - Not Covered per Guidelines")]
    DeniedNotCovered,
    #[serde(rename = "Adjudication Error")]
    Error,
}

impl LineStatus {
    pub fn is_denied(&self) -> bool {
        matches!(self, LineStatus::DeniedPreAuth | LineStatus::DeniedNotCovered)
    }
}

impl std::fmt::Display for LineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LineStatus::Adjudicated => "Adjudicated",
            LineStatus::DeniedPreAuth => "Denied - PreAuth Missing/Not Approved",
            LineStatus::DeniedNotCovered => "Denied - Not Covered per Guidelines",
            LineStatus::Error => "Adjudication Error",
        };
        write!(f, "{}", label)
    }
}

/// Financial adjudication of one service line. Computed once; monetary
/// fields are rounded to cents when the result is built for exposure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineAdjudicationResult {
    pub status: LineStatus,
    /// Maximum billable amount for the service under the plan
    pub allowed_amount: f64,
    pub copay_applied: f64,
    pub deductible_applied: f64,
    pub coinsurance_member_owes: f64,
    pub member_responsibility: f64,
    pub insurer_payment: f64,
    /// Contribution to the deductible accumulator from this line
    pub applied_to_deductible: f64,
    /// Contribution to the out-of-pocket accumulator from this line (post-cap)
    pub applied_to_oop_max: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl LineAdjudicationResult {
    /// Result for a denied line: the member owes the full billed charge and
    /// the insurer pays nothing. The benefits engine is not involved, so no
    /// amount reaches the accumulators.
    pub fn denied(status: LineStatus, charge_amount: f64, notes: Vec<String>) -> Self {
        Self {
            status,
            allowed_amount: 0.0,
            copay_applied: 0.0,
            deductible_applied: 0.0,
            coinsurance_member_owes: 0.0,
            member_responsibility: charge_amount,
            insurer_payment: 0.0,
            applied_to_deductible: 0.0,
            applied_to_oop_max: 0.0,
            notes,
        }
    }

    /// Result for a line that failed processing (e.g. an unresolvable
    /// provider): no financials are assigned.
    pub fn errored(notes: Vec<String>) -> Self {
        Self {
            status: LineStatus::Error,
            allowed_amount: 0.0,
            copay_applied: 0.0,
            deductible_applied: 0.0,
            coinsurance_member_owes: 0.0,
            member_responsibility: 0.0,
            insurer_payment: 0.0,
            applied_to_deductible: 0.0,
            applied_to_oop_max: 0.0,
            notes,
        }
    }

    /// Copy with all monetary fields rounded to cents
    pub fn rounded(&self) -> Self {
        Self {
            status: self.status,
            allowed_amount: round_to_cents(self.allowed_amount),
            copay_applied: round_to_cents(self.copay_applied),
            deductible_applied: round_to_cents(self.deductible_applied),
            coinsurance_member_owes: round_to_cents(self.coinsurance_member_owes),
            member_responsibility: round_to_cents(self.member_responsibility),
            insurer_payment: round_to_cents(self.insurer_payment),
            applied_to_deductible: round_to_cents(self.applied_to_deductible),
            applied_to_oop_max: round_to_cents(self.applied_to_oop_max),
            notes: self.notes.clone(),
        }
    }
}

/// Overall claim disposition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimStatus {
    #[serde(rename = "Rejected")]
    Rejected,
    #[serde(rename = "Processed - Adjudicated")]
    Adjudicated,
    #[serde(rename = "Processed - Partially or Fully Denied")]
    PartiallyOrFullyDenied,
    #[serde(rename = "Processed - Pending Clinical Review")]
    PendingClinicalReview,
    #[serde(rename = "Processed - With Errors")]
    ProcessedWithErrors,
}

impl std::fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ClaimStatus::Rejected => "Rejected",
            ClaimStatus::Adjudicated => "Processed - Adjudicated",
            ClaimStatus::PartiallyOrFullyDenied => "Processed - Partially or Fully Denied",
            ClaimStatus::PendingClinicalReview => "Processed - Pending Clinical Review",
            ClaimStatus::ProcessedWithErrors => "Processed - With Errors",
        };
        write!(f, "{}", label)
    }
}

/// Claim-level aggregate computed at the end of the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimAdjudicationSummary {
    pub adjudication_id: Uuid,
    pub total_charge_amount: f64,
    pub total_allowed_amount: f64,
    pub total_member_responsibility: f64,
    pub total_insurer_payment: f64,
    pub total_applied_to_deductible: f64,
    pub total_applied_to_oop_max: f64,
    pub adjudicated_at: DateTime<Utc>,
    /// Accumulator state before this claim was applied
    pub initial_accumulators: AccumulatorState,
    /// Accumulator state after this claim was applied
    pub final_accumulators: AccumulatorState,
    pub needs_clinical_review: bool,
}

/// Final output of the pipeline: the annotated claim plus its disposition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjudicatedClaim {
    pub claim: ClaimSubmission,
    #[serde(rename = "claim_level_status")]
    pub status: ClaimStatus,
    #[serde(rename = "claim_summary", skip_serializing_if = "Option::is_none")]
    pub summary: Option<ClaimAdjudicationSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
}

impl AdjudicatedClaim {
    /// A claim rejected before line-level processing (e.g. ineligible member)
    pub fn rejected(claim: ClaimSubmission, messages: Vec<String>) -> Self {
        Self {
            claim,
            status: ClaimStatus::Rejected,
            summary: None,
            messages,
        }
    }
}
