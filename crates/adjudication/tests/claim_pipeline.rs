//! Integration tests for the claim pipeline (validate -> eligibility ->
//! per-line checks -> benefits -> aggregation -> accumulator write-back)
//!
//! These tests drive the orchestrator end to end against the in-memory
//! demo stores.

use std::sync::Arc;

use serde_json::json;

use claims_agent_adjudication::{AdjudicationDeps, ClaimAdjudicator};
use claims_agent_config::{AdjudicationConfig, MissingPreAuthPolicy};
use claims_agent_core::{
    AccumulatorDeltas, AccumulatorState, AccumulatorStore, ClaimStatus, CoverageStatus, Error,
    LineStatus,
};
use claims_agent_stores::{
    InMemoryAccumulatorStore, InMemoryGuidelineStore, InMemoryMembershipStore,
    InMemoryPolicyStore, InMemoryPreAuthStore, InMemoryProviderDirectory,
};

fn demo_deps() -> AdjudicationDeps {
    AdjudicationDeps {
        eligibility: Arc::new(InMemoryMembershipStore::with_demo_data()),
        network: Arc::new(InMemoryProviderDirectory::with_demo_data()),
        preauth: Arc::new(InMemoryPreAuthStore::with_demo_data()),
        guidelines: Arc::new(InMemoryGuidelineStore::with_demo_data()),
        policies: Arc::new(InMemoryPolicyStore::with_demo_data()),
        accumulators: Arc::new(InMemoryAccumulatorStore::with_demo_data()),
    }
}

fn adjudicator(deps: AdjudicationDeps) -> ClaimAdjudicator {
    ClaimAdjudicator::new(deps, AdjudicationConfig::default())
}

/// MEMBER456 on HMO_SILVER: a $250 specialist visit with a $50 copay and a
/// $120 lab panel with a $10 copay. Copays only; the deductible is not
/// touched and the OOP accumulator grows by $60.
#[tokio::test]
async fn test_two_line_copay_claim() {
    let deps = demo_deps();
    let accumulators = deps.accumulators.clone();
    let adjudicator = adjudicator(deps);

    let payload = json!({
        "member_id": "MEMBER456",
        "patient_name": "Sarah Member",
        "services": [
            {
                "date_of_service": "2023-10-26",
                "cpt_code": "99214",
                "icd_10_code": "M54.5",
                "provider_npi": "1234567890",
                "charge_amount": 250.0
            },
            {
                "date_of_service": "2023-10-26",
                "cpt_code": "80053",
                "icd_10_code": "M54.5",
                "provider_npi": "0987654321",
                "charge_amount": 120.0
            }
        ]
    });

    let result = adjudicator.process_value(&payload).await.unwrap();
    assert_eq!(result.status, ClaimStatus::Adjudicated);

    let first = result.claim.services[0].adjudication.as_ref().unwrap();
    assert_eq!(first.status, LineStatus::Adjudicated);
    assert_eq!(first.copay_applied, 50.0);
    assert_eq!(first.member_responsibility, 50.0);
    assert_eq!(first.insurer_payment, 200.0);
    assert_eq!(first.applied_to_deductible, 0.0);

    let second = result.claim.services[1].adjudication.as_ref().unwrap();
    assert_eq!(second.member_responsibility, 10.0);
    assert_eq!(second.insurer_payment, 110.0);

    let summary = result.summary.unwrap();
    assert_eq!(summary.total_charge_amount, 370.0);
    assert_eq!(summary.total_member_responsibility, 60.0);
    assert_eq!(summary.total_insurer_payment, 310.0);
    assert_eq!(summary.total_applied_to_deductible, 0.0);
    assert_eq!(summary.total_applied_to_oop_max, 60.0);
    assert_eq!(summary.initial_accumulators, AccumulatorState::new(200.0, 350.0));
    assert_eq!(summary.final_accumulators, AccumulatorState::new(200.0, 410.0));
    assert!(!summary.needs_clinical_review);

    // Deltas were written back to the system of record
    let stored = accumulators.fetch("MEMBER456", 2023).await.unwrap();
    assert_eq!(stored, AccumulatorState::new(200.0, 410.0));
    assert!(result
        .messages
        .iter()
        .any(|m| m.contains("accumulators updated")));
}

/// Pre-authorization required but never obtained: the line is denied, the
/// member owes the full charge, and the benefits engine never runs (no
/// allowed amount, no accumulator movement).
#[tokio::test]
async fn test_missing_preauth_denies_line() {
    let deps = demo_deps();
    let accumulators = deps.accumulators.clone();
    let adjudicator = adjudicator(deps);

    let payload = json!({
        "member_id": "MEMBER123",
        "services": [{
            "date_of_service": "2023-11-15",
            "cpt_code": "64494",
            "icd_10_code": "G56.0",
            "provider_npi": "0987654321",
            "charge_amount": 450.0
        }]
    });

    let result = adjudicator.process_value(&payload).await.unwrap();
    assert_eq!(result.status, ClaimStatus::PartiallyOrFullyDenied);

    let line = result.claim.services[0].adjudication.as_ref().unwrap();
    assert_eq!(line.status, LineStatus::DeniedPreAuth);
    assert_eq!(line.member_responsibility, 450.0);
    assert_eq!(line.insurer_payment, 0.0);
    assert_eq!(line.allowed_amount, 0.0);

    // Nothing reached the accumulators
    let stored = accumulators.fetch("MEMBER123", 2023).await.unwrap();
    assert_eq!(stored, AccumulatorState::new(0.0, 50.0));
}

/// An approved pre-authorization is noted on the line and the claim
/// proceeds through benefits.
#[tokio::test]
async fn test_approved_preauth_noted() {
    let adjudicator = adjudicator(demo_deps());

    let payload = json!({
        "member_id": "MEMBER123",
        "services": [{
            "date_of_service": "2023-11-15",
            "cpt_code": "64493",
            "icd_10_code": "M54.5",
            "provider_npi": "0987654321",
            "charge_amount": 800.0
        }]
    });

    let result = adjudicator.process_value(&payload).await.unwrap();
    let line = &result.claim.services[0];
    assert!(line
        .processing_messages
        .iter()
        .any(|m| m.contains("PA12345")));
    assert_eq!(
        line.adjudication.as_ref().unwrap().status,
        LineStatus::Adjudicated
    );
}

/// Unknown member: hard not-found error before any line is processed.
#[tokio::test]
async fn test_unknown_member_rejected_before_lines() {
    let adjudicator = adjudicator(demo_deps());

    let payload = json!({
        "member_id": "MEMBER999",
        "services": [{
            "date_of_service": "2023-10-26",
            "cpt_code": "99214",
            "provider_npi": "1234567890",
            "charge_amount": 100.0
        }]
    });

    let err = adjudicator.process_value(&payload).await.unwrap_err();
    assert!(matches!(err, Error::MemberNotFound(_)));
}

/// A member found but inactive on the date of service is a Rejected
/// disposition with a reason, not an error.
#[tokio::test]
async fn test_ineligible_member_rejected_with_reason() {
    let adjudicator = adjudicator(demo_deps());

    let payload = json!({
        "member_id": "MEMBER789",
        "services": [{
            "date_of_service": "2023-10-26",
            "cpt_code": "99203",
            "icd_10_code": "R07.9",
            "provider_npi": "1112223333",
            "charge_amount": 150.0
        }]
    });

    let result = adjudicator.process_value(&payload).await.unwrap();
    assert_eq!(result.status, ClaimStatus::Rejected);
    assert!(result.summary.is_none());
    assert!(result
        .messages
        .iter()
        .any(|m| m.contains("Not active on date of service")));
    // The negative eligibility result is still attached to the claim
    let eligibility = result.claim.member_eligibility.unwrap();
    assert!(!eligibility.is_eligible);
}

/// Structural validation failure carries every violation and makes no
/// collaborator calls.
#[tokio::test]
async fn test_validation_failure_lists_all_violations() {
    let deps = demo_deps();
    let accumulators = deps.accumulators.clone();
    let adjudicator = adjudicator(deps);

    let payload = json!({
        "services": [{
            "date_of_service": "not-a-date",
            "charge_amount": -10
        }]
    });

    let err = adjudicator.process_value(&payload).await.unwrap_err();
    let Error::Validation(violations) = err else {
        panic!("expected validation error");
    };
    assert_eq!(violations.len(), 5);

    // Untouched ledger
    let stored = accumulators.fetch("MEMBER456", 2023).await.unwrap();
    assert_eq!(stored, AccumulatorState::new(200.0, 350.0));
}

/// A guideline combination with no entry flags the claim for clinical
/// review under the default policy, and the line still adjudicates.
#[tokio::test]
async fn test_unknown_guideline_flags_for_review() {
    let adjudicator = adjudicator(demo_deps());

    let payload = json!({
        "member_id": "MEMBER456",
        "services": [{
            "date_of_service": "2023-10-26",
            "cpt_code": "99999",
            "icd_10_code": "R00.0",
            "provider_npi": "1234567890",
            "charge_amount": 100.0
        }]
    });

    let result = adjudicator.process_value(&payload).await.unwrap();
    assert_eq!(result.status, ClaimStatus::PendingClinicalReview);
    let summary = result.summary.unwrap();
    assert!(summary.needs_clinical_review);

    let line = &result.claim.services[0];
    assert!(line
        .processing_messages
        .iter()
        .any(|m| m.contains("Unknown Code Combo")));
    // Default_InNetwork: deductible applies, $100 all to deductible
    let adjudication = line.adjudication.as_ref().unwrap();
    assert_eq!(adjudication.applied_to_deductible, 100.0);
}

/// A "Not Covered" guideline denies the line outright.
#[tokio::test]
async fn test_not_covered_guideline_denies_line() {
    let mut deps = demo_deps();
    deps.guidelines = Arc::new(
        InMemoryGuidelineStore::with_demo_data().guideline(
            "97001",
            "Z99.9",
            CoverageStatus::NotCovered,
        ),
    );
    let adjudicator = adjudicator(deps);

    let payload = json!({
        "member_id": "MEMBER456",
        "services": [{
            "date_of_service": "2023-10-26",
            "cpt_code": "97001",
            "icd_10_code": "Z99.9",
            "provider_npi": "1234567890",
            "charge_amount": 200.0
        }]
    });

    let result = adjudicator.process_value(&payload).await.unwrap();
    assert_eq!(result.status, ClaimStatus::PartiallyOrFullyDenied);
    let line = result.claim.services[0].adjudication.as_ref().unwrap();
    assert_eq!(line.status, LineStatus::DeniedNotCovered);
    assert_eq!(line.member_responsibility, 200.0);
    assert_eq!(line.insurer_payment, 0.0);
}

/// An unknown provider degrades to a line-level error; sibling lines keep
/// processing and the claim reports "With Errors".
#[tokio::test]
async fn test_unknown_provider_is_line_level_error() {
    let adjudicator = adjudicator(demo_deps());

    let payload = json!({
        "member_id": "MEMBER456",
        "services": [
            {
                "date_of_service": "2023-10-26",
                "cpt_code": "99214",
                "icd_10_code": "M54.5",
                "provider_npi": "1234567890",
                "charge_amount": 250.0
            },
            {
                "date_of_service": "2023-10-26",
                "cpt_code": "80053",
                "icd_10_code": "M54.5",
                "provider_npi": "0000000000",
                "charge_amount": 120.0
            }
        ]
    });

    let result = adjudicator.process_value(&payload).await.unwrap();
    assert_eq!(result.status, ClaimStatus::ProcessedWithErrors);

    let first = result.claim.services[0].adjudication.as_ref().unwrap();
    assert_eq!(first.status, LineStatus::Adjudicated);
    assert_eq!(first.member_responsibility, 50.0);

    let second = result.claim.services[1].adjudication.as_ref().unwrap();
    assert_eq!(second.status, LineStatus::Error);
    assert_eq!(second.member_responsibility, 0.0);
    assert!(result.claim.services[1]
        .processing_messages
        .iter()
        .any(|m| m.contains("Network status check failed")));
}

/// With the strict pre-auth policy, a service with nothing on file is
/// denied instead of assumed not to require authorization.
#[tokio::test]
async fn test_strict_preauth_policy_denies_unlisted_service() {
    let mut config = AdjudicationConfig::default();
    config.missing_preauth_policy = MissingPreAuthPolicy::Deny;
    let adjudicator = ClaimAdjudicator::new(demo_deps(), config);

    let payload = json!({
        "member_id": "MEMBER456",
        "services": [{
            "date_of_service": "2023-10-26",
            "cpt_code": "99999",
            "icd_10_code": "R00.0",
            "provider_npi": "1234567890",
            "charge_amount": 100.0
        }]
    });

    let result = adjudicator.process_value(&payload).await.unwrap();
    assert_eq!(result.status, ClaimStatus::PartiallyOrFullyDenied);
    let line = result.claim.services[0].adjudication.as_ref().unwrap();
    assert_eq!(line.status, LineStatus::DeniedPreAuth);
}

/// The out-of-pocket cap holds across the pipeline: a member $5 short of
/// the limit only pays $5 more, and the stored accumulator lands exactly
/// on the limit.
#[tokio::test]
async fn test_oop_cap_enforced_end_to_end() {
    let mut deps = demo_deps();
    let accumulators = Arc::new(
        InMemoryAccumulatorStore::new().accumulator(
            "MEMBER456",
            2023,
            AccumulatorState::new(1500.0, 4995.0),
        ),
    );
    deps.accumulators = accumulators.clone();
    let adjudicator = adjudicator(deps);

    let payload = json!({
        "member_id": "MEMBER456",
        "services": [{
            "date_of_service": "2023-10-26",
            "cpt_code": "80053",
            "icd_10_code": "M54.5",
            "provider_npi": "0987654321",
            "charge_amount": 120.0
        }]
    });

    let result = adjudicator.process_value(&payload).await.unwrap();
    let line = result.claim.services[0].adjudication.as_ref().unwrap();
    assert_eq!(line.member_responsibility, 5.0);
    assert_eq!(line.insurer_payment, 115.0);
    assert_eq!(line.applied_to_oop_max, 5.0);

    let stored = accumulators.fetch("MEMBER456", 2023).await.unwrap();
    assert_eq!(stored.oop_met_individual, 5000.0);
    assert!(stored.oop_met_individual <= 5000.0);
}

/// A failed accumulator write-back is a critical warning attached to the
/// (still valid) computed result, never a failure of the adjudication.
#[tokio::test]
async fn test_persistence_failure_is_critical_warning() {
    struct OfflineLedger;

    #[async_trait::async_trait]
    impl AccumulatorStore for OfflineLedger {
        async fn fetch(
            &self,
            _member_id: &str,
            _benefit_year: i32,
        ) -> claims_agent_core::Result<AccumulatorState> {
            Ok(AccumulatorState::new(200.0, 350.0))
        }

        async fn apply(
            &self,
            member_id: &str,
            benefit_year: i32,
            _deltas: &AccumulatorDeltas,
        ) -> claims_agent_core::Result<AccumulatorState> {
            Err(Error::AccumulatorWrite {
                member_id: member_id.to_string(),
                benefit_year,
                message: "ledger offline".to_string(),
            })
        }
    }

    let mut deps = demo_deps();
    deps.accumulators = Arc::new(OfflineLedger);
    let adjudicator = adjudicator(deps);

    let payload = json!({
        "member_id": "MEMBER456",
        "services": [{
            "date_of_service": "2023-10-26",
            "cpt_code": "80053",
            "icd_10_code": "M54.5",
            "provider_npi": "0987654321",
            "charge_amount": 120.0
        }]
    });

    let result = adjudicator.process_value(&payload).await.unwrap();
    // The computed adjudication is intact
    assert_eq!(result.status, ClaimStatus::Adjudicated);
    let line = result.claim.services[0].adjudication.as_ref().unwrap();
    assert_eq!(line.member_responsibility, 10.0);
    // And the failure is reported as a critical warning
    assert!(result
        .messages
        .iter()
        .any(|m| m.contains("CRITICAL WARNING") && m.contains("ledger offline")));
}

/// An out-of-network provider is priced at the configured allowed ratio.
#[tokio::test]
async fn test_out_of_network_line_priced_at_ratio() {
    let adjudicator = adjudicator(demo_deps());

    // 1112223333 is Out-of-Network for HMO_SILVER
    let payload = json!({
        "member_id": "MEMBER456",
        "services": [{
            "date_of_service": "2023-10-26",
            "cpt_code": "99214",
            "icd_10_code": "M54.5",
            "provider_npi": "1112223333",
            "charge_amount": 200.0
        }]
    });

    let result = adjudicator.process_value(&payload).await.unwrap();
    let line = result.claim.services[0].adjudication.as_ref().unwrap();
    // Allowed = 200 * 0.8
    assert_eq!(line.allowed_amount, 160.0);
    // SpecialistVisit_OutOfNetwork: deductible applies, all $160 to it
    assert_eq!(line.applied_to_deductible, 160.0);
}
