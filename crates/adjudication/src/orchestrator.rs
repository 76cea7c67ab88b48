//! Claim adjudication orchestrator
//!
//! Sequences a claim through validation, eligibility, per-line network /
//! pre-auth / guideline checks, and the benefits engine, then aggregates
//! line results into the claim summary and writes accumulator deltas back
//! to the system of record. Lines run strictly in submission order; the
//! accumulator draw-down makes them order-dependent.

use std::sync::Arc;

use chrono::{Datelike, Utc};
use uuid::Uuid;

use claims_agent_config::{AdjudicationConfig, MissingPreAuthPolicy, UnknownGuidelinePolicy};
use claims_agent_core::{
    AccumulatorDeltas, AccumulatorStore, AdjudicatedClaim, ClaimAdjudicationSummary,
    ClaimSubmission, ClaimStatus, CoverageGuidelineSource, CoverageStatus, EligibilitySource,
    Error, LineAdjudicationResult, LineStatus, PolicyStore, PreAuthDecision, PreAuthSource,
    ProviderDirectory, Result, round_to_cents,
};

use crate::benefits::BenefitsEngine;
use crate::validator::ClaimValidator;

/// The collaborators the orchestrator talks to
#[derive(Clone)]
pub struct AdjudicationDeps {
    pub eligibility: Arc<dyn EligibilitySource>,
    pub network: Arc<dyn ProviderDirectory>,
    pub preauth: Arc<dyn PreAuthSource>,
    pub guidelines: Arc<dyn CoverageGuidelineSource>,
    pub policies: Arc<dyn PolicyStore>,
    pub accumulators: Arc<dyn AccumulatorStore>,
}

/// Claim pipeline orchestrator
pub struct ClaimAdjudicator {
    deps: AdjudicationDeps,
    engine: BenefitsEngine,
    config: AdjudicationConfig,
}

impl ClaimAdjudicator {
    pub fn new(deps: AdjudicationDeps, config: AdjudicationConfig) -> Self {
        let engine = BenefitsEngine::new(config.clone());
        Self {
            deps,
            engine,
            config,
        }
    }

    /// Run the full pipeline on a serialized claim payload.
    ///
    /// Structural validation failure is [`Error::Validation`] carrying every
    /// violation; no collaborator is called in that case.
    pub async fn process_submission(&self, payload: &str) -> Result<AdjudicatedClaim> {
        let outcome = ClaimValidator::validate_json(payload);
        match outcome.claim {
            Some(claim) if outcome.violations.is_empty() => self.adjudicate(claim).await,
            _ => Err(Error::Validation(outcome.violations)),
        }
    }

    /// Run the full pipeline on an already-decoded claim payload.
    pub async fn process_value(&self, payload: &serde_json::Value) -> Result<AdjudicatedClaim> {
        let outcome = ClaimValidator::validate_value(payload);
        match outcome.claim {
            Some(claim) if outcome.violations.is_empty() => self.adjudicate(claim).await,
            _ => Err(Error::Validation(outcome.violations)),
        }
    }

    /// Adjudicate a structurally valid claim.
    ///
    /// Lookup-not-found failures (member, plan) abort with an error before
    /// any line is touched. An ineligible member is a `Rejected` disposition,
    /// not an error.
    pub async fn adjudicate(&self, mut claim: ClaimSubmission) -> Result<AdjudicatedClaim> {
        if claim.member_id.is_empty() {
            return Err(Error::MissingField("member_id"));
        }
        let first_dos = claim
            .first_date_of_service()
            .ok_or(Error::MissingField("date_of_service"))?;
        let benefit_year = first_dos.year();

        tracing::info!(
            member_id = %claim.member_id,
            lines = claim.services.len(),
            benefit_year,
            "Adjudicating claim"
        );

        // Eligibility, once per claim, on the first line's date of service.
        let eligibility = self
            .deps
            .eligibility
            .check_eligibility(&claim.member_id, first_dos)
            .await?;
        if !eligibility.is_eligible {
            let reason = eligibility
                .reason
                .clone()
                .unwrap_or_else(|| "Not specified".to_string());
            let message = format!(
                "Member {} not eligible on {}. Reason: {}",
                claim.member_id, first_dos, reason
            );
            tracing::info!(member_id = %claim.member_id, %reason, "Claim rejected: member ineligible");
            claim.member_eligibility = Some(eligibility);
            return Ok(AdjudicatedClaim::rejected(claim, vec![message]));
        }
        let plan_id = eligibility.plan_id.clone();
        claim.member_eligibility = Some(eligibility);

        let policy = self.deps.policies.policy(&plan_id).await?;
        let initial_accumulators = self
            .deps
            .accumulators
            .fetch(&claim.member_id, benefit_year)
            .await?;

        // Accumulator state AS THIS CLAIM progresses, line by line.
        let mut current_accumulators = initial_accumulators.clone();
        let mut needs_clinical_review = false;

        let mut total_member_responsibility = 0.0;
        let mut total_insurer_payment = 0.0;
        let mut total_allowed = 0.0;
        let mut total_applied_to_deductible = 0.0;
        let mut total_applied_to_oop = 0.0;

        let member_id = claim.member_id.clone();
        for (i, line) in claim.services.iter_mut().enumerate() {
            let line_num = i + 1;
            tracing::debug!(line = line_num, cpt = %line.cpt_code, "Processing line");
            let mut messages = Vec::new();
            let mut result: Option<LineAdjudicationResult> = None;

            // Network status for this line's provider under the plan. An
            // unknown provider degrades to a line-level error; sibling
            // lines keep processing.
            match self
                .deps
                .network
                .network_status(&line.provider_npi, &plan_id)
                .await
            {
                Ok(lookup) => {
                    line.network_status = Some(lookup.network_status);
                    if !lookup.network_status.is_in_network() {
                        messages.push(format!(
                            "Provider network status: {}.",
                            lookup.network_status
                        ));
                    }
                }
                Err(e) => {
                    tracing::warn!(line = line_num, provider = %line.provider_npi, error = %e, "Network lookup failed");
                    messages.push(format!("Network status check failed: {}", e));
                    result = Some(LineAdjudicationResult::errored(messages.clone()));
                }
            }

            // Pre-authorization. Nothing on file falls back to the
            // configured policy.
            if result.is_none() {
                let decision = match self
                    .deps
                    .preauth
                    .pre_auth_status(&member_id, &line.cpt_code, line.diagnosis_or_unknown())
                    .await
                {
                    Ok(Some(decision)) => Some(decision),
                    Ok(None) => Some(match self.config.missing_preauth_policy {
                        MissingPreAuthPolicy::AssumeNotRequired => PreAuthDecision::not_required(),
                        MissingPreAuthPolicy::Deny => PreAuthDecision::missing(),
                    }),
                    Err(e) => {
                        tracing::warn!(line = line_num, error = %e, "Pre-auth check failed");
                        messages.push(format!("Pre-auth check failed: {}", e));
                        needs_clinical_review = true;
                        None
                    }
                };

                if let Some(decision) = decision {
                    if !decision.is_cleared() {
                        let denial = format!(
                            "Pre-authorization required but status is '{}'.",
                            decision.status
                        );
                        messages.push(denial.clone());
                        result = Some(LineAdjudicationResult::denied(
                            LineStatus::DeniedPreAuth,
                            line.charge_amount,
                            vec![denial],
                        ));
                    } else if decision.required {
                        messages.push(format!(
                            "Pre-authorization approved (Auth #: {}).",
                            decision.auth_number.as_deref().unwrap_or("N/A")
                        ));
                    }
                }
            }

            // Coverage guidelines. Unknown combinations fall back to the
            // configured policy so every line gets a disposition.
            if result.is_none() {
                let status = match self
                    .deps
                    .guidelines
                    .coverage_status(&line.cpt_code, line.diagnosis_or_unknown())
                    .await
                {
                    Ok(Some(status)) => Some(status),
                    Ok(None) => Some(match self.config.unknown_guideline_policy {
                        UnknownGuidelinePolicy::FlagForReview => CoverageStatus::requires_review(
                            self.config.unknown_guideline_reason.clone(),
                        ),
                        UnknownGuidelinePolicy::Deny => CoverageStatus::NotCovered,
                    }),
                    Err(e) => {
                        tracing::warn!(line = line_num, error = %e, "Guideline check failed");
                        messages.push(format!("Guideline check failed: {}", e));
                        needs_clinical_review = true;
                        None
                    }
                };

                if let Some(status) = status {
                    let check = format!("Guideline check: {}", status);
                    messages.push(check.clone());
                    if status.needs_review() {
                        needs_clinical_review = true;
                    }
                    if status.denies_coverage() {
                        result = Some(LineAdjudicationResult::denied(
                            LineStatus::DeniedNotCovered,
                            line.charge_amount,
                            vec![check],
                        ));
                    }
                }
            }

            // Financial adjudication, unless the line was already decided.
            let result = result.unwrap_or_else(|| {
                let engine_result =
                    self.engine
                        .adjudicate_line(line, &policy, &mut current_accumulators);
                messages.extend(engine_result.notes.iter().cloned());
                engine_result
            });

            total_member_responsibility += result.member_responsibility;
            total_insurer_payment += result.insurer_payment;
            total_allowed += result.allowed_amount;
            total_applied_to_deductible += result.applied_to_deductible;
            total_applied_to_oop += result.applied_to_oop_max;

            line.adjudication = Some(result.rounded());
            line.processing_messages = messages;
        }

        // Claim-level disposition.
        let statuses: Vec<LineStatus> = claim
            .services
            .iter()
            .filter_map(|l| l.adjudication.as_ref().map(|a| a.status))
            .collect();
        let status = if statuses.iter().any(|s| s.is_denied()) {
            ClaimStatus::PartiallyOrFullyDenied
        } else if needs_clinical_review {
            ClaimStatus::PendingClinicalReview
        } else if !statuses.is_empty() && statuses.iter().all(|s| *s == LineStatus::Adjudicated) {
            ClaimStatus::Adjudicated
        } else {
            ClaimStatus::ProcessedWithErrors
        };

        let summary = ClaimAdjudicationSummary {
            adjudication_id: Uuid::new_v4(),
            total_charge_amount: round_to_cents(claim.total_charge()),
            total_allowed_amount: round_to_cents(total_allowed),
            total_member_responsibility: round_to_cents(total_member_responsibility),
            total_insurer_payment: round_to_cents(total_insurer_payment),
            total_applied_to_deductible: round_to_cents(total_applied_to_deductible),
            total_applied_to_oop_max: round_to_cents(total_applied_to_oop),
            adjudicated_at: Utc::now(),
            initial_accumulators: initial_accumulators.rounded(),
            final_accumulators: current_accumulators.rounded(),
            needs_clinical_review,
        };

        let mut messages = vec![format!("Claim adjudication status: {}", status)];

        // Write the claim's deltas back to the system of record. Failure is
        // a critical warning on the (still valid) computed result.
        let deltas = AccumulatorDeltas::new(total_applied_to_deductible, total_applied_to_oop);
        if !deltas.is_zero() {
            match self
                .deps
                .accumulators
                .apply(&member_id, benefit_year, &deltas)
                .await
            {
                Ok(updated) => {
                    tracing::info!(
                        member_id = %member_id,
                        benefit_year,
                        deductible_met = updated.deductible_met_individual,
                        oop_met = updated.oop_met_individual,
                        "Accumulators updated"
                    );
                    messages.push("Core accumulators updated successfully.".to_string());
                }
                Err(e) => {
                    tracing::error!(member_id = %member_id, benefit_year, error = %e, "Accumulator write-back failed");
                    messages.push(format!(
                        "CRITICAL WARNING: Failed to update accumulators in core system: {}",
                        e
                    ));
                }
            }
        }

        tracing::info!(member_id = %member_id, %status, "Claim processed");

        Ok(AdjudicatedClaim {
            claim,
            status,
            summary: Some(summary),
            messages,
        })
    }
}
