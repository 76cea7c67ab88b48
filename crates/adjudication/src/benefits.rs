//! Benefits engine
//!
//! Applies copay, deductible, coinsurance, and the out-of-pocket cap to one
//! service line, in that fixed order; the ordering is part of the
//! contract, not an implementation detail. Mutates the running accumulator
//! state so the next line of the same claim sees the drawn-down values;
//! lines of one claim are therefore order-dependent and must not be
//! processed in parallel.

use claims_agent_config::AdjudicationConfig;
use claims_agent_core::{
    AccumulatorDeltas, AccumulatorState, LineAdjudicationResult, LineStatus, NetworkStatus,
    PolicyDefinition, ServiceLine,
};

/// Financial adjudication core
pub struct BenefitsEngine {
    config: AdjudicationConfig,
}

impl BenefitsEngine {
    pub fn new(config: AdjudicationConfig) -> Self {
        Self { config }
    }

    /// Adjudicate a single line against the plan and the CURRENT
    /// accumulator state, mutating the state for the next line.
    ///
    /// All arithmetic is unrounded; callers round via
    /// [`LineAdjudicationResult::rounded`] when exposing the result.
    pub fn adjudicate_line(
        &self,
        line: &ServiceLine,
        policy: &PolicyDefinition,
        accumulators: &mut AccumulatorState,
    ) -> LineAdjudicationResult {
        tracing::debug!(
            cpt = %line.cpt_code,
            charge = line.charge_amount,
            "Adjudicating line"
        );

        let mut notes = Vec::new();

        let network = match line.network_status {
            Some(NetworkStatus::InNetwork) => NetworkStatus::InNetwork,
            Some(NetworkStatus::OutOfNetwork) => NetworkStatus::OutOfNetwork,
            Some(other) => {
                notes.push(format!(
                    "Warning: Network status '{}' treating as Out-of-Network.",
                    other
                ));
                NetworkStatus::OutOfNetwork
            }
            None => {
                notes.push(
                    "Warning: Network status unresolved, treating as Out-of-Network.".to_string(),
                );
                NetworkStatus::OutOfNetwork
            }
        };

        // Allowed amount. A real system would consult a fee schedule; the
        // out-of-network ratio stands in for one.
        let allowed = if network.is_in_network() {
            line.charge_amount
        } else {
            line.charge_amount * self.config.oon_allowed_ratio
        };
        let mut remaining = allowed;

        let service_type = self.config.service_types.classify(&line.cpt_code);
        let rule = policy.rule_for(service_type, network);

        let deductible_limit = policy.deductible_individual;
        let oop_limit = policy.oop_max_individual;

        let mut member_responsibility = 0.0;
        let mut copay_applied = 0.0;
        let mut coinsurance_member_owes = 0.0;
        let mut applied_to_deductible = 0.0;
        let mut applied_to_oop = 0.0;

        // 1. Copay, collected up front when the rule marks it as not
        //    deductible-applicable. Capped at the allowed amount.
        if let Some(copay) = rule.copay {
            if copay > 0.0 && !rule.copay_applies_to_deductible {
                let amount = copay.min(remaining);
                copay_applied = amount;
                member_responsibility += amount;
                applied_to_oop += amount;
                remaining -= amount;
                notes.push(format!("Applied ${:.2} Copay.", amount));
            }
        }

        // 2. Deductible, up to the room left under the plan limit.
        if remaining > 0.0 && rule.deductible_applies {
            let remaining_deductible = accumulators.remaining_deductible(deductible_limit);
            if remaining_deductible > 0.0 {
                let amount = remaining.min(remaining_deductible);
                applied_to_deductible = amount;
                member_responsibility += amount;
                applied_to_oop += amount;
                remaining -= amount;
                notes.push(format!("Applied ${:.2} towards deductible.", amount));
            }
        }

        // 3. Coinsurance on whatever the copay and deductible left behind.
        if remaining > 0.0 && rule.coinsurance > 0.0 {
            let member_share = remaining * rule.coinsurance;
            coinsurance_member_owes = member_share;
            member_responsibility += member_share;
            applied_to_oop += member_share;
            remaining -= member_share;
            notes.push(format!(
                "Applied {:.0}% coinsurance (${:.2}).",
                rule.coinsurance * 100.0,
                member_share
            ));
        }

        // 4. The insurer pays what the three benefit steps did not consume.
        let mut insurer_payment = remaining;

        // 5. Out-of-pocket cap, applied LAST over the combined member
        //    cost-share of this line. The overage shifts to the insurer.
        let potential_oop = accumulators.oop_met_individual + applied_to_oop;
        if potential_oop > oop_limit {
            let overage = potential_oop - oop_limit;
            notes.push(format!(
                "OOP Max Limit (${:.2}) reached. Reducing member responsibility by ${:.2}.",
                oop_limit, overage
            ));
            member_responsibility -= overage;
            insurer_payment += overage;
            applied_to_oop -= overage;
            tracing::info!(
                oop_limit,
                overage,
                "Out-of-pocket maximum reached, shifting overage to insurer"
            );
        }

        // 6. Draw down the accumulators so the NEXT line of this claim sees
        //    the updated state.
        accumulators.apply(&AccumulatorDeltas::new(applied_to_deductible, applied_to_oop));

        tracing::debug!(
            member_owes = member_responsibility,
            insurer_pays = insurer_payment,
            applied_deductible = applied_to_deductible,
            applied_oop = applied_to_oop,
            "Line adjudicated"
        );

        LineAdjudicationResult {
            status: LineStatus::Adjudicated,
            allowed_amount: allowed,
            copay_applied,
            deductible_applied: applied_to_deductible,
            coinsurance_member_owes,
            member_responsibility,
            insurer_payment,
            applied_to_deductible,
            applied_to_oop_max: applied_to_oop,
            notes,
        }
    }
}
