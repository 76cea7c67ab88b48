//! Member accumulator state

use serde::{Deserialize, Serialize};

use crate::money::round_to_cents;

/// Running per-member, per-benefit-year totals: how much of the individual
/// deductible and out-of-pocket maximum has been met.
///
/// This is the one genuinely mutable shared entity in the pipeline. Within
/// one claim it is read once, mutated line by line (values only ever grow),
/// and written back to the system of record once at claim end via
/// [`AccumulatorDeltas`]. The benefits engine's cap step guarantees the
/// out-of-pocket value never exceeds the plan's limit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccumulatorState {
    pub deductible_met_individual: f64,
    pub oop_met_individual: f64,
}

impl AccumulatorState {
    pub fn new(deductible_met_individual: f64, oop_met_individual: f64) -> Self {
        Self {
            deductible_met_individual,
            oop_met_individual,
        }
    }

    /// Deductible room left under the given plan limit
    pub fn remaining_deductible(&self, limit: f64) -> f64 {
        (limit - self.deductible_met_individual).max(0.0)
    }

    /// Out-of-pocket room left under the given plan limit
    pub fn remaining_oop(&self, limit: f64) -> f64 {
        (limit - self.oop_met_individual).max(0.0)
    }

    /// Fold a claim's (or line's) contribution into the state
    pub fn apply(&mut self, deltas: &AccumulatorDeltas) {
        self.deductible_met_individual += deltas.deductible_applied;
        self.oop_met_individual += deltas.oop_applied;
    }

    /// Copy with values rounded to cents, for exposure on result types
    pub fn rounded(&self) -> Self {
        Self {
            deductible_met_individual: round_to_cents(self.deductible_met_individual),
            oop_met_individual: round_to_cents(self.oop_met_individual),
        }
    }
}

/// A claim's total contribution to the accumulators, written back to the
/// system of record exactly once at claim end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccumulatorDeltas {
    pub deductible_applied: f64,
    pub oop_applied: f64,
}

impl AccumulatorDeltas {
    pub fn new(deductible_applied: f64, oop_applied: f64) -> Self {
        Self {
            deductible_applied,
            oop_applied,
        }
    }

    /// Nothing to write back
    pub fn is_zero(&self) -> bool {
        self.deductible_applied <= 0.0 && self.oop_applied <= 0.0
    }
}
