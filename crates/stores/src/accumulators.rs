//! In-memory accumulator store

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use claims_agent_core::{AccumulatorDeltas, AccumulatorState, AccumulatorStore, Result};

/// In-memory accumulator system of record, keyed by (member, benefit year).
///
/// Delta application is a single read-modify-write under the store lock, so
/// concurrent claims for the same member and year serialize their updates
/// and none is lost. A member/year with no history is the zero state.
#[derive(Debug, Default)]
pub struct InMemoryAccumulatorStore {
    accumulators: Mutex<HashMap<(String, i32), AccumulatorState>>,
}

impl InMemoryAccumulatorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a member/year with existing accumulator values
    pub fn accumulator(
        self,
        member_id: impl Into<String>,
        benefit_year: i32,
        state: AccumulatorState,
    ) -> Self {
        self.accumulators
            .lock()
            .insert((member_id.into(), benefit_year), state);
        self
    }

    /// Store seeded with the demo ledger
    pub fn with_demo_data() -> Self {
        Self::new()
            .accumulator("MEMBER456", 2023, AccumulatorState::new(200.0, 350.0))
            .accumulator("MEMBER123", 2023, AccumulatorState::new(0.0, 50.0))
    }
}

#[async_trait]
impl AccumulatorStore for InMemoryAccumulatorStore {
    async fn fetch(&self, member_id: &str, benefit_year: i32) -> Result<AccumulatorState> {
        let key = (member_id.to_string(), benefit_year);
        let state = self
            .accumulators
            .lock()
            .get(&key)
            .cloned()
            .unwrap_or_default();
        tracing::debug!(
            member_id,
            benefit_year,
            deductible_met = state.deductible_met_individual,
            oop_met = state.oop_met_individual,
            "Fetched accumulators"
        );
        Ok(state)
    }

    async fn apply(
        &self,
        member_id: &str,
        benefit_year: i32,
        deltas: &AccumulatorDeltas,
    ) -> Result<AccumulatorState> {
        let key = (member_id.to_string(), benefit_year);
        let mut accumulators = self.accumulators.lock();
        let state = accumulators.entry(key).or_default();
        state.apply(deltas);
        let updated = state.clone();
        tracing::info!(
            member_id,
            benefit_year,
            deductible_applied = deltas.deductible_applied,
            oop_applied = deltas.oop_applied,
            deductible_met = updated.deductible_met_individual,
            oop_met = updated.oop_met_individual,
            "Applied accumulator deltas"
        );
        Ok(updated)
    }
}
