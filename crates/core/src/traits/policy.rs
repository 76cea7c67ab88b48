//! Policy and accumulator store interfaces

use async_trait::async_trait;

use crate::accumulator::{AccumulatorDeltas, AccumulatorState};
use crate::policy::PolicyDefinition;
use crate::Result;

/// Plan policy system of record.
#[async_trait]
pub trait PolicyStore: Send + Sync {
    /// Fetch the policy definition for a plan.
    /// An unknown plan is [`Error::PolicyNotFound`](crate::Error).
    async fn policy(&self, plan_id: &str) -> Result<PolicyDefinition>;
}

/// Accumulator system of record, keyed by (member, benefit year).
///
/// Implementations must apply deltas atomically per key: concurrent claims
/// for the same member and year may interleave, and a lost update would
/// corrupt the deductible math of every later claim.
#[async_trait]
pub trait AccumulatorStore: Send + Sync {
    /// Current accumulator state; a member/year with no history yet is the
    /// zero state, not an error.
    async fn fetch(&self, member_id: &str, benefit_year: i32) -> Result<AccumulatorState>;

    /// Atomically fold a claim's deltas into the stored state and return
    /// the updated state.
    async fn apply(
        &self,
        member_id: &str,
        benefit_year: i32,
        deltas: &AccumulatorDeltas,
    ) -> Result<AccumulatorState>;
}
