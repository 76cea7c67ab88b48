//! In-memory systems of record for the claims agent
//!
//! Deterministic implementations of every collaborator trait in
//! `claims-agent-core`, used by the demo tools and as test doubles for the
//! pipeline. Each store starts empty (`new`), is seeded through
//! builder-style methods, and ships a `with_demo_data()` constructor
//! carrying the demo roster, provider panel, plans, and ledger.

pub mod accumulators;
pub mod guidelines;
pub mod membership;
pub mod policies;
pub mod preauth;
pub mod providers;

pub use accumulators::InMemoryAccumulatorStore;
pub use guidelines::InMemoryGuidelineStore;
pub use membership::{CoverageWindow, InMemoryMembershipStore, MemberRecord};
pub use policies::InMemoryPolicyStore;
pub use preauth::InMemoryPreAuthStore;
pub use providers::InMemoryProviderDirectory;
