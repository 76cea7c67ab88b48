//! Collaborator traits
//!
//! The pipeline talks to every system of record through these interfaces,
//! so the benefits engine and orchestrator can be tested against
//! deterministic in-memory implementations without shared global state.

mod eligibility;
mod guidelines;
mod network;
mod policy;
mod preauth;

pub use eligibility::EligibilitySource;
pub use guidelines::CoverageGuidelineSource;
pub use network::ProviderDirectory;
pub use policy::{AccumulatorStore, PolicyStore};
pub use preauth::PreAuthSource;
