//! Core types and traits for the claims agent
//!
//! This crate provides foundational types used across all other crates:
//! - Claim submission and service line entities
//! - Tagged lookup result types (eligibility, network, pre-auth, guidelines)
//! - Policy definitions, benefit rules, and accumulator state
//! - Adjudication result types
//! - Collaborator traits for every external system of record
//! - Error types

pub mod accumulator;
pub mod adjudication;
pub mod claim;
pub mod eligibility;
pub mod error;
pub mod guidelines;
pub mod money;
pub mod network;
pub mod policy;
pub mod preauth;
pub mod traits;

pub use accumulator::{AccumulatorDeltas, AccumulatorState};
pub use adjudication::{
    AdjudicatedClaim, ClaimAdjudicationSummary, ClaimStatus, LineAdjudicationResult, LineStatus,
};
pub use claim::{ClaimSubmission, ServiceLine};
pub use eligibility::EligibilityResult;
pub use error::{Error, Result};
pub use guidelines::CoverageStatus;
pub use money::round_to_cents;
pub use network::{NetworkStatus, NetworkStatusResult};
pub use policy::{BenefitRule, PolicyDefinition, ServiceType};
pub use preauth::{PreAuthDecision, PreAuthStatus};

// Trait re-exports
pub use traits::{
    AccumulatorStore, CoverageGuidelineSource, EligibilitySource, PolicyStore, PreAuthSource,
    ProviderDirectory,
};
