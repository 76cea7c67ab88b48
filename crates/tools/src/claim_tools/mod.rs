//! Claim processing tools
//!
//! One tool per pipeline entry point: structural validation, eligibility,
//! network status, and full adjudication.

mod adjudicate;
mod eligibility;
mod network;
mod validate;

pub use adjudicate::AdjudicateClaimTool;
pub use eligibility::CheckEligibilityTool;
pub use network::CheckNetworkStatusTool;
pub use validate::ValidateClaimTool;
