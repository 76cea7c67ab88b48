//! Error types shared across the claims agent

use thiserror::Error;

/// Convenience alias used throughout the workspace
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while processing a claim.
///
/// Negative business outcomes (member ineligible on the date of service,
/// provider out of network, guideline requiring review) are NOT errors;
/// they travel as data on the result types. Only lookup failures and
/// structural problems surface here.
#[derive(Debug, Error)]
pub enum Error {
    /// Claim payload failed structural validation; carries every violation
    /// found in the single validation pass.
    #[error("Claim failed validation with {} violation(s)", .0.len())]
    Validation(Vec<String>),

    /// Member ID is unknown to the membership system.
    #[error("Member ID '{0}' not found")]
    MemberNotFound(String),

    /// Provider NPI is unknown to the network directory.
    #[error("Provider NPI '{0}' not found")]
    ProviderNotFound(String),

    /// No policy definition on file for the plan.
    #[error("Policy '{0}' not found")]
    PolicyNotFound(String),

    /// A field required to continue processing is absent. Claim-level
    /// fatal: no line of the claim is adjudicated.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Claim payload could not be decoded.
    #[error("Invalid claim payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Accumulator write-back failed after adjudication was computed.
    /// The computed result is still valid and must be returned; callers
    /// attach this as a critical warning.
    #[error("Accumulator update failed for member '{member_id}' year {benefit_year}: {message}")]
    AccumulatorWrite {
        member_id: String,
        benefit_year: i32,
        message: String,
    },

    /// Any other collaborator failure.
    #[error("{0}")]
    Store(String),
}

impl Error {
    /// Lookup-not-found errors abort the claim before line-level work.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::MemberNotFound(_) | Error::ProviderNotFound(_) | Error::PolicyNotFound(_)
        )
    }
}
