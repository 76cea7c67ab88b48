//! Pre-authorization types

use serde::{Deserialize, Serialize};

/// Status of a pre-authorization on file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreAuthStatus {
    Approved,
    Missing,
    /// No authorization is required for the service
    NotApplicable,
}

impl std::fmt::Display for PreAuthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PreAuthStatus::Approved => "Approved",
            PreAuthStatus::Missing => "Missing",
            PreAuthStatus::NotApplicable => "Not Applicable",
        };
        write!(f, "{}", label)
    }
}

/// A pre-authorization determination for (member, procedure, diagnosis)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreAuthDecision {
    /// Whether the service requires prior authorization
    pub required: bool,
    pub status: PreAuthStatus,
    /// Authorization number, present when approved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_number: Option<String>,
}

impl PreAuthDecision {
    /// No authorization required
    pub fn not_required() -> Self {
        Self {
            required: false,
            status: PreAuthStatus::NotApplicable,
            auth_number: None,
        }
    }

    /// Authorization required and approved under the given number
    pub fn approved(auth_number: impl Into<String>) -> Self {
        Self {
            required: true,
            status: PreAuthStatus::Approved,
            auth_number: Some(auth_number.into()),
        }
    }

    /// Authorization required but none is on file
    pub fn missing() -> Self {
        Self {
            required: true,
            status: PreAuthStatus::Missing,
            auth_number: None,
        }
    }

    /// Whether the line may proceed to benefits: either no authorization is
    /// required, or one is required and approved.
    pub fn is_cleared(&self) -> bool {
        !self.required || self.status == PreAuthStatus::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clearance() {
        assert!(PreAuthDecision::not_required().is_cleared());
        assert!(PreAuthDecision::approved("PA12345").is_cleared());
        assert!(!PreAuthDecision::missing().is_cleared());
    }
}
