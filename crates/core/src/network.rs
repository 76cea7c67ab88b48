//! Provider network classification types

use serde::{Deserialize, Serialize};

/// Network classification of a provider under a specific plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkStatus {
    #[serde(rename = "In-Network")]
    InNetwork,
    #[serde(rename = "Out-of-Network")]
    OutOfNetwork,
    /// Provider is known but has no network rule for the plan. Treated as
    /// out-of-network for benefit-rule selection.
    #[serde(rename = "Not-Found-For-Plan")]
    NotFoundForPlan,
}

impl NetworkStatus {
    pub fn is_in_network(&self) -> bool {
        matches!(self, NetworkStatus::InNetwork)
    }

    /// Suffix used in benefit-rule keys (`SpecialistVisit_InNetwork`,
    /// `Default_OutOfNetwork`). Anything not squarely in network prices as
    /// out-of-network.
    pub fn benefit_key_suffix(&self) -> &'static str {
        match self {
            NetworkStatus::InNetwork => "InNetwork",
            NetworkStatus::OutOfNetwork | NetworkStatus::NotFoundForPlan => "OutOfNetwork",
        }
    }
}

impl std::fmt::Display for NetworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            NetworkStatus::InNetwork => "In-Network",
            NetworkStatus::OutOfNetwork => "Out-of-Network",
            NetworkStatus::NotFoundForPlan => "Not-Found-For-Plan",
        };
        write!(f, "{}", label)
    }
}

/// Outcome of a network status lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkStatusResult {
    pub provider_npi: String,
    pub plan_id: String,
    pub network_status: NetworkStatus,
}

impl NetworkStatusResult {
    pub fn new(
        provider_npi: impl Into<String>,
        plan_id: impl Into<String>,
        network_status: NetworkStatus,
    ) -> Self {
        Self {
            provider_npi: provider_npi.into(),
            plan_id: plan_id.into(),
            network_status,
        }
    }
}
