//! In-memory policy store

use std::collections::HashMap;

use async_trait::async_trait;

use claims_agent_core::{
    BenefitRule, Error, NetworkStatus, PolicyDefinition, PolicyStore, Result, ServiceType,
};

/// In-memory plan policy system of record
#[derive(Debug, Default)]
pub struct InMemoryPolicyStore {
    policies: HashMap<String, PolicyDefinition>,
}

impl InMemoryPolicyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a policy definition
    pub fn plan(mut self, policy: PolicyDefinition) -> Self {
        self.policies.insert(policy.plan_id.clone(), policy);
        self
    }

    /// Store seeded with the demo plans
    pub fn with_demo_data() -> Self {
        Self::new().plan(hmo_silver()).plan(ppo_gold())
    }
}

/// HMO Silver: copay-driven in network, deductible + 40% out of network
fn hmo_silver() -> PolicyDefinition {
    PolicyDefinition::new("HMO_SILVER", 2023)
        .deductibles(1500.0, 3000.0)
        .oop_maximums(5000.0, 10000.0)
        .benefit(
            ServiceType::SpecialistVisit,
            NetworkStatus::InNetwork,
            BenefitRule::copay_only(50.0),
        )
        .benefit(
            ServiceType::SpecialistVisit,
            NetworkStatus::OutOfNetwork,
            BenefitRule::deductible_then_coinsurance(0.4),
        )
        .benefit(
            ServiceType::Lab,
            NetworkStatus::InNetwork,
            BenefitRule::copay_only(10.0),
        )
        .benefit(
            ServiceType::Lab,
            NetworkStatus::OutOfNetwork,
            BenefitRule::deductible_then_coinsurance(0.4),
        )
        .benefit(
            ServiceType::Inpatient,
            NetworkStatus::InNetwork,
            BenefitRule::deductible_then_coinsurance(0.2),
        )
        .benefit(
            ServiceType::Default,
            NetworkStatus::InNetwork,
            BenefitRule::deductible_then_coinsurance(0.2),
        )
        .benefit(
            ServiceType::Default,
            NetworkStatus::OutOfNetwork,
            BenefitRule::deductible_then_coinsurance(0.4),
        )
}

/// PPO Gold: low deductible, coinsurance-driven, labs free in network
fn ppo_gold() -> PolicyDefinition {
    PolicyDefinition::new("PPO_GOLD", 2023)
        .deductibles(500.0, 1000.0)
        .oop_maximums(3000.0, 6000.0)
        .benefit(
            ServiceType::SpecialistVisit,
            NetworkStatus::InNetwork,
            BenefitRule::deductible_then_coinsurance(0.1),
        )
        .benefit(
            ServiceType::SpecialistVisit,
            NetworkStatus::OutOfNetwork,
            BenefitRule::deductible_then_coinsurance(0.3),
        )
        .benefit(
            ServiceType::Lab,
            NetworkStatus::InNetwork,
            // Covered 100%: zero copay, no deductible, no coinsurance
            BenefitRule::copay_only(0.0),
        )
        .benefit(
            ServiceType::Lab,
            NetworkStatus::OutOfNetwork,
            BenefitRule::deductible_then_coinsurance(0.3),
        )
        .benefit(
            ServiceType::Default,
            NetworkStatus::InNetwork,
            BenefitRule::deductible_then_coinsurance(0.1),
        )
        .benefit(
            ServiceType::Default,
            NetworkStatus::OutOfNetwork,
            BenefitRule::deductible_then_coinsurance(0.3),
        )
}

#[async_trait]
impl PolicyStore for InMemoryPolicyStore {
    async fn policy(&self, plan_id: &str) -> Result<PolicyDefinition> {
        tracing::debug!(plan_id, "Fetching policy definition");
        self.policies
            .get(plan_id)
            .cloned()
            .ok_or_else(|| Error::PolicyNotFound(plan_id.to_string()))
    }
}
