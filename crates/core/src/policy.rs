//! Policy definitions and benefit rules

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::network::NetworkStatus;

/// Coarse service-type bucket a CPT code maps into for benefit-rule
/// selection. The CPT-to-bucket mapping itself is configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    SpecialistVisit,
    Lab,
    Inpatient,
    Default,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::SpecialistVisit => "SpecialistVisit",
            ServiceType::Lab => "Lab",
            ServiceType::Inpatient => "Inpatient",
            ServiceType::Default => "Default",
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How one benefit line of a plan applies to an allowed amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitRule {
    /// Flat copay, when the rule defines one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copay: Option<f64>,

    /// When true the copay is folded into deductible handling rather than
    /// collected up front. A copay is charged up front only when the rule
    /// explicitly marks it NOT deductible-applicable.
    #[serde(default)]
    pub copay_applies_to_deductible: bool,

    /// Whether the remaining allowed amount draws down the deductible
    #[serde(default)]
    pub deductible_applies: bool,

    /// Member's share of the allowed amount after deductible (0.0 - 1.0)
    #[serde(default)]
    pub coinsurance: f64,
}

impl BenefitRule {
    /// Copay-only rule: flat copay, no deductible, no coinsurance
    pub fn copay_only(copay: f64) -> Self {
        Self {
            copay: Some(copay),
            copay_applies_to_deductible: false,
            deductible_applies: false,
            coinsurance: 0.0,
        }
    }

    /// Deductible first, then the given coinsurance rate
    pub fn deductible_then_coinsurance(coinsurance: f64) -> Self {
        Self {
            copay: None,
            copay_applies_to_deductible: false,
            deductible_applies: true,
            coinsurance,
        }
    }

    /// Ultimate fallback when a policy defines no applicable rule: the
    /// member is liable for the full allowed amount.
    pub fn member_pays_all() -> Self {
        Self {
            copay: None,
            copay_applies_to_deductible: false,
            deductible_applies: true,
            coinsurance: 1.0,
        }
    }

    /// Whether the copay step applies: a positive copay explicitly marked
    /// as not deductible-applicable.
    pub fn has_upfront_copay(&self) -> bool {
        matches!(self.copay, Some(c) if c > 0.0) && !self.copay_applies_to_deductible
    }
}

/// Static reference data for one plan; read-only during adjudication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyDefinition {
    pub plan_id: String,
    pub plan_year: i32,
    pub deductible_individual: f64,
    pub deductible_family: f64,
    pub oop_max_individual: f64,
    pub oop_max_family: f64,
    /// Benefit rules keyed `"{ServiceType}_{InNetwork|OutOfNetwork}"`
    pub benefits: HashMap<String, BenefitRule>,
}

impl PolicyDefinition {
    pub fn new(plan_id: impl Into<String>, plan_year: i32) -> Self {
        Self {
            plan_id: plan_id.into(),
            plan_year,
            deductible_individual: 0.0,
            deductible_family: 0.0,
            oop_max_individual: 0.0,
            oop_max_family: 0.0,
            benefits: HashMap::new(),
        }
    }

    /// Set individual/family deductible limits
    pub fn deductibles(mut self, individual: f64, family: f64) -> Self {
        self.deductible_individual = individual;
        self.deductible_family = family;
        self
    }

    /// Set individual/family out-of-pocket maximums
    pub fn oop_maximums(mut self, individual: f64, family: f64) -> Self {
        self.oop_max_individual = individual;
        self.oop_max_family = family;
        self
    }

    /// Add a benefit rule for a service type and network tier
    pub fn benefit(mut self, service_type: ServiceType, network: NetworkStatus, rule: BenefitRule) -> Self {
        self.benefits.insert(Self::benefit_key(service_type, network), rule);
        self
    }

    /// Benefit-rule key for a service type under a network tier
    pub fn benefit_key(service_type: ServiceType, network: NetworkStatus) -> String {
        format!("{}_{}", service_type.as_str(), network.benefit_key_suffix())
    }

    /// Select the benefit rule for a service type and network tier, falling
    /// back to the `Default` rule for the tier, and finally to a maximal
    /// member-liability rule if the policy defines neither.
    pub fn rule_for(&self, service_type: ServiceType, network: NetworkStatus) -> BenefitRule {
        let specific_key = Self::benefit_key(service_type, network);
        if let Some(rule) = self.benefits.get(&specific_key) {
            return rule.clone();
        }

        let default_key = Self::benefit_key(ServiceType::Default, network);
        if let Some(rule) = self.benefits.get(&default_key) {
            tracing::warn!(
                plan_id = %self.plan_id,
                specific = %specific_key,
                fallback = %default_key,
                "No specific benefit rule, using plan default"
            );
            return rule.clone();
        }

        tracing::warn!(
            plan_id = %self.plan_id,
            specific = %specific_key,
            "No benefit rule or default found, member pays all"
        );
        BenefitRule::member_pays_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> PolicyDefinition {
        PolicyDefinition::new("HMO_SILVER", 2023)
            .deductibles(1500.0, 3000.0)
            .oop_maximums(5000.0, 10000.0)
            .benefit(
                ServiceType::SpecialistVisit,
                NetworkStatus::InNetwork,
                BenefitRule::copay_only(50.0),
            )
            .benefit(
                ServiceType::Default,
                NetworkStatus::OutOfNetwork,
                BenefitRule::deductible_then_coinsurance(0.4),
            )
    }

    #[test]
    fn test_specific_rule_selected() {
        let rule = policy().rule_for(ServiceType::SpecialistVisit, NetworkStatus::InNetwork);
        assert_eq!(rule.copay, Some(50.0));
        assert!(rule.has_upfront_copay());
    }

    #[test]
    fn test_falls_back_to_default_for_tier() {
        let rule = policy().rule_for(ServiceType::Lab, NetworkStatus::OutOfNetwork);
        assert!(rule.deductible_applies);
        assert_eq!(rule.coinsurance, 0.4);
    }

    #[test]
    fn test_member_pays_all_when_no_rule() {
        let rule = policy().rule_for(ServiceType::Lab, NetworkStatus::InNetwork);
        assert_eq!(rule.coinsurance, 1.0);
        assert!(rule.deductible_applies);
    }

    #[test]
    fn test_not_found_for_plan_keys_as_out_of_network() {
        let key = PolicyDefinition::benefit_key(ServiceType::Lab, NetworkStatus::NotFoundForPlan);
        assert_eq!(key, "Lab_OutOfNetwork");
    }
}
