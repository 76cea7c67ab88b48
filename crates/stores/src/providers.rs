//! In-memory provider network directory

use std::collections::HashMap;

use async_trait::async_trait;

use claims_agent_core::{Error, NetworkStatus, NetworkStatusResult, ProviderDirectory, Result};

/// In-memory provider network system of record.
///
/// Providers carry a per-plan classification; a known provider with no
/// entry for a plan is `Not-Found-For-Plan`, which is not an error.
#[derive(Debug, Default)]
pub struct InMemoryProviderDirectory {
    providers: HashMap<String, HashMap<String, NetworkStatus>>,
}

impl InMemoryProviderDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider's classification under a plan
    pub fn provider(
        mut self,
        provider_npi: impl Into<String>,
        plan_id: impl Into<String>,
        status: NetworkStatus,
    ) -> Self {
        self.providers
            .entry(provider_npi.into())
            .or_default()
            .insert(plan_id.into(), status);
        self
    }

    /// Directory seeded with the demo provider panel
    pub fn with_demo_data() -> Self {
        Self::new()
            // Dr. Carter
            .provider("1234567890", "HMO_SILVER", NetworkStatus::InNetwork)
            .provider("1234567890", "PPO_GOLD", NetworkStatus::OutOfNetwork)
            // Quest
            .provider("0987654321", "HMO_SILVER", NetworkStatus::InNetwork)
            .provider("0987654321", "PPO_GOLD", NetworkStatus::InNetwork)
            // Another provider
            .provider("1112223333", "HMO_SILVER", NetworkStatus::OutOfNetwork)
    }
}

#[async_trait]
impl ProviderDirectory for InMemoryProviderDirectory {
    async fn network_status(
        &self,
        provider_npi: &str,
        plan_id: &str,
    ) -> Result<NetworkStatusResult> {
        tracing::debug!(provider_npi, plan_id, "Checking network status");
        let plans = self
            .providers
            .get(provider_npi)
            .ok_or_else(|| Error::ProviderNotFound(provider_npi.to_string()))?;

        let status = plans
            .get(plan_id)
            .copied()
            .unwrap_or(NetworkStatus::NotFoundForPlan);

        Ok(NetworkStatusResult::new(provider_npi, plan_id, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_provider_and_plan() {
        let directory = InMemoryProviderDirectory::with_demo_data();
        let result = directory
            .network_status("1234567890", "HMO_SILVER")
            .await
            .unwrap();
        assert_eq!(result.network_status, NetworkStatus::InNetwork);
    }

    #[tokio::test]
    async fn test_known_provider_unknown_plan() {
        let directory = InMemoryProviderDirectory::with_demo_data();
        let result = directory
            .network_status("1112223333", "PPO_GOLD")
            .await
            .unwrap();
        assert_eq!(result.network_status, NetworkStatus::NotFoundForPlan);
    }

    #[tokio::test]
    async fn test_unknown_provider_is_an_error() {
        let directory = InMemoryProviderDirectory::with_demo_data();
        let err = directory
            .network_status("0000000000", "HMO_SILVER")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ProviderNotFound(_)));
    }
}
