//! Provider network directory interface

use async_trait::async_trait;

use crate::network::NetworkStatusResult;
use crate::Result;

/// Provider network system of record.
#[async_trait]
pub trait ProviderDirectory: Send + Sync {
    /// Classify a provider under a plan.
    ///
    /// An unknown NPI is [`Error::ProviderNotFound`](crate::Error); a known
    /// provider with no rule for the plan returns
    /// [`NetworkStatus::NotFoundForPlan`](crate::NetworkStatus), which
    /// callers treat as out-of-network for benefit-rule selection.
    async fn network_status(&self, provider_npi: &str, plan_id: &str)
        -> Result<NetworkStatusResult>;
}
