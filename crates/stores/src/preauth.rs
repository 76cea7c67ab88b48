//! In-memory pre-authorization store

use std::collections::HashMap;

use async_trait::async_trait;

use claims_agent_core::{PreAuthDecision, PreAuthSource, Result};

/// In-memory pre-authorization system of record, keyed by
/// (member, procedure, diagnosis).
///
/// Absence from the store is `None`, never an error; the caller's
/// configured policy decides what that means.
#[derive(Debug, Default)]
pub struct InMemoryPreAuthStore {
    determinations: HashMap<(String, String, String), PreAuthDecision>,
}

impl InMemoryPreAuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a determination
    pub fn determination(
        mut self,
        member_id: impl Into<String>,
        cpt_code: impl Into<String>,
        diagnosis_code: impl Into<String>,
        decision: PreAuthDecision,
    ) -> Self {
        self.determinations.insert(
            (member_id.into(), cpt_code.into(), diagnosis_code.into()),
            decision,
        );
        self
    }

    /// Store seeded with the demo determinations
    pub fn with_demo_data() -> Self {
        Self::new()
            // Specialist visit and lab panel for back pain: no auth needed
            .determination("MEMBER456", "99214", "M54.5", PreAuthDecision::not_required())
            .determination("MEMBER456", "80053", "M54.5", PreAuthDecision::not_required())
            // Facet joint injection: approved
            .determination("MEMBER123", "64493", "M54.5", PreAuthDecision::approved("PA12345"))
            // Second injection level: authorization never obtained
            .determination("MEMBER123", "64494", "G56.0", PreAuthDecision::missing())
    }
}

#[async_trait]
impl PreAuthSource for InMemoryPreAuthStore {
    async fn pre_auth_status(
        &self,
        member_id: &str,
        cpt_code: &str,
        diagnosis_code: &str,
    ) -> Result<Option<PreAuthDecision>> {
        tracing::debug!(member_id, cpt_code, diagnosis_code, "Checking pre-authorization");
        let key = (
            member_id.to_string(),
            cpt_code.to_string(),
            diagnosis_code.to_string(),
        );
        Ok(self.determinations.get(&key).cloned())
    }
}
