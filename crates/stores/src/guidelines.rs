//! In-memory coverage guideline store

use std::collections::HashMap;

use async_trait::async_trait;

use claims_agent_core::{CoverageGuidelineSource, CoverageStatus, Result};

/// In-memory clinical guideline source, keyed by (procedure, diagnosis).
///
/// An unlisted combination is `None`, never an error; the caller's
/// configured policy decides whether that flags or denies the line.
#[derive(Debug, Default)]
pub struct InMemoryGuidelineStore {
    guidelines: HashMap<(String, String), CoverageStatus>,
}

impl InMemoryGuidelineStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a guideline entry
    pub fn guideline(
        mut self,
        cpt_code: impl Into<String>,
        diagnosis_code: impl Into<String>,
        status: CoverageStatus,
    ) -> Self {
        self.guidelines
            .insert((cpt_code.into(), diagnosis_code.into()), status);
        self
    }

    /// Store seeded with the demo guideline entries
    pub fn with_demo_data() -> Self {
        Self::new()
            // Specialist visit for low back pain
            .guideline("99214", "M54.5", CoverageStatus::GenerallyPayable)
            // Basic lab panel
            .guideline("80053", "M54.5", CoverageStatus::GenerallyPayable)
            .guideline(
                "12345",
                "X99.9",
                CoverageStatus::requires_review("Experimental Code"),
            )
            .guideline("64493", "M54.5", CoverageStatus::PayableWithPreAuth)
            .guideline("64494", "G56.0", CoverageStatus::PayableWithPreAuth)
    }
}

#[async_trait]
impl CoverageGuidelineSource for InMemoryGuidelineStore {
    async fn coverage_status(
        &self,
        cpt_code: &str,
        diagnosis_code: &str,
    ) -> Result<Option<CoverageStatus>> {
        tracing::debug!(cpt_code, diagnosis_code, "Checking coverage guidelines");
        let key = (cpt_code.to_string(), diagnosis_code.to_string());
        Ok(self.guidelines.get(&key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_listed_combination() {
        let store = InMemoryGuidelineStore::with_demo_data();
        let status = store.coverage_status("99214", "M54.5").await.unwrap();
        assert_eq!(status, Some(CoverageStatus::GenerallyPayable));
    }

    #[tokio::test]
    async fn test_experimental_combination_needs_review() {
        let store = InMemoryGuidelineStore::with_demo_data();
        let status = store.coverage_status("12345", "X99.9").await.unwrap().unwrap();
        assert!(status.needs_review());
    }

    #[tokio::test]
    async fn test_unlisted_combination_is_none() {
        let store = InMemoryGuidelineStore::with_demo_data();
        let status = store.coverage_status("99999", "A00.0").await.unwrap();
        assert!(status.is_none());
    }
}
