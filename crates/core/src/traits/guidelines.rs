//! Coverage guideline interface

use async_trait::async_trait;

use crate::guidelines::CoverageStatus;
use crate::Result;

/// Clinical coverage guideline source.
#[async_trait]
pub trait CoverageGuidelineSource: Send + Sync {
    /// Coverage category for a (procedure, diagnosis) combination.
    ///
    /// `None` means the combination has no guideline entry; the caller's
    /// configured policy decides whether that flags the line for review or
    /// denies it.
    async fn coverage_status(
        &self,
        cpt_code: &str,
        diagnosis_code: &str,
    ) -> Result<Option<CoverageStatus>>;
}
