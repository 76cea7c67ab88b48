//! Coverage guideline categories

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Coverage determination for a (procedure, diagnosis) pair.
///
/// The set is closed but extensible on the wire: categories serialize as
/// their label strings, and any label that is not recognized deserializes
/// into `RequiresReview` so every line always gets a disposition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverageStatus {
    GenerallyPayable,
    PayableWithPreAuth,
    RequiresReview { reason: String },
    NotCovered,
}

impl CoverageStatus {
    /// A requires-review status with the given reason
    pub fn requires_review(reason: impl Into<String>) -> Self {
        CoverageStatus::RequiresReview {
            reason: reason.into(),
        }
    }

    /// Whether the line should be flagged for clinical review
    pub fn needs_review(&self) -> bool {
        matches!(self, CoverageStatus::RequiresReview { .. })
    }

    /// Whether the guideline denies coverage outright
    pub fn denies_coverage(&self) -> bool {
        matches!(self, CoverageStatus::NotCovered)
    }

    /// Wire label for this category
    pub fn label(&self) -> String {
        match self {
            CoverageStatus::GenerallyPayable => "Generally Payable".to_string(),
            CoverageStatus::PayableWithPreAuth => "Payable with PreAuth".to_string(),
            CoverageStatus::RequiresReview { reason } if reason.is_empty() => {
                "Requires Review".to_string()
            }
            CoverageStatus::RequiresReview { reason } => format!("Requires Review - {}", reason),
            CoverageStatus::NotCovered => "Not Covered".to_string(),
        }
    }

    /// Parse a wire label back into a category. Unrecognized labels become
    /// `RequiresReview` carrying the label as the reason.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Generally Payable" => CoverageStatus::GenerallyPayable,
            "Payable with PreAuth" => CoverageStatus::PayableWithPreAuth,
            "Not Covered" => CoverageStatus::NotCovered,
            other => {
                let reason = other
                    .strip_prefix("Requires Review")
                    .map(|rest| rest.trim_start_matches(" - ").to_string())
                    .unwrap_or_else(|| other.to_string());
                CoverageStatus::RequiresReview { reason }
            }
        }
    }
}

impl std::fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for CoverageStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for CoverageStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        if label.is_empty() {
            return Err(de::Error::custom("coverage status label must not be empty"));
        }
        Ok(CoverageStatus::from_label(&label))
    }
}
