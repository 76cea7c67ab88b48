//! Adjudication Business Configuration
//!
//! Contains the configurable business parameters of the adjudication
//! pipeline: the out-of-network allowed-amount ratio, the policies applied
//! when a lookup has nothing on file, and the CPT-to-service-type mapping
//! used for benefit-rule selection.

use serde::{Deserialize, Serialize};

use claims_agent_core::ServiceType;

/// Adjudication business configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjudicationConfig {
    /// Fraction of the billed charge allowed for out-of-network services.
    /// Stands in for a real fee schedule.
    #[serde(default = "default_oon_allowed_ratio")]
    pub oon_allowed_ratio: f64,

    /// What to do when no pre-authorization determination is on file
    #[serde(default)]
    pub missing_preauth_policy: MissingPreAuthPolicy,

    /// What to do when a (procedure, diagnosis) pair has no guideline entry
    #[serde(default)]
    pub unknown_guideline_policy: UnknownGuidelinePolicy,

    /// Review reason attached when an unknown guideline combination is
    /// flagged rather than denied
    #[serde(default = "default_unknown_guideline_reason")]
    pub unknown_guideline_reason: String,

    /// CPT-to-service-type bucket mapping
    #[serde(default)]
    pub service_types: ServiceTypeMap,
}

/// Policy for services with no pre-authorization determination on file.
///
/// The permissive default matches the upstream claims system; stricter
/// plans can deny instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPreAuthPolicy {
    /// Treat the service as not requiring authorization
    #[default]
    AssumeNotRequired,
    /// Treat the service as requiring an authorization that is missing
    Deny,
}

/// Policy for (procedure, diagnosis) pairs with no guideline entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownGuidelinePolicy {
    /// Process the line but flag the claim for clinical review
    #[default]
    FlagForReview,
    /// Deny the line as not covered
    Deny,
}

/// CPT code lists defining the coarse service-type buckets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceTypeMap {
    #[serde(default = "default_specialist_codes")]
    pub specialist_visit: Vec<String>,
    #[serde(default = "default_lab_codes")]
    pub lab: Vec<String>,
    #[serde(default = "default_inpatient_codes")]
    pub inpatient: Vec<String>,
}

impl ServiceTypeMap {
    /// Bucket a CPT code; anything unlisted falls into the default bucket.
    pub fn classify(&self, cpt_code: &str) -> ServiceType {
        if self.specialist_visit.iter().any(|c| c == cpt_code) {
            ServiceType::SpecialistVisit
        } else if self.lab.iter().any(|c| c == cpt_code) {
            ServiceType::Lab
        } else if self.inpatient.iter().any(|c| c == cpt_code) {
            ServiceType::Inpatient
        } else {
            ServiceType::Default
        }
    }
}

// Default values

fn default_oon_allowed_ratio() -> f64 {
    0.8
}

fn default_unknown_guideline_reason() -> String {
    "Unknown Code Combo".to_string()
}

fn default_specialist_codes() -> Vec<String> {
    ["99203", "99204", "99213", "99214"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_lab_codes() -> Vec<String> {
    ["80048", "80053"].iter().map(|s| s.to_string()).collect()
}

fn default_inpatient_codes() -> Vec<String> {
    ["64493", "64494"].iter().map(|s| s.to_string()).collect()
}

impl Default for ServiceTypeMap {
    fn default() -> Self {
        Self {
            specialist_visit: default_specialist_codes(),
            lab: default_lab_codes(),
            inpatient: default_inpatient_codes(),
        }
    }
}

impl Default for AdjudicationConfig {
    fn default() -> Self {
        Self {
            oon_allowed_ratio: default_oon_allowed_ratio(),
            missing_preauth_policy: MissingPreAuthPolicy::default(),
            unknown_guideline_policy: UnknownGuidelinePolicy::default(),
            unknown_guideline_reason: default_unknown_guideline_reason(),
            service_types: ServiceTypeMap::default(),
        }
    }
}

impl AdjudicationConfig {
    /// Parse a configuration from YAML, applying defaults for absent fields
    pub fn from_yaml_str(yaml: &str) -> Result<Self, crate::ConfigError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| crate::ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file
    pub fn load(path: &std::path::Path) -> Result<Self, crate::ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|_| crate::ConfigError::FileNotFound(path.display().to_string()))?;
        Self::from_yaml_str(&contents)
    }

    /// Check the configured values are usable
    pub fn validate(&self) -> Result<(), crate::ConfigError> {
        if !(self.oon_allowed_ratio > 0.0 && self.oon_allowed_ratio <= 1.0) {
            return Err(crate::ConfigError::InvalidValue {
                field: "oon_allowed_ratio".to_string(),
                message: format!("must be in (0, 1], got {}", self.oon_allowed_ratio),
            });
        }
        Ok(())
    }
}
