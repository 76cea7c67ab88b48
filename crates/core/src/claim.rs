//! Claim submission and service line types

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::adjudication::LineAdjudicationResult;
use crate::eligibility::EligibilityResult;
use crate::network::NetworkStatus;

/// A submitted claim: one member, one or more service lines.
///
/// Created from the inbound payload by the structural validator; the
/// pipeline annotates it in place (`member_eligibility`, per-line network
/// status and adjudication results) as it runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimSubmission {
    /// Member identifier from the insurance documents
    pub member_id: String,

    /// Patient name as submitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,

    /// Service lines in submission order. Order is significant: benefit
    /// application draws down shared accumulators line by line.
    pub services: Vec<ServiceLine>,

    /// Eligibility determination for this claim, populated by the pipeline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_eligibility: Option<EligibilityResult>,
}

impl ClaimSubmission {
    /// Create a claim with no service lines yet
    pub fn new(member_id: impl Into<String>) -> Self {
        Self {
            member_id: member_id.into(),
            patient_name: None,
            services: Vec::new(),
            member_eligibility: None,
        }
    }

    /// Set the patient name
    pub fn patient_name(mut self, name: impl Into<String>) -> Self {
        self.patient_name = Some(name.into());
        self
    }

    /// Append a service line
    pub fn service(mut self, line: ServiceLine) -> Self {
        self.services.push(line);
        self
    }

    /// Date of service of the first line, used as the representative date
    /// for eligibility and benefit-year determination
    pub fn first_date_of_service(&self) -> Option<NaiveDate> {
        self.services.first().map(|line| line.date_of_service)
    }

    /// Benefit year the claim adjudicates against
    pub fn benefit_year(&self) -> Option<i32> {
        self.first_date_of_service().map(|d| d.year())
    }

    /// Total billed charge across all lines
    pub fn total_charge(&self) -> f64 {
        self.services.iter().map(|line| line.charge_amount).sum()
    }
}

/// One service line of a claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceLine {
    /// Date the service was rendered
    pub date_of_service: NaiveDate,

    /// CPT procedure code
    pub cpt_code: String,

    /// ICD-10 diagnosis code, when submitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icd_10_code: Option<String>,

    /// Rendering provider's NPI
    pub provider_npi: String,

    /// Billed charge (non-negative, enforced by the validator)
    pub charge_amount: f64,

    /// Network classification, assigned during processing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_status: Option<NetworkStatus>,

    /// Financial adjudication result, assigned during processing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjudication: Option<LineAdjudicationResult>,

    /// Messages accumulated while this line was processed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub processing_messages: Vec<String>,
}

impl ServiceLine {
    /// Create a service line with the required fields
    pub fn new(
        date_of_service: NaiveDate,
        cpt_code: impl Into<String>,
        provider_npi: impl Into<String>,
        charge_amount: f64,
    ) -> Self {
        Self {
            date_of_service,
            cpt_code: cpt_code.into(),
            icd_10_code: None,
            provider_npi: provider_npi.into(),
            charge_amount,
            network_status: None,
            adjudication: None,
            processing_messages: Vec::new(),
        }
    }

    /// Set the diagnosis code
    pub fn diagnosis(mut self, icd_10_code: impl Into<String>) -> Self {
        self.icd_10_code = Some(icd_10_code.into());
        self
    }

    /// Diagnosis code or the placeholder used when none was submitted
    pub fn diagnosis_or_unknown(&self) -> &str {
        self.icd_10_code.as_deref().unwrap_or("Unknown")
    }
}
