//! Structural claim validation
//!
//! One-pass validation of an inbound claim payload. Every violation is
//! collected before returning; the caller never sees only the first
//! problem. A payload that passes comes back as a fully typed
//! [`ClaimSubmission`] ready for adjudication.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use claims_agent_core::{ClaimSubmission, ServiceLine};

/// Raw inbound claim shape, before any field is trusted
#[derive(Debug, Default, Deserialize)]
struct RawClaim {
    #[serde(default)]
    member_id: Option<String>,
    #[serde(default)]
    patient_name: Option<String>,
    #[serde(default)]
    services: Vec<RawServiceLine>,
}

#[derive(Debug, Default, Deserialize)]
struct RawServiceLine {
    #[serde(default)]
    date_of_service: Option<String>,
    #[serde(default)]
    cpt_code: Option<String>,
    #[serde(default)]
    icd_10_code: Option<String>,
    #[serde(default)]
    provider_npi: Option<String>,
    /// Left as raw JSON so a non-numeric charge is a violation, not a
    /// deserialization failure that masks every other problem.
    #[serde(default)]
    charge_amount: Option<Value>,
}

/// Result of validating a claim payload
#[derive(Debug)]
pub struct ValidationOutcome {
    /// The typed claim, present only when there were no violations
    pub claim: Option<ClaimSubmission>,
    /// Every violation found, in field order
    pub violations: Vec<String>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty() && self.claim.is_some()
    }

    fn invalid(violations: Vec<String>) -> Self {
        Self {
            claim: None,
            violations,
        }
    }
}

/// Structural validator for inbound claim payloads
pub struct ClaimValidator;

impl ClaimValidator {
    /// Validate a serialized JSON claim payload
    pub fn validate_json(payload: &str) -> ValidationOutcome {
        let value: Value = match serde_json::from_str(payload) {
            Ok(value) => value,
            Err(e) => {
                return ValidationOutcome::invalid(vec![format!(
                    "Claim payload is not valid JSON: {}",
                    e
                )]);
            }
        };
        Self::validate_value(&value)
    }

    /// Validate an already-decoded claim payload
    pub fn validate_value(payload: &Value) -> ValidationOutcome {
        let raw: RawClaim = match serde_json::from_value(payload.clone()) {
            Ok(raw) => raw,
            Err(e) => {
                return ValidationOutcome::invalid(vec![format!(
                    "Claim payload does not match the expected shape: {}",
                    e
                )]);
            }
        };
        Self::validate_raw(raw)
    }

    fn validate_raw(raw: RawClaim) -> ValidationOutcome {
        let mut violations = Vec::new();

        if raw.member_id.as_deref().map_or(true, |id| id.is_empty()) {
            violations.push("Missing Member ID.".to_string());
        }

        if raw.services.is_empty() {
            violations.push("No service lines found.".to_string());
        }

        let mut dates = Vec::with_capacity(raw.services.len());
        let mut charges = Vec::with_capacity(raw.services.len());

        for (i, line) in raw.services.iter().enumerate() {
            let line_num = i + 1;

            match line.date_of_service.as_deref() {
                None | Some("") => {
                    violations.push(format!("Line {}: Missing Date of Service.", line_num));
                    dates.push(None);
                }
                Some(text) => match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
                    Ok(date) => dates.push(Some(date)),
                    Err(_) => {
                        violations.push(format!(
                            "Line {}: Invalid Date of Service format (expected YYYY-MM-DD).",
                            line_num
                        ));
                        dates.push(None);
                    }
                },
            }

            if line.cpt_code.as_deref().map_or(true, |c| c.is_empty()) {
                violations.push(format!("Line {}: Missing CPT code.", line_num));
            }
            if line.provider_npi.as_deref().map_or(true, |n| n.is_empty()) {
                violations.push(format!("Line {}: Missing Provider NPI.", line_num));
            }

            let charge = line.charge_amount.as_ref().and_then(Value::as_f64);
            match charge {
                Some(amount) if amount >= 0.0 => charges.push(Some(amount)),
                _ => {
                    violations.push(format!(
                        "Line {}: Missing or invalid charge amount (must be a non-negative number).",
                        line_num
                    ));
                    charges.push(None);
                }
            }
            // ICD-10 is optional at intake; coverage rules decide what an
            // absent diagnosis means downstream.
        }

        if !violations.is_empty() {
            tracing::debug!(count = violations.len(), "Claim failed structural validation");
            return ValidationOutcome::invalid(violations);
        }

        let mut claim = ClaimSubmission::new(raw.member_id.unwrap_or_default());
        claim.patient_name = raw.patient_name;
        for ((line, date), charge) in raw.services.into_iter().zip(dates).zip(charges) {
            let mut typed = ServiceLine::new(
                // All Some at this point: a None would have been a violation
                date.unwrap_or(NaiveDate::MIN),
                line.cpt_code.unwrap_or_default(),
                line.provider_npi.unwrap_or_default(),
                charge.unwrap_or(0.0),
            );
            typed.icd_10_code = line.icd_10_code.filter(|c| !c.is_empty());
            claim.services.push(typed);
        }

        ValidationOutcome {
            claim: Some(claim),
            violations: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "member_id": "MEMBER456",
            "patient_name": "Sarah Member",
            "services": [
                {
                    "date_of_service": "2023-10-26",
                    "cpt_code": "99214",
                    "icd_10_code": "M54.5",
                    "provider_npi": "1234567890",
                    "charge_amount": 250.0
                },
                {
                    "date_of_service": "2023-10-26",
                    "cpt_code": "80053",
                    "provider_npi": "0987654321",
                    "charge_amount": 120.0
                }
            ]
        })
    }

    #[test]
    fn test_valid_claim_passes() {
        let outcome = ClaimValidator::validate_value(&valid_payload());
        assert!(outcome.is_valid());
        let claim = outcome.claim.unwrap();
        assert_eq!(claim.member_id, "MEMBER456");
        assert_eq!(claim.services.len(), 2);
        assert_eq!(claim.services[0].charge_amount, 250.0);
        assert!(claim.services[1].icd_10_code.is_none());
    }

    #[test]
    fn test_revalidation_is_idempotent() {
        let outcome = ClaimValidator::validate_value(&valid_payload());
        let claim = outcome.claim.unwrap();
        let again = ClaimValidator::validate_value(&serde_json::to_value(&claim).unwrap());
        assert!(again.is_valid());
        assert!(again.violations.is_empty());
    }

    #[test]
    fn test_all_violations_reported_in_one_pass() {
        let payload = json!({
            "services": [
                {
                    "date_of_service": "26-10-2023",
                    "icd_10_code": "M54.5",
                    "charge_amount": -5
                }
            ]
        });
        let outcome = ClaimValidator::validate_value(&payload);
        assert!(!outcome.is_valid());
        // Missing member id + bad date + missing CPT + missing NPI + bad charge
        assert_eq!(outcome.violations.len(), 5);
        assert!(outcome.violations[0].contains("Missing Member ID"));
        assert!(outcome.violations.iter().any(|v| v.contains("Invalid Date of Service")));
        assert!(outcome.violations.iter().any(|v| v.contains("non-negative")));
    }

    #[test]
    fn test_no_service_lines() {
        let payload = json!({"member_id": "MEMBER123", "services": []});
        let outcome = ClaimValidator::validate_value(&payload);
        assert_eq!(outcome.violations, vec!["No service lines found.".to_string()]);
    }

    #[test]
    fn test_non_numeric_charge_rejected() {
        let payload = json!({
            "member_id": "MEMBER123",
            "services": [{
                "date_of_service": "2023-10-26",
                "cpt_code": "99213",
                "provider_npi": "1234567890",
                "charge_amount": "150.00"
            }]
        });
        let outcome = ClaimValidator::validate_value(&payload);
        assert_eq!(outcome.violations.len(), 1);
        assert!(outcome.violations[0].contains("charge amount"));
    }

    #[test]
    fn test_malformed_json_is_a_violation() {
        let outcome = ClaimValidator::validate_json("{not json");
        assert!(!outcome.is_valid());
        assert_eq!(outcome.violations.len(), 1);
        assert!(outcome.violations[0].contains("not valid JSON"));
    }
}
