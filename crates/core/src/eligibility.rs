//! Member eligibility result type

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Outcome of an eligibility lookup.
///
/// A member who is found but inactive on the date of service is a
/// successful lookup with a negative result (`is_eligible == false` plus a
/// reason), distinct from the member not being found at all, which is an
/// [`Error::MemberNotFound`](crate::Error::MemberNotFound).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub member_id: String,
    pub date_of_service: NaiveDate,
    pub is_eligible: bool,
    pub plan_id: String,
    /// Why the member is not eligible, when `is_eligible` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl EligibilityResult {
    /// Member is active on the date of service
    pub fn eligible(
        member_id: impl Into<String>,
        date_of_service: NaiveDate,
        plan_id: impl Into<String>,
    ) -> Self {
        Self {
            member_id: member_id.into(),
            date_of_service,
            is_eligible: true,
            plan_id: plan_id.into(),
            reason: None,
        }
    }

    /// Member exists but coverage was not active on the date of service
    pub fn ineligible(
        member_id: impl Into<String>,
        date_of_service: NaiveDate,
        plan_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            member_id: member_id.into(),
            date_of_service,
            is_eligible: false,
            plan_id: plan_id.into(),
            reason: Some(reason.into()),
        }
    }
}
