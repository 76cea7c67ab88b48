//! Membership eligibility interface

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::eligibility::EligibilityResult;
use crate::Result;

/// Membership system of record.
#[async_trait]
pub trait EligibilitySource: Send + Sync {
    /// Look up a member's coverage on a date of service.
    ///
    /// An unknown member is [`Error::MemberNotFound`](crate::Error); a known
    /// member whose coverage is not active on the date returns `Ok` with
    /// `is_eligible == false` and a reason.
    async fn check_eligibility(
        &self,
        member_id: &str,
        date_of_service: NaiveDate,
    ) -> Result<EligibilityResult>;
}
