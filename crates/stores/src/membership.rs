//! In-memory membership store

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use claims_agent_core::{EligibilityResult, EligibilitySource, Error, Result};

/// A date range during which a member's coverage is active
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageWindow {
    pub start: NaiveDate,
    /// Open-ended when `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl CoverageWindow {
    pub fn starting(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && self.end.map_or(true, |end| date <= end)
    }
}

/// Enrollment record for one member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRecord {
    pub plan_id: String,
    pub coverage: Vec<CoverageWindow>,
}

impl MemberRecord {
    pub fn new(plan_id: impl Into<String>) -> Self {
        Self {
            plan_id: plan_id.into(),
            coverage: Vec::new(),
        }
    }

    /// Add a coverage window
    pub fn covered(mut self, window: CoverageWindow) -> Self {
        self.coverage.push(window);
        self
    }

    fn active_on(&self, date: NaiveDate) -> bool {
        self.coverage.iter().any(|w| w.contains(date))
    }
}

/// In-memory membership system of record
#[derive(Debug, Default)]
pub struct InMemoryMembershipStore {
    members: HashMap<String, MemberRecord>,
}

impl InMemoryMembershipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a member
    pub fn member(mut self, member_id: impl Into<String>, record: MemberRecord) -> Self {
        self.members.insert(member_id.into(), record);
        self
    }

    /// Store seeded with the demo membership roster
    pub fn with_demo_data() -> Self {
        let start_2023 = NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date");
        let mid_2023 = NaiveDate::from_ymd_opt(2023, 6, 30).expect("valid date");

        Self::new()
            .member(
                "MEMBER123",
                MemberRecord::new("PPO_GOLD").covered(CoverageWindow::starting(start_2023)),
            )
            .member(
                "MEMBER456",
                MemberRecord::new("HMO_SILVER").covered(CoverageWindow::starting(start_2023)),
            )
            // Coverage lapsed mid-year: found, but inactive on later dates
            .member(
                "MEMBER789",
                MemberRecord::new("PPO_BRONZE")
                    .covered(CoverageWindow::between(start_2023, mid_2023)),
            )
    }
}

#[async_trait]
impl EligibilitySource for InMemoryMembershipStore {
    async fn check_eligibility(
        &self,
        member_id: &str,
        date_of_service: NaiveDate,
    ) -> Result<EligibilityResult> {
        tracing::debug!(member_id, %date_of_service, "Checking eligibility");
        let record = self
            .members
            .get(member_id)
            .ok_or_else(|| Error::MemberNotFound(member_id.to_string()))?;

        if record.active_on(date_of_service) {
            Ok(EligibilityResult::eligible(
                member_id,
                date_of_service,
                &record.plan_id,
            ))
        } else {
            Ok(EligibilityResult::ineligible(
                member_id,
                date_of_service,
                &record.plan_id,
                "Not active on date of service",
            ))
        }
    }
}
