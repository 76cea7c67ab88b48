//! Pre-authorization interface

use async_trait::async_trait;

use crate::preauth::PreAuthDecision;
use crate::Result;

/// Pre-authorization system of record.
#[async_trait]
pub trait PreAuthSource: Send + Sync {
    /// Fetch the authorization determination for a (member, procedure,
    /// diagnosis) combination.
    ///
    /// `None` means no determination is on file. What that implies (assume
    /// not required, or deny) is a policy decision that belongs to the
    /// caller, not to the store.
    async fn pre_auth_status(
        &self,
        member_id: &str,
        cpt_code: &str,
        diagnosis_code: &str,
    ) -> Result<Option<PreAuthDecision>>;
}
