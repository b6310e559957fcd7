//! Per-LPA eligibility classification.
//!
//! Whether an identity check may start depends on the LPA's lifecycle status
//! and on who is being checked: a donor can start while the LPA is still a
//! draft, but a certificate provider or voucher cannot act until the LPA has
//! been submitted. This is a classification table, not a transitioning state
//! machine: each request classifies a status value independently and nothing
//! is persisted.
//!
//! Unknown raw status values never reach this module: they are rejected at
//! parse time with [`crate::IdCheckError::UnknownLpaStatus`], which callers
//! must propagate.

use crate::lpa::{LpaStatus, PersonType};

/// Wording for an LPA whose identity check has already been completed.
pub const MSG_ALREADY_COMPLETED: &str =
    "This LPA cannot be added as an identity check has already been completed for this LPA";

/// Wording for a draft LPA when someone other than the donor is being checked.
pub const MSG_NOT_YET_SUBMITTED: &str =
    "This LPA cannot be added as it has not yet been submitted";

/// Per-LPA eligibility result. Computed fresh on every request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EligibilityOutcome {
    pub startable: bool,
    pub status: LpaStatus,
    pub block_reason: Option<String>,
}

impl EligibilityOutcome {
    fn startable(status: LpaStatus) -> Self {
        Self {
            startable: true,
            status,
            block_reason: None,
        }
    }

    fn blocked(status: LpaStatus, reason: impl Into<String>) -> Self {
        Self {
            startable: false,
            status,
            block_reason: Some(reason.into()),
        }
    }
}

/// Classify whether an identity check may start for `person_type` on an LPA
/// in `status`.
pub fn check(status: LpaStatus, person_type: PersonType) -> EligibilityOutcome {
    match status {
        // Only the donor can start before the LPA is submitted.
        LpaStatus::Draft => match person_type {
            PersonType::Donor => EligibilityOutcome::startable(status),
            PersonType::CertificateProvider | PersonType::Voucher => {
                EligibilityOutcome::blocked(status, MSG_NOT_YET_SUBMITTED)
            }
        },
        LpaStatus::InProgress | LpaStatus::StatutoryWaitingPeriod | LpaStatus::DoNotRegister => {
            EligibilityOutcome::startable(status)
        }
        LpaStatus::Registered => EligibilityOutcome::blocked(status, MSG_ALREADY_COMPLETED),
        LpaStatus::Suspended
        | LpaStatus::Expired
        | LpaStatus::CannotRegister
        | LpaStatus::Cancelled
        | LpaStatus::DeRegistered => EligibilityOutcome::blocked(
            status,
            format!(
                "This LPA cannot be added as its status is set to {}",
                status.display_name()
            ),
        ),
    }
}
