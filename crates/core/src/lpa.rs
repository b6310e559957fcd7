//! LPA record types and wire/boundary translation.
//!
//! Upstream serves one combined payload per LPA: a case-management
//! ("Sirius") section that is always present, and an LPA-store section that
//! only exists once the LPA has been submitted. Draft LPAs therefore carry a
//! donor in the Sirius shape only, with no certificate provider or attorneys.
//!
//! This module provides:
//! - Closed enumerations for status, actor role and person type, so
//!   unrecognised values are rejected at the boundary with fallible parsing
//!   instead of leaking loose strings into the core
//! - A strict wire model for the combined payload
//! - Translation from the wire model into the domain [`LpaRecord`]

use crate::identity::{LpaStoreActor, PersonIdentity, RawActorRecord, SiriusActor};
use crate::{IdCheckError, IdCheckResult};
use idcheck_types::LpaUid;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Closed enumerations
// ============================================================================

/// Lifecycle status of an LPA, as reported upstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LpaStatus {
    Draft,
    InProgress,
    StatutoryWaitingPeriod,
    DoNotRegister,
    Registered,
    Suspended,
    Expired,
    CannotRegister,
    Cancelled,
    DeRegistered,
}

impl LpaStatus {
    /// The wire spelling used by the upstream APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            LpaStatus::Draft => "draft",
            LpaStatus::InProgress => "in-progress",
            LpaStatus::StatutoryWaitingPeriod => "statutory-waiting-period",
            LpaStatus::DoNotRegister => "do-not-register",
            LpaStatus::Registered => "registered",
            LpaStatus::Suspended => "suspended",
            LpaStatus::Expired => "expired",
            LpaStatus::CannotRegister => "cannot-register",
            LpaStatus::Cancelled => "cancelled",
            LpaStatus::DeRegistered => "de-registered",
        }
    }

    /// Human-readable wording for block messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            LpaStatus::Draft => "Draft",
            LpaStatus::InProgress => "In progress",
            LpaStatus::StatutoryWaitingPeriod => "Statutory waiting period",
            LpaStatus::DoNotRegister => "Do not register",
            LpaStatus::Registered => "Registered",
            LpaStatus::Suspended => "Suspended",
            LpaStatus::Expired => "Expired",
            LpaStatus::CannotRegister => "Cannot register",
            LpaStatus::Cancelled => "Cancelled",
            LpaStatus::DeRegistered => "De-registered",
        }
    }
}

impl fmt::Display for LpaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LpaStatus {
    type Err = IdCheckError;

    /// Parse an upstream status value.
    ///
    /// An unrecognised value is a contract break with the upstream data
    /// source: it returns [`IdCheckError::UnknownLpaStatus`], which callers
    /// must propagate rather than recover from.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "draft" => Ok(LpaStatus::Draft),
            "in-progress" => Ok(LpaStatus::InProgress),
            "statutory-waiting-period" => Ok(LpaStatus::StatutoryWaitingPeriod),
            "do-not-register" => Ok(LpaStatus::DoNotRegister),
            "registered" => Ok(LpaStatus::Registered),
            "suspended" => Ok(LpaStatus::Suspended),
            "expired" => Ok(LpaStatus::Expired),
            "cannot-register" => Ok(LpaStatus::CannotRegister),
            "cancelled" => Ok(LpaStatus::Cancelled),
            "de-registered" => Ok(LpaStatus::DeRegistered),
            other => Err(IdCheckError::UnknownLpaStatus(other.to_owned())),
        }
    }
}

/// Why a name/date-of-birth collision occurred: which role on the LPA the
/// matched actor holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActorRole {
    Donor,
    CertificateProvider,
    Attorney,
    ReplacementAttorney,
}

impl ActorRole {
    pub fn display_name(&self) -> &'static str {
        match self {
            ActorRole::Donor => "donor",
            ActorRole::CertificateProvider => "certificate provider",
            ActorRole::Attorney => "attorney",
            ActorRole::ReplacementAttorney => "replacement attorney",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Who is undergoing the identity check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersonType {
    Donor,
    CertificateProvider,
    Voucher,
}

// ============================================================================
// Domain record
// ============================================================================

/// An attorney appointment on an LPA.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attorney {
    pub person: PersonIdentity,
    pub is_replacement: bool,
    /// Removed attorneys stay in the record for audit but are excluded from
    /// matching entirely.
    pub is_removed: bool,
}

impl Attorney {
    pub fn role(&self) -> ActorRole {
        if self.is_replacement {
            ActorRole::ReplacementAttorney
        } else {
            ActorRole::Attorney
        }
    }
}

/// The LPA-store actor set. Absent for draft LPAs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LpaStoreActors {
    pub donor: PersonIdentity,
    pub certificate_provider: PersonIdentity,
    pub attorneys: Vec<Attorney>,
}

/// One LPA attached to an identity-check case, fully normalised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LpaRecord {
    pub uid: LpaUid,
    pub status: LpaStatus,
    /// The donor as known to case management. Always present.
    pub sirius_donor: PersonIdentity,
    /// The richer actor set, present once the LPA has been submitted.
    pub store: Option<LpaStoreActors>,
}

impl LpaRecord {
    /// The best available donor identity: the LPA-store donor when the LPA
    /// has been submitted, otherwise the Sirius donor.
    pub fn donor(&self) -> &PersonIdentity {
        match &self.store {
            Some(actors) => &actors.donor,
            None => &self.sirius_donor,
        }
    }
}

// ============================================================================
// Wire model
// ============================================================================

/// Combined upstream payload for one LPA.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LpaRecordWire {
    #[serde(rename = "opg.poas.sirius")]
    pub sirius: SiriusLpaWire,
    #[serde(default, rename = "opg.poas.lpastore")]
    pub lpastore: Option<LpaStoreLpaWire>,
}

/// Case-management section: always present, light on detail.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SiriusLpaWire {
    #[serde(rename = "uId")]
    pub uid: LpaUid,
    #[serde(default)]
    pub status: Option<String>,
    pub donor: SiriusActor,
}

/// LPA-store section: present once the LPA has been submitted.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LpaStoreLpaWire {
    #[serde(default)]
    pub status: Option<String>,
    pub donor: LpaStoreActor,
    #[serde(rename = "certificateProvider")]
    pub certificate_provider: LpaStoreActor,
    #[serde(default)]
    pub attorneys: Vec<LpaStoreAttorneyWire>,
}

/// Attorney entry in the LPA-store section.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LpaStoreAttorneyWire {
    #[serde(flatten)]
    pub actor: LpaStoreActor,
    #[serde(default, rename = "appointmentType")]
    pub appointment_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl LpaRecordWire {
    /// Deserialise a combined payload from upstream JSON.
    pub fn from_json(raw: &str) -> IdCheckResult<Self> {
        serde_json::from_str(raw).map_err(IdCheckError::RecordDeserialization)
    }

    /// Translate the wire payload into a domain [`LpaRecord`].
    ///
    /// The LPA-store status takes precedence over the Sirius one when both
    /// sections carry a value.
    ///
    /// # Errors
    ///
    /// Returns [`IdCheckError::InvalidInput`] if neither section carries a
    /// status, or [`IdCheckError::UnknownLpaStatus`] if the status value is
    /// outside the known set.
    pub fn into_record(self) -> IdCheckResult<LpaRecord> {
        let raw_status = self
            .lpastore
            .as_ref()
            .and_then(|store| store.status.clone())
            .or_else(|| self.sirius.status.clone())
            .ok_or_else(|| {
                IdCheckError::InvalidInput(format!(
                    "LPA record {} carries no status",
                    self.sirius.uid
                ))
            })?;
        let status = raw_status.parse::<LpaStatus>()?;

        let sirius_donor =
            PersonIdentity::from_record(&RawActorRecord::Sirius(self.sirius.donor));

        let store = self.lpastore.map(|store| LpaStoreActors {
            donor: PersonIdentity::from_record(&RawActorRecord::LpaStore(store.donor)),
            certificate_provider: PersonIdentity::from_record(&RawActorRecord::LpaStore(
                store.certificate_provider,
            )),
            attorneys: store
                .attorneys
                .into_iter()
                .map(|attorney| Attorney {
                    person: PersonIdentity::from_record(&RawActorRecord::LpaStore(
                        attorney.actor,
                    )),
                    is_replacement: attorney
                        .appointment_type
                        .as_deref()
                        .map(|kind| kind.eq_ignore_ascii_case("replacement"))
                        .unwrap_or(false),
                    is_removed: attorney
                        .status
                        .as_deref()
                        .map(|status| status.eq_ignore_ascii_case("removed"))
                        .unwrap_or(false),
                })
                .collect(),
        });

        Ok(LpaRecord {
            uid: self.sirius.uid,
            status,
            sirius_donor,
            store,
        })
    }
}
