//! Identity matching against LPA actors.
//!
//! A voucher cannot vouch for themselves, and a claimed identity that
//! collides with someone already named on the LPA needs either blocking (the
//! donor) or an explicit confirmation (anyone else). This module decides
//! whether a claimed identity collides with an LPA's actors and, if so, which
//! role the colliding actor holds.
//!
//! Name/date-of-birth matching and address matching are deliberately
//! separate signals: only a name+DOB match is classified into a role, while
//! an address match is a plain boolean used to block vouching.

use crate::identity::{Address, PersonIdentity};
use crate::lpa::{ActorRole, LpaRecord};

/// A claimed identity that collided with an actor on the LPA.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchedActor {
    pub identity: PersonIdentity,
    pub role: ActorRole,
}

/// Candidates are checked in a fixed order: donor, certificate provider,
/// then attorneys in their input order. The first match wins and there is no
/// scoring, so this order decides which role is reported and must not change.
fn candidates(lpa: &LpaRecord) -> Vec<(ActorRole, &PersonIdentity)> {
    let mut out = Vec::new();
    match &lpa.store {
        Some(actors) => {
            out.push((ActorRole::Donor, &actors.donor));
            out.push((ActorRole::CertificateProvider, &actors.certificate_provider));
            for attorney in &actors.attorneys {
                if attorney.is_removed {
                    continue;
                }
                out.push((attorney.role(), &attorney.person));
            }
        }
        // Draft LPAs only expose the Sirius donor; other roles are
        // unavailable and skipped.
        None => out.push((ActorRole::Donor, &lpa.sirius_donor)),
    }
    out
}

fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn names_match(claimed: &PersonIdentity, candidate: &PersonIdentity) -> bool {
    !fold_name(&claimed.first_name).is_empty()
        && fold_name(&claimed.first_name) == fold_name(&candidate.first_name)
        && fold_name(&claimed.last_name) == fold_name(&candidate.last_name)
}

/// Check a claimed identity against an LPA's actors by name and date of
/// birth.
///
/// Names compare case-insensitively after trimming. When the claim carries a
/// date of birth, a candidate whose date of birth differs (or is unknown) is
/// not a match even if the names agree: supplying a disagreeing DOB proves
/// they are different people. A name-only match with no claim DOB is still
/// reported so the caller can warn the user.
pub fn check_name_dob_match(claimed: &PersonIdentity, lpa: &LpaRecord) -> Option<MatchedActor> {
    for (role, candidate) in candidates(lpa) {
        if !names_match(claimed, candidate) {
            continue;
        }
        if let Some(claimed_dob) = claimed.date_of_birth {
            if candidate.date_of_birth != Some(claimed_dob) {
                continue;
            }
        }
        tracing::debug!(role = %role, lpa = %lpa.uid, "claimed identity matches an LPA actor");
        return Some(MatchedActor {
            identity: candidate.clone(),
            role,
        });
    }
    None
}

fn fold_address_field(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Check a claimed address against the donor's address only.
///
/// Certificate providers and attorneys are not checked: only a donor/voucher
/// address clash is grounds for blocking. Comparison uses `line1` and
/// `postcode` only; town and country are not discriminating enough.
pub fn check_address_donor_match(claimed: &Address, lpa: &LpaRecord) -> bool {
    let Some(donor_address) = &lpa.donor().address else {
        return false;
    };

    !fold_address_field(&claimed.line1).is_empty()
        && fold_address_field(&claimed.line1) == fold_address_field(&donor_address.line1)
        && fold_address_field(&claimed.postcode) == fold_address_field(&donor_address.postcode)
}
