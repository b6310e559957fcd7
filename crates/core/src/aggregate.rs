//! Multi-LPA aggregation.
//!
//! One identity-check case can reference several LPAs. This module reduces
//! the per-LPA eligibility and identity-match outcomes into a single result
//! the controller layer can render: hard problems short-circuit, actor-match
//! warnings are collected for explicit confirmation, and the donor's display
//! details are pulled from whichever record supplies them.
//!
//! The reduce is synchronous and deterministic. Records are assumed already
//! fetched by the caller; network failures are the caller's concern.

use crate::eligibility;
use crate::identity::{Address, PersonIdentity};
use crate::lpa::{ActorRole, LpaRecord, LpaStatus, PersonType};
use crate::matching;
use crate::IdCheckResult;
use chrono::NaiveDate;
use idcheck_types::LpaUid;

pub const MSG_NO_LPA: &str = "No LPA Found.";
pub const MSG_ALREADY_ADDED: &str =
    "This LPA has already been added to this identity check.";
pub const MSG_ALL_INELIGIBLE: &str =
    "These LPAs cannot be added, LPAs need to be in the In progress status";
pub const MSG_ACTOR_MATCHES: &str =
    "These LPAs cannot be added, voucher details match with actors.";

/// Aggregate warning tag set when a non-blocking actor match needs explicit
/// confirmation from the user.
pub const WARNING_ACTOR_MATCH: &str = "actor-match";

/// The identity-check case the LPAs are being added to.
#[derive(Clone, Debug)]
pub struct CaseDetails {
    /// Who is undergoing the check.
    pub person_type: PersonType,
    /// The claimed identity to vet against each LPA's actors.
    pub claimed: PersonIdentity,
    /// LPAs already attached to this case.
    pub lpas: Vec<LpaUid>,
}

/// A supplementary display row (matched actor details and the like).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdditionalRow {
    pub row_type: String,
    pub value: String,
}

/// Outcome for one LPA within the aggregate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PerLpaResult {
    pub uid: LpaUid,
    pub status: LpaStatus,
    pub eligible: bool,
    pub error: bool,
    pub warning: bool,
    pub message: String,
    pub matched_role: Option<ActorRole>,
}

/// The reduced, render-ready result for a whole case. Built once per request
/// and never persisted.
#[derive(Clone, Debug, Default)]
pub struct AggregateLpaResult {
    /// Number of eligible LPAs.
    pub lpas_count: usize,
    /// A hard, non-confirmable problem (nothing can be added).
    pub problem: bool,
    /// A blocking actor match (donor collision).
    pub error: bool,
    /// Warning tag when a confirmable actor match was found.
    pub warning: String,
    pub message: String,
    pub additional_rows: Vec<AdditionalRow>,
    pub donor_name: String,
    pub donor_dob: Option<NaiveDate>,
    pub donor_address: Option<Address>,
    pub lpas: Vec<PerLpaResult>,
}

impl AggregateLpaResult {
    fn problem(message: impl Into<String>) -> Self {
        Self {
            problem: true,
            message: message.into(),
            ..Self::default()
        }
    }
}

fn donor_match_message(lpa: &LpaRecord) -> String {
    format!(
        "{} cannot be added as the person vouching has the same name and date of birth as the donor",
        lpa.uid
    )
}

fn actor_warning_message(role: ActorRole, matched_name: &str) -> String {
    format!(
        "There is a {} called {} named on this LPA. Confirm that these are different people before continuing.",
        role, matched_name
    )
}

fn role_row_type(role: ActorRole) -> String {
    let mut label = role.display_name().to_owned();
    if let Some(first) = label.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    label
}

/// Reduce a case's LPA records into one aggregate decision.
///
/// Hard problems (no LPAs, a duplicate, everything ineligible) short-circuit
/// with a `problem` result. A donor match is a blocking `error`; any other
/// actor match is a confirmable warning. Otherwise the full per-LPA breakdown
/// plus the donor's display details are returned.
///
/// # Errors
///
/// This reduce itself never fails: unknown status values are rejected
/// earlier, when the records are translated from the wire.
pub fn process_lpas(
    records: &[LpaRecord],
    case: &CaseDetails,
) -> IdCheckResult<AggregateLpaResult> {
    if records.is_empty() {
        tracing::debug!("no LPA records supplied");
        return Ok(AggregateLpaResult::problem(MSG_NO_LPA));
    }

    // Duplicate detection runs before any status or match checks.
    if records.iter().any(|record| case.lpas.contains(&record.uid)) {
        tracing::debug!("LPA already attached to this case");
        return Ok(AggregateLpaResult::problem(MSG_ALREADY_ADDED));
    }

    let mut per_lpa = Vec::with_capacity(records.len());
    let mut eligible = Vec::new();
    for record in records {
        let outcome = eligibility::check(record.status, case.person_type);
        if outcome.startable {
            eligible.push(record);
            per_lpa.push(PerLpaResult {
                uid: record.uid.clone(),
                status: record.status,
                eligible: true,
                error: false,
                warning: false,
                message: String::new(),
                matched_role: None,
            });
        } else {
            per_lpa.push(PerLpaResult {
                uid: record.uid.clone(),
                status: record.status,
                eligible: false,
                error: false,
                warning: false,
                message: outcome.block_reason.unwrap_or_default(),
                matched_role: None,
            });
        }
    }

    if eligible.is_empty() {
        let message = if per_lpa.len() == 1 {
            per_lpa[0].message.clone()
        } else {
            MSG_ALL_INELIGIBLE.to_owned()
        };
        tracing::debug!(count = per_lpa.len(), "all LPAs ineligible");
        let mut result = AggregateLpaResult::problem(message);
        result.lpas = per_lpa;
        return Ok(result);
    }

    // Vet the claimed identity against each eligible LPA's actors.
    let mut error_count = 0usize;
    let mut warning_found = false;
    let mut additional_rows = Vec::new();
    for &record in &eligible {
        let Some(matched) = matching::check_name_dob_match(&case.claimed, record) else {
            continue;
        };
        let entry = per_lpa
            .iter_mut()
            .find(|entry| entry.uid == record.uid)
            .expect("every eligible record has a per-LPA entry");
        entry.matched_role = Some(matched.role);
        match matched.role {
            ActorRole::Donor => {
                entry.error = true;
                entry.message = donor_match_message(record);
                error_count += 1;
            }
            role => {
                entry.warning = true;
                entry.message = actor_warning_message(role, &matched.identity.display_name());
                warning_found = true;
                additional_rows.push(AdditionalRow {
                    row_type: role_row_type(role),
                    value: matched.identity.display_name(),
                });
            }
        }
    }

    if error_count > 0 {
        // The generic wording is only used when several LPAs are in error;
        // a single erroring LPA surfaces its own message directly.
        let message = if error_count > 1 {
            MSG_ACTOR_MATCHES.to_owned()
        } else {
            per_lpa
                .iter()
                .find(|entry| entry.error)
                .map(|entry| entry.message.clone())
                .unwrap_or_else(|| MSG_ACTOR_MATCHES.to_owned())
        };
        tracing::debug!(errors = error_count, "claimed identity matches a donor");
        return Ok(AggregateLpaResult {
            lpas_count: eligible.len(),
            error: true,
            message,
            lpas: per_lpa,
            ..AggregateLpaResult::default()
        });
    }

    // Donor display data: first record that supplies each field wins.
    let donor_name = eligible
        .iter()
        .map(|record| record.donor().display_name())
        .find(|name| !name.is_empty())
        .unwrap_or_default();
    let donor_dob = eligible
        .iter()
        .find_map(|record| record.donor().date_of_birth);
    let donor_address = eligible
        .iter()
        .find_map(|record| record.donor().address.clone());

    Ok(AggregateLpaResult {
        lpas_count: eligible.len(),
        warning: if warning_found {
            WARNING_ACTOR_MATCH.to_owned()
        } else {
            String::new()
        },
        additional_rows,
        donor_name,
        donor_dob,
        donor_address,
        lpas: per_lpa,
        ..AggregateLpaResult::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::{MSG_ALREADY_COMPLETED, MSG_NOT_YET_SUBMITTED};
    use crate::lpa::{Attorney, LpaStoreActors};

    fn person(first: &str, last: &str, dob: Option<(i32, u32, u32)>) -> PersonIdentity {
        PersonIdentity {
            first_name: first.into(),
            last_name: last.into(),
            date_of_birth: dob.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            address: None,
        }
    }

    fn record(uid: &str, status: LpaStatus) -> LpaRecord {
        let mut donor = person("Daphne", "Donor", Some((1950, 2, 1)));
        donor.address = Some(Address {
            line1: "2 Elm Close".into(),
            town: "Leeds".into(),
            postcode: "LS1 4AP".into(),
            country: "GBR".into(),
            ..Address::default()
        });
        LpaRecord {
            uid: LpaUid::parse(uid).expect("valid uid"),
            status,
            sirius_donor: person("Daphne", "Donor", Some((1950, 2, 1))),
            store: Some(LpaStoreActors {
                donor,
                certificate_provider: person("Carl", "Certifier", Some((1972, 6, 15))),
                attorneys: vec![Attorney {
                    person: person("Alice", "Acting", Some((1980, 1, 1))),
                    is_replacement: false,
                    is_removed: false,
                }],
            }),
        }
    }

    fn voucher_case(claimed: PersonIdentity) -> CaseDetails {
        CaseDetails {
            person_type: PersonType::Voucher,
            claimed,
            lpas: vec![],
        }
    }

    #[test]
    fn test_empty_input_is_a_problem() {
        let case = voucher_case(person("Victor", "Vouch", None));
        let result = process_lpas(&[], &case).expect("should reduce");
        assert!(result.problem);
        assert_eq!(result.message, MSG_NO_LPA);
    }

    #[test]
    fn test_duplicate_short_circuits_before_status_checks() {
        let mut case = voucher_case(person("Victor", "Vouch", None));
        case.lpas
            .push(LpaUid::parse("M-1111-1111-1111").expect("valid uid"));

        // The duplicate record carries an ineligible status; the duplicate
        // message must still win because it is checked first.
        let records = vec![record("M-1111-1111-1111", LpaStatus::Registered)];
        let result = process_lpas(&records, &case).expect("should reduce");
        assert!(result.problem);
        assert_eq!(result.message, MSG_ALREADY_ADDED);
        assert!(result.lpas.is_empty());
    }

    #[test]
    fn test_registered_lpa_blocked_with_completed_wording() {
        let case = voucher_case(person("Victor", "Vouch", None));
        let records = vec![record("M-1111-1111-1111", LpaStatus::Registered)];
        let result = process_lpas(&records, &case).expect("should reduce");
        assert!(result.problem);
        assert_eq!(result.message, MSG_ALREADY_COMPLETED);
    }

    #[test]
    fn test_draft_startable_for_donor_but_not_certificate_provider() {
        let records = vec![record("M-1111-1111-1111", LpaStatus::Draft)];

        let donor_case = CaseDetails {
            person_type: PersonType::Donor,
            claimed: person("Someone", "Else", None),
            lpas: vec![],
        };
        let result = process_lpas(&records, &donor_case).expect("should reduce");
        assert!(!result.problem);
        assert_eq!(result.lpas_count, 1);

        let cp_case = CaseDetails {
            person_type: PersonType::CertificateProvider,
            claimed: person("Someone", "Else", None),
            lpas: vec![],
        };
        let result = process_lpas(&records, &cp_case).expect("should reduce");
        assert!(result.problem);
        assert_eq!(result.message, MSG_NOT_YET_SUBMITTED);
    }

    #[test]
    fn test_multiple_ineligible_lpas_use_generic_message() {
        let case = voucher_case(person("Victor", "Vouch", None));
        let records = vec![
            record("M-1111-1111-1111", LpaStatus::Registered),
            record("M-2222-2222-2222", LpaStatus::Suspended),
        ];
        let result = process_lpas(&records, &case).expect("should reduce");
        assert!(result.problem);
        assert_eq!(result.message, MSG_ALL_INELIGIBLE);
        // The per-LPA breakdown still carries the specific reasons.
        assert_eq!(result.lpas.len(), 2);
        assert_eq!(result.lpas[0].message, MSG_ALREADY_COMPLETED);
        assert!(result.lpas[1].message.contains("Suspended"));
    }

    #[test]
    fn test_donor_match_is_a_blocking_error() {
        let case = voucher_case(person("Daphne", "Donor", Some((1950, 2, 1))));
        let records = vec![record("M-1111-1111-1111", LpaStatus::InProgress)];
        let result = process_lpas(&records, &case).expect("should reduce");

        assert!(result.error);
        assert!(!result.problem);
        assert!(result.message.contains("M-1111-1111-1111"));
        assert!(result.message.contains("same name and date of birth as the donor"));
        assert_eq!(result.lpas[0].matched_role, Some(ActorRole::Donor));
    }

    #[test]
    fn test_single_error_among_multiple_eligible_uses_specific_message() {
        let case = voucher_case(person("Daphne", "Donor", Some((1950, 2, 1))));
        let mut clean = record("M-2222-2222-2222", LpaStatus::InProgress);
        // Second LPA has a different donor, so only the first collides.
        clean.store.as_mut().expect("store present").donor =
            person("Derek", "Different", Some((1940, 1, 1)));
        clean.sirius_donor = person("Derek", "Different", Some((1940, 1, 1)));

        let records = vec![record("M-1111-1111-1111", LpaStatus::InProgress), clean];
        let result = process_lpas(&records, &case).expect("should reduce");

        assert!(result.error);
        // Only one LPA is in error, so its specific message is surfaced,
        // not the generic multi-LPA wording.
        assert!(result.message.contains("M-1111-1111-1111"));
        assert_ne!(result.message, MSG_ACTOR_MATCHES);
    }

    #[test]
    fn test_multiple_errors_use_generic_message() {
        let case = voucher_case(person("Daphne", "Donor", Some((1950, 2, 1))));
        let records = vec![
            record("M-1111-1111-1111", LpaStatus::InProgress),
            record("M-2222-2222-2222", LpaStatus::InProgress),
        ];
        let result = process_lpas(&records, &case).expect("should reduce");

        assert!(result.error);
        assert_eq!(result.message, MSG_ACTOR_MATCHES);
    }

    #[test]
    fn test_error_on_sole_eligible_lpa_uses_its_specific_message() {
        // Two records, but one is ineligible; the sole eligible LPA's
        // donor-match message is surfaced directly.
        let case = voucher_case(person("Daphne", "Donor", Some((1950, 2, 1))));
        let records = vec![
            record("M-1111-1111-1111", LpaStatus::InProgress),
            record("M-2222-2222-2222", LpaStatus::Registered),
        ];
        let result = process_lpas(&records, &case).expect("should reduce");

        assert!(result.error);
        assert!(result.message.contains("M-1111-1111-1111"));
    }

    #[test]
    fn test_certificate_provider_match_is_a_confirmable_warning() {
        let case = voucher_case(person("CARL", "certifier", None));
        let records = vec![record("M-1111-1111-1111", LpaStatus::InProgress)];
        let result = process_lpas(&records, &case).expect("should reduce");

        assert!(!result.problem);
        assert!(!result.error);
        assert_eq!(result.warning, WARNING_ACTOR_MATCH);
        assert_eq!(result.lpas[0].matched_role, Some(ActorRole::CertificateProvider));
        assert_eq!(
            result.additional_rows,
            vec![AdditionalRow {
                row_type: "Certificate provider".into(),
                value: "Carl Certifier".into(),
            }]
        );
    }

    #[test]
    fn test_clean_case_returns_donor_display_data() {
        let case = voucher_case(person("Victor", "Vouch", None));
        let records = vec![
            record("M-1111-1111-1111", LpaStatus::InProgress),
            record("M-2222-2222-2222", LpaStatus::StatutoryWaitingPeriod),
        ];
        let result = process_lpas(&records, &case).expect("should reduce");

        assert!(!result.problem);
        assert!(!result.error);
        assert_eq!(result.warning, "");
        assert_eq!(result.lpas_count, 2);
        assert_eq!(result.donor_name, "Daphne Donor");
        assert_eq!(result.donor_dob, NaiveDate::from_ymd_opt(1950, 2, 1));
        assert_eq!(
            result.donor_address.expect("donor address present").line1,
            "2 Elm Close"
        );
        assert!(result.lpas.iter().all(|entry| entry.eligible));
    }

    #[test]
    fn test_mixed_eligibility_counts_only_eligible_lpas() {
        let case = voucher_case(person("Victor", "Vouch", None));
        let records = vec![
            record("M-1111-1111-1111", LpaStatus::InProgress),
            record("M-2222-2222-2222", LpaStatus::Cancelled),
        ];
        let result = process_lpas(&records, &case).expect("should reduce");

        assert!(!result.problem);
        assert_eq!(result.lpas_count, 1);
        let ineligible = result
            .lpas
            .iter()
            .find(|entry| !entry.eligible)
            .expect("one ineligible entry");
        assert!(ineligible.message.contains("Cancelled"));
    }
}
