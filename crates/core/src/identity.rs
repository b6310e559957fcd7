//! Person and address normalisation.
//!
//! Actor records arrive in two differently-shaped upstream representations:
//! the case-management ("Sirius") shape with flat lowercase keys and
//! `DD/MM/YYYY` dates, and the LPA-store shape with camel-case keys, a nested
//! address object and ISO dates. Both are normalised into one canonical
//! [`PersonIdentity`] before any comparison happens.
//!
//! This module focuses on:
//! - Strict wire models for both upstream shapes
//! - A tagged union ([`RawActorRecord`]) so a record can never be read with
//!   the wrong shape's keys
//! - Best-effort normalisation: missing or malformed optional fields become
//!   empty strings or `None`, never an error

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Canonical domain types
// ============================================================================

/// A postal address in canonical shape.
///
/// Missing optional lines normalise to the empty string, never null, so that
/// comparison and rendering are stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    pub line2: String,
    pub line3: String,
    pub town: String,
    pub postcode: String,
    pub country: String,
}

impl Address {
    /// True when every field is empty, which is how a wholly absent upstream
    /// address normalises.
    pub fn is_empty(&self) -> bool {
        self.line1.is_empty()
            && self.line2.is_empty()
            && self.line3.is_empty()
            && self.town.is_empty()
            && self.postcode.is_empty()
            && self.country.is_empty()
    }
}

/// A person drawn from an LPA record or claimed by the person being checked.
///
/// Immutable once constructed. First and last names are kept separate for
/// matching; [`PersonIdentity::display_name`] joins them for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonIdentity {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<Address>,
}

impl PersonIdentity {
    /// Normalise a raw upstream record into a canonical identity.
    ///
    /// Never fails: absent or unparseable fields produce their empty/`None`
    /// representation so a best-effort partial identity is always available.
    pub fn from_record(record: &RawActorRecord) -> Self {
        match record {
            RawActorRecord::Sirius(actor) => Self {
                first_name: clean(&actor.firstname),
                last_name: clean(&actor.surname),
                date_of_birth: actor.dob.as_deref().and_then(parse_sirius_date),
                address: normalise_sirius_address(actor),
            },
            RawActorRecord::LpaStore(actor) => Self {
                first_name: clean(&actor.first_names),
                last_name: clean(&actor.last_name),
                date_of_birth: actor.date_of_birth.as_deref().and_then(parse_iso_date),
                address: actor.address.as_ref().map(normalise_store_address),
            },
        }
    }

    /// `"{first} {last}"` for display. Single-sided names render without a
    /// dangling space.
    pub fn display_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (true, true) => String::new(),
            (true, false) => self.last_name.clone(),
            (false, true) => self.first_name.clone(),
            (false, false) => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

// ============================================================================
// Wire models
// ============================================================================

/// A raw actor record tagged with its upstream shape.
///
/// Normalisation is an exhaustive match over this tag, which removes the
/// possibility of silently misreading a field from the wrong shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawActorRecord {
    Sirius(SiriusActor),
    LpaStore(LpaStoreActor),
}

/// Case-management ("Sirius") actor shape: flat lowercase keys, `DD/MM/YYYY`
/// dates, `addressLine1..3` address fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiriusActor {
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default, rename = "addressLine1")]
    pub address_line_1: Option<String>,
    #[serde(default, rename = "addressLine2")]
    pub address_line_2: Option<String>,
    #[serde(default, rename = "addressLine3")]
    pub address_line_3: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// LPA-store actor shape: camel-case keys, ISO dates, nested address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LpaStoreActor {
    #[serde(default, rename = "firstNames")]
    pub first_names: Option<String>,
    #[serde(default, rename = "lastName")]
    pub last_name: Option<String>,
    #[serde(default, rename = "dateOfBirth")]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub address: Option<LpaStoreAddress>,
}

/// Nested address object inside LPA-store actor records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LpaStoreAddress {
    #[serde(default)]
    pub line1: Option<String>,
    #[serde(default)]
    pub line2: Option<String>,
    #[serde(default)]
    pub line3: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

// ============================================================================
// Normalisation helpers
// ============================================================================

fn clean(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or("").to_owned()
}

/// Parse a `DD/MM/YYYY` date; anything else is `None`.
pub fn parse_sirius_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%d/%m/%Y").ok()
}

/// Parse a `YYYY-MM-DD` date; anything else is `None`.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn normalise_sirius_address(actor: &SiriusActor) -> Option<Address> {
    let address = Address {
        line1: clean(&actor.address_line_1),
        line2: clean(&actor.address_line_2),
        line3: clean(&actor.address_line_3),
        town: clean(&actor.town),
        postcode: clean(&actor.postcode),
        country: clean(&actor.country),
    };
    (!address.is_empty()).then_some(address)
}

fn normalise_store_address(raw: &LpaStoreAddress) -> Address {
    Address {
        line1: clean(&raw.line1),
        line2: clean(&raw.line2),
        line3: clean(&raw.line3),
        town: clean(&raw.town),
        postcode: clean(&raw.postcode),
        country: clean(&raw.country),
    }
}
