//! Country/document reference data.
//!
//! Which identity documents can be accepted depends on the issuing country:
//! some countries have no national identity card, some card formats are only
//! accepted from the date a machine-readable format was introduced, and some
//! documents are not guaranteed to carry Latin-script details (which rules
//! out automated checking routes).
//!
//! This module provides:
//! - A strict wire model for the on-disk YAML reference table
//! - [`DocumentStore`], loaded once at startup and read-only thereafter
//! - Lookup by ISO-3166 alpha-3 country code
//!
//! An unknown country code is not an error: it simply offers no documents.

use crate::config::CoreConfig;
use crate::{IdCheckError, IdCheckResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;

/// The reference table compiled into the binary. Used unless `CoreConfig`
/// supplies an override path.
const EMBEDDED_TABLE: &str = include_str!("../data/documents.yaml");

/// A kind of identity document accepted for verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentKind {
    Passport,
    DrivingLicence,
    NationalId,
}

impl DocumentKind {
    /// The wire spelling used in the reference table and upstream APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Passport => "PASSPORT",
            DocumentKind::DrivingLicence => "DRIVING_LICENCE",
            DocumentKind::NationalId => "NATIONAL_ID",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One accepted document for a country.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedDocument {
    pub doc_type: DocumentKind,
    /// Whether the document's details are guaranteed Latin script only.
    pub is_strictly_latin: bool,
    /// Earliest issue date from which this document format is accepted.
    /// `None` means no date restriction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<NaiveDate>,
}

impl SupportedDocument {
    /// Whether a document issued on `issue_date` satisfies this entry's
    /// `valid_from` restriction.
    pub fn accepts_issue_date(&self, issue_date: NaiveDate) -> bool {
        match self.valid_from {
            Some(from) => issue_date >= from,
            None => true,
        }
    }
}

/// Read-only store of accepted documents per country.
#[derive(Clone, Debug)]
pub struct DocumentStore {
    countries: HashMap<String, Vec<SupportedDocument>>,
}

impl DocumentStore {
    /// Load the reference table.
    ///
    /// Uses the override file from `cfg` when one is configured, otherwise the
    /// embedded table.
    ///
    /// # Errors
    ///
    /// Returns [`IdCheckError::ReferenceDataRead`] if the override file cannot
    /// be read, or [`IdCheckError::ReferenceDataParse`] if either source is
    /// not a valid table. Both can only occur at startup.
    pub fn load(cfg: &CoreConfig) -> IdCheckResult<Self> {
        match cfg.document_data_path() {
            Some(path) => {
                tracing::debug!("loading document reference data from {}", path.display());
                let raw = fs::read_to_string(path).map_err(IdCheckError::ReferenceDataRead)?;
                Self::from_yaml(&raw)
            }
            None => Self::from_yaml(EMBEDDED_TABLE),
        }
    }

    /// Parse a reference table from YAML.
    ///
    /// Country codes are upper-cased on load so lookups are insensitive to the
    /// source file's casing.
    pub fn from_yaml(raw: &str) -> IdCheckResult<Self> {
        let parsed: HashMap<String, Vec<SupportedDocument>> =
            serde_yaml::from_str(raw).map_err(IdCheckError::ReferenceDataParse)?;

        let countries = parsed
            .into_iter()
            .map(|(code, docs)| (code.trim().to_uppercase(), docs))
            .collect();

        Ok(Self { countries })
    }

    /// Returns the documents accepted for `country_code` (ISO-3166 alpha-3).
    ///
    /// Unknown codes return an empty slice, never an error.
    pub fn documents_for(&self, country_code: &str) -> &[SupportedDocument] {
        self.countries
            .get(&country_code.trim().to_uppercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of countries in the table.
    pub fn country_count(&self) -> usize {
        self.countries.len()
    }
}
