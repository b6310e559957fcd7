//! # Identity-Check Core
//!
//! Core business logic for the LPA identity-verification workflow.
//!
//! This crate contains pure, request-scoped computations:
//! - Country/document reference data lookups
//! - Normalisation of the two upstream actor record shapes
//! - Matching a claimed identity against an LPA's actors
//! - Per-LPA eligibility classification and multi-LPA aggregation
//!
//! **No API concerns**: HTTP routing, sessions, rendering and the upstream
//! API clients belong in the service layer. Everything here operates on
//! already-fetched records, is side-effect free, and is deterministic:
//! identical inputs produce identical outputs.

pub mod aggregate;
pub mod config;
pub mod documents;
pub mod eligibility;
mod error;
pub mod identity;
pub mod lpa;
pub mod matching;

pub use error::{IdCheckError, IdCheckResult};

// Re-export the most commonly used types so service code can depend on the
// crate root.
pub use aggregate::{AggregateLpaResult, CaseDetails, PerLpaResult};
pub use config::CoreConfig;
pub use documents::{DocumentKind, DocumentStore, SupportedDocument};
pub use eligibility::EligibilityOutcome;
pub use identity::{Address, PersonIdentity, RawActorRecord};
pub use lpa::{ActorRole, LpaRecord, LpaRecordWire, LpaStatus, PersonType};
pub use matching::MatchedActor;

// Re-export the validated reference type from the types crate.
pub use idcheck_types::LpaUid;
