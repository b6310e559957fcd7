//! Validated primitive types shared across the identity-check workspace.
//!
//! LPA case references arrive from outside the core (form input, upstream API
//! payloads) as strings. To keep comparisons and duplicate detection
//! deterministic, the core works with a *canonical* representation: the
//! `M-XXXX-XXXX-XXXX` form, uppercase throughout.
//!
//! This crate provides:
//! - A wrapper type ([`LpaUid`]) that *guarantees* the canonical format once
//!   constructed.
//!
//! ## Canonical LPA UID form
//! - Literal `M`, then three groups of four characters, separated by hyphens
//! - Group characters: `0-9` and `A-Z` only
//! - Example: `M-1234-ABCD-5678`
//!
//! Notes:
//! - Canonical form is *required* for externally supplied references. Use
//!   [`LpaUid::parse`] to validate an input string.
//! - Non-canonical values (lowercase, missing hyphens, wrong group lengths)
//!   are rejected rather than normalised.

use std::fmt;
use std::str::FromStr;

/// Error type for validated-type construction.
#[derive(Debug, thiserror::Error)]
pub enum TypesError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for validated-type operations.
pub type TypesResult<T> = Result<T, TypesError>;

/// An LPA case reference in canonical `M-XXXX-XXXX-XXXX` form.
///
/// Once constructed, the contained reference is guaranteed canonical, so it
/// can be compared byte-for-byte for duplicate detection and used directly in
/// upstream API paths.
///
/// # Construction
/// [`LpaUid::parse`] validates an externally supplied reference. There is no
/// constructor that skips validation.
///
/// # Errors
/// [`LpaUid::parse`] returns [`TypesError::InvalidInput`] if the input is not
/// already canonical.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LpaUid(String);

impl LpaUid {
    /// Validates and wraps an LPA reference that must already be canonical.
    ///
    /// This does **not** normalise other spellings (for example, lowercase or
    /// unhyphenated input). Callers must provide the canonical representation.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::InvalidInput`] if `input` is not in canonical form.
    pub fn parse(input: &str) -> TypesResult<Self> {
        if Self::is_canonical(input) {
            return Ok(Self(input.to_owned()));
        }
        Err(TypesError::InvalidInput(format!(
            "LPA reference must be in the form M-XXXX-XXXX-XXXX, got: '{}'",
            input
        )))
    }

    /// Returns true if `input` is in canonical LPA reference form.
    ///
    /// Purely syntactic: `M`, then three hyphen-separated groups of four
    /// uppercase alphanumeric characters.
    pub fn is_canonical(input: &str) -> bool {
        let mut parts = input.split('-');
        if parts.next() != Some("M") {
            return false;
        }
        let mut groups = 0;
        for group in parts {
            if group.len() != 4
                || !group.bytes().all(|b| matches!(b, b'0'..=b'9' | b'A'..=b'Z'))
            {
                return false;
            }
            groups += 1;
        }
        groups == 3
    }

    /// Returns the canonical reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LpaUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for LpaUid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for LpaUid {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for LpaUid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for LpaUid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LpaUid::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_canonical_reference() {
        let uid = LpaUid::parse("M-1234-ABCD-5678").expect("canonical reference should parse");
        assert_eq!(uid.as_str(), "M-1234-ABCD-5678");
        assert_eq!(uid.to_string(), "M-1234-ABCD-5678");
    }

    #[test]
    fn test_parse_rejects_lowercase() {
        let err = LpaUid::parse("m-1234-abcd-5678").expect_err("should reject lowercase");
        assert!(matches!(err, TypesError::InvalidInput(msg) if msg.contains("M-XXXX-XXXX-XXXX")));
    }

    #[test]
    fn test_parse_rejects_wrong_prefix() {
        assert!(LpaUid::parse("A-1234-ABCD-5678").is_err());
        assert!(LpaUid::parse("1234-ABCD-5678").is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_group_shape() {
        assert!(LpaUid::parse("M-123-ABCD-5678").is_err());
        assert!(LpaUid::parse("M-1234-ABCD").is_err());
        assert!(LpaUid::parse("M-1234-ABCD-5678-9012").is_err());
        assert!(LpaUid::parse("M-1234-AB?D-5678").is_err());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(LpaUid::parse("").is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let uid = LpaUid::parse("M-0000-1111-2222").expect("should parse");
        let json = serde_json::to_string(&uid).expect("should serialise");
        assert_eq!(json, "\"M-0000-1111-2222\"");
        let back: LpaUid = serde_json::from_str(&json).expect("should deserialise");
        assert_eq!(back, uid);
    }

    #[test]
    fn test_deserialize_rejects_non_canonical() {
        let result: Result<LpaUid, _> = serde_json::from_str("\"M-12-34\"");
        assert!(result.is_err());
    }
}
