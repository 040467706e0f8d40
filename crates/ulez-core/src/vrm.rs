//! # Registration Mark Newtype
//!
//! [`Vrm`] is the normalized vehicle registration mark used as the lookup
//! key everywhere downstream — the cache, the upstream client, and the
//! heuristic all receive a `Vrm`, never a raw string.
//!
//! ## Validation
//!
//! Normalization trims surrounding whitespace, removes embedded spaces,
//! and uppercases. The normalized mark must be 2–8 characters; no
//! character-set validation beyond the length bounds is performed, so
//! personalized and pre-2001 plates pass through untouched.

use serde::{Deserialize, Serialize};

/// Minimum length of a normalized registration mark.
pub const MIN_LEN: usize = 2;
/// Maximum length of a normalized registration mark.
pub const MAX_LEN: usize = 8;

/// Registration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VrmError {
    /// The normalized registration is outside the 2–8 character bounds.
    #[error("Invalid registration format")]
    InvalidFormat,
}

/// A normalized vehicle registration mark: trimmed, uppercased, no spaces,
/// 2–8 characters. Valid by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Vrm(String);

impl Vrm {
    /// Normalize a raw registration and validate its length.
    ///
    /// Trims whitespace, strips embedded spaces, uppercases, then rejects
    /// anything shorter than 2 or longer than 8 characters.
    pub fn normalize(raw: &str) -> Result<Self, VrmError> {
        let cleaned: String = raw.trim().replace(' ', "").to_uppercase();
        let len = cleaned.chars().count();
        if len < MIN_LEN || len > MAX_LEN {
            return Err(VrmError::InvalidFormat);
        }
        Ok(Self(cleaned))
    }

    /// Access the normalized registration string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Vrm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Vrm {
    type Err = VrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

/// Deserializes as a plain `String`, then routes through [`Vrm::normalize`]
/// so invalid marks are rejected at deserialization time rather than
/// silently accepted.
impl<'de> Deserialize<'de> for Vrm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::normalize(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn normalizes_case_and_spaces() {
        let vrm = Vrm::normalize("  ab12 cde ").unwrap();
        assert_eq!(vrm.as_str(), "AB12CDE");
    }

    #[test]
    fn rejects_too_short() {
        assert_eq!(Vrm::normalize("A"), Err(VrmError::InvalidFormat));
        assert_eq!(Vrm::normalize(""), Err(VrmError::InvalidFormat));
        // Whitespace-only normalizes to empty.
        assert_eq!(Vrm::normalize("   "), Err(VrmError::InvalidFormat));
    }

    #[test]
    fn rejects_too_long() {
        assert_eq!(Vrm::normalize("ABCD12345"), Err(VrmError::InvalidFormat));
        // Embedded spaces are stripped before the length check.
        assert!(Vrm::normalize("AB CD 1234").is_ok());
    }

    #[test]
    fn accepts_bounds() {
        assert_eq!(Vrm::normalize("XY").unwrap().as_str(), "XY");
        assert_eq!(Vrm::normalize("AB12CDEF").unwrap().as_str(), "AB12CDEF");
    }

    #[test]
    fn no_character_set_validation() {
        // Any string within the length bounds passes downstream.
        assert!(Vrm::normalize("!!##").is_ok());
    }

    #[test]
    fn deserialize_normalizes() {
        let vrm: Vrm = serde_json::from_str("\"ab12 cde\"").unwrap();
        assert_eq!(vrm.as_str(), "AB12CDE");
        assert!(serde_json::from_str::<Vrm>("\"x\"").is_err());
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(raw in "\\PC{0,12}") {
            if let Ok(vrm) = Vrm::normalize(&raw) {
                let again = Vrm::normalize(vrm.as_str()).unwrap();
                prop_assert_eq!(vrm, again);
            }
        }

        #[test]
        fn normalized_length_within_bounds(raw in "\\PC{0,12}") {
            if let Ok(vrm) = Vrm::normalize(&raw) {
                let len = vrm.as_str().chars().count();
                prop_assert!((MIN_LEN..=MAX_LEN).contains(&len));
                prop_assert!(!vrm.as_str().contains(' '));
            }
        }
    }
}
