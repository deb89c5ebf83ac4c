//! # Jurisdiction Identifiers
//!
//! Newtype for jurisdiction identifiers — the fundamental addressing
//! primitive of the engine. A jurisdiction identifies a legal-authority
//! scope: a country ("DE"), or a country plus region for federated
//! countries ("US-TX").
//!
//! ## Validation
//!
//! [`JurisdictionId`] is validated to be non-empty at construction time.
//! Beyond non-emptiness no format is imposed, because the identifier is a
//! lookup key only — it does not imply that rules exist for it.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::request::ResolvedLocation;

/// Countries where regional law overrides national law for content access,
/// so the region becomes part of the jurisdiction identifier.
const FEDERATED_COUNTRIES: &[&str] = &["US", "CA"];

/// Identifier used when the origin location could not be resolved.
pub const UNKNOWN_JURISDICTION: &str = "unknown";

// -- Validating Deserialize for JurisdictionId --------------------------------

impl<'de> Deserialize<'de> for JurisdictionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// A jurisdiction identifier, typically an ISO 3166-1 country code or a
/// `country-region` compound (e.g. "US-TX" for Texas).
///
/// # Validation
///
/// Must be a non-empty string. The identifier is a rule-store lookup key;
/// whether any rules are registered under it is a separate question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct JurisdictionId(String);

impl JurisdictionId {
    /// Create a jurisdiction identifier from a string, validating
    /// non-emptiness.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidJurisdictionId`] if the string is
    /// empty or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidJurisdictionId);
        }
        Ok(Self(trimmed))
    }

    /// The identifier for an unresolvable origin.
    pub fn unknown() -> Self {
        Self(UNKNOWN_JURISDICTION.to_string())
    }

    /// Derive the jurisdiction identifier for a resolved location.
    ///
    /// `None` (resolution failure) maps to [`JurisdictionId::unknown`].
    /// Otherwise the base identifier is the country code; for federated
    /// countries (currently US and CA) with a known region, the identifier
    /// compounds to `country-region`.
    pub fn from_location(location: Option<&ResolvedLocation>) -> Self {
        let Some(location) = location else {
            return Self::unknown();
        };

        if let Some(region) = &location.region {
            if FEDERATED_COUNTRIES.contains(&location.country.as_str()) {
                return Self(format!("{}-{}", location.country, region));
            }
        }

        Self(location.country.clone())
    }

    /// Access the jurisdiction identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The country-only parent of a compound identifier, if this identifier
    /// has one ("US-TX" → "US"). `None` for plain country identifiers.
    pub fn parent(&self) -> Option<Self> {
        let (country, _) = self.0.split_once('-')?;
        Some(Self(country.to_string()))
    }
}

impl std::fmt::Display for JurisdictionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
