//! # geogate-core — Identifiers & Decision Types
//!
//! Core vocabulary of the geogate access-control engine:
//!
//! - **Jurisdiction** ([`jurisdiction`]): Validated jurisdiction identifier
//!   newtype and the country/region compounding used for federated
//!   countries.
//!
//! - **Request** ([`request`]): The immutable [`AccessRequest`], the closed
//!   [`ContentType`] / [`RequestedAction`] categories, and the
//!   [`EvaluationFacts`] a caller supplies about the requesting user.
//!
//! - **Decision** ([`decision`]): The [`AccessDecision`] output with its
//!   restrictions, warnings, and appeal options, plus the canned decisions
//!   (VPN deny, unknown-jurisdiction default, fail-closed deny).
//!
//! - **Error** ([`error`]): Validation errors for core identifiers.

pub mod decision;
pub mod error;
pub mod jurisdiction;
pub mod request;

// Re-export primary types for ergonomic imports.

pub use decision::{
    AccessDecision, AppealKind, AppealOption, ContentRestriction, RestrictionType, Severity,
};
pub use error::ValidationError;
pub use jurisdiction::JurisdictionId;
pub use request::{
    AccessRequest, ContentType, EvaluationFacts, RequestedAction, ResolvedLocation,
    VerificationStatus, VpnDetection,
};
