//! # geogate-rules — Jurisdiction Rule Model & Store
//!
//! The rule side of the geogate engine:
//!
//! - **Model** ([`model`]): [`JurisdictionRule`] and its parts — content
//!   restriction rules with condition conjunctions and exemption
//!   disjunctions, recurring time-of-day blackout windows, and the
//!   descriptive metadata (age requirements, payment restrictions, legal
//!   contacts) surfaced in decisions and reports. Condition kind/operator
//!   pairs are closed enums checked for compatibility at validation time.
//!
//! - **Store** ([`store`]): The shared, read-mostly [`RuleStore`]. Records
//!   are held as `Arc<JurisdictionRule>` and replaced wholesale, so a
//!   concurrent reader never observes a partially-updated record.
//!
//! - **Registry** ([`registry`]): The static seed table of jurisdictions
//!   the store starts from.
//!
//! - **Error** ([`error`]): Errors for the admin and reporting paths.

pub mod error;
pub mod model;
pub mod registry;
pub mod store;

// Re-export primary types for ergonomic imports.

pub use error::{RuleError, RuleValidationError};
pub use model::{
    AgeRequirement, ConditionKind, ConditionOperator, ContentRestrictionRule, Exemption,
    ExemptionKind, JurisdictionRule, LegalContact, LegalContactKind, PaymentRestriction,
    RestrictionAction, RestrictionCondition, TimeRestriction,
};
pub use registry::jurisdiction_registry;
pub use store::RuleStore;
