//! # geogate-engine — Access Decision Engine
//!
//! The decision side of geogate: given an [`AccessRequest`] and the
//! caller-supplied [`EvaluationFacts`], produce an [`AccessDecision`]
//! under the resolved jurisdiction's rules.
//!
//! - **Collaborators** ([`collaborators`]): The [`LocationResolver`] and
//!   [`VpnDetector`] trait boundaries. The engine performs no geolocation
//!   or VPN detection itself.
//!
//! - **Conditions** ([`conditions`]): Pure evaluation of restriction
//!   conditions and exemptions against request/user facts.
//!
//! - **Time windows** ([`timewindow`]): Recurring blackout-window matching
//!   with midnight wraparound, anchored in each window's IANA timezone.
//!
//! - **Restrictions** ([`restrictions`]): Content-rule and time-rule
//!   evaluation producing fired [`ContentRestriction`]s.
//!
//! - **Engine** ([`engine`]): The [`AccessEngine`] entry points — decision,
//!   admin update, and compliance reporting — with the VPN short-circuit
//!   and the fail-closed top-level wrapper.
//!
//! ## Fail-closed contract
//!
//! [`AccessEngine::check_access`] never returns an error. Any fault while
//! producing a decision — collaborator failure, collaborator timeout, rule
//! evaluation fault — is converted into a deny decision. A fault can never
//! leak as an allowed outcome.
//!
//! [`AccessRequest`]: geogate_core::AccessRequest
//! [`EvaluationFacts`]: geogate_core::EvaluationFacts
//! [`AccessDecision`]: geogate_core::AccessDecision
//! [`ContentRestriction`]: geogate_core::ContentRestriction

pub mod collaborators;
pub mod conditions;
pub mod engine;
pub mod error;
pub mod report;
pub mod restrictions;
pub mod timewindow;

// Re-export primary types for ergonomic imports.

pub use collaborators::{CollaboratorError, LocationResolver, VpnDetector};
pub use engine::{AccessEngine, EngineConfig};
pub use error::EngineError;
pub use report::{ComplianceReport, ReportPeriod, RuleCounts};
