//! # Access Decisions
//!
//! Output types of the engine: the [`AccessDecision`] with its fired
//! [`ContentRestriction`]s, synthesized warnings, and [`AppealOption`]s,
//! plus constructors for the three canned decisions the engine returns
//! without rule evaluation (VPN deny, unknown-jurisdiction default,
//! fail-closed deny).
//!
//! ## Decision vs. enforcement
//!
//! `allowed` is `false` only when a restriction with [`Severity::Block`]
//! fired. Restrictions with any other severity (`age_gate`, `warning`,
//! `redirect`, `require_verification`) are **advisory**: the decision is
//! still "allowed", and the caller MUST inspect `restrictions` and enforce
//! them (gate behind verification, show the warning, perform the redirect)
//! before serving content. A caller that checks only `allowed` will serve
//! age-gated content without verification. This split is deliberate —
//! jurisdictions may mandate "allow with mandatory verification" rather
//! than an outright deny.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::jurisdiction::UNKNOWN_JURISDICTION;

// ---------------------------------------------------------------------------
// Restriction vocabulary
// ---------------------------------------------------------------------------

/// Semantic category of a fired restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionType {
    AgeGate,
    GeoBlock,
    TimeRestriction,
    ContentWarning,
    PaymentRestriction,
}

impl std::fmt::Display for RestrictionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::AgeGate => "age_gate",
            Self::GeoBlock => "geo_block",
            Self::TimeRestriction => "time_restriction",
            Self::ContentWarning => "content_warning",
            Self::PaymentRestriction => "payment_restriction",
        };
        write!(f, "{s}")
    }
}

/// Severity label of a fired restriction.
///
/// Only [`Severity::Block`] denies the request. Every other severity is
/// advisory and must be enforced by the caller (see the module docs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Access is denied outright.
    Block,
    /// Access requires the caller to gate behind age verification.
    AgeGate,
    /// Access proceeds with a content warning.
    Warning,
    /// Access should be redirected to an alternative.
    Redirect,
    /// Access requires identity verification (default-policy severity for
    /// unknown jurisdictions).
    RequireVerification,
}

impl Severity {
    /// Whether this severity denies the request.
    pub fn is_blocking(self) -> bool {
        matches!(self, Self::Block)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Block => "block",
            Self::AgeGate => "age_gate",
            Self::Warning => "warning",
            Self::Redirect => "redirect",
            Self::RequireVerification => "require_verification",
        };
        write!(f, "{s}")
    }
}

/// A single fired consequence of rule evaluation, carrying its severity and
/// legal justification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRestriction {
    /// Semantic category of the restriction.
    pub restriction_type: RestrictionType,
    /// Severity label. Only `block` denies; see the module docs.
    pub severity: Severity,
    /// Human-readable message suitable for display to the end user.
    pub message: String,
    /// Jurisdiction whose rule fired this restriction.
    pub jurisdiction: String,
    /// Human-readable citation of the legal basis for the restriction.
    pub legal_basis: String,
    /// When the restriction lapses, for recurring windows (next end of the
    /// blackout window for time restrictions).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Appeal options
// ---------------------------------------------------------------------------

/// Remediation path offered to a denied caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppealKind {
    ManualReview,
    AgeVerification,
    VpnDisable,
    LegalContact,
}

/// A caller-facing remediation path, generated only for denied decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppealOption {
    /// Kind of remediation.
    pub kind: AppealKind,
    /// Human-readable description of the remediation.
    pub description: String,
    /// Link to the remediation flow, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// ---------------------------------------------------------------------------
// AccessDecision
// ---------------------------------------------------------------------------

/// The engine's verdict for a single [`AccessRequest`](crate::AccessRequest).
///
/// # Invariant
///
/// `allowed == true` if and only if no element of `restrictions` has
/// [`Severity::Block`]. Non-block restrictions do not deny the request —
/// they are advisory and must be enforced by the caller (module docs).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessDecision {
    /// Unique identifier of this decision, for audit correlation.
    pub decision_id: Uuid,
    /// Whether the request may proceed. See the invariant above.
    pub allowed: bool,
    /// Fixed human-readable summary of the outcome.
    pub reason: String,
    /// Jurisdiction the decision was made under ("unknown" when the origin
    /// could not be resolved or evaluation failed).
    pub jurisdiction: String,
    /// Every restriction that fired, advisory ones included.
    pub restrictions: Vec<ContentRestriction>,
    /// Warnings synthesized from the jurisdiction's rule record.
    pub warnings: Vec<String>,
    /// Remediation paths; present only when `allowed` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appeal_options: Option<Vec<AppealOption>>,
}

impl AccessDecision {
    /// Compose a decision from fired restrictions, upholding the
    /// allow-iff-no-block invariant.
    pub fn from_restrictions(
        jurisdiction: String,
        restrictions: Vec<ContentRestriction>,
        warnings: Vec<String>,
        appeal_options: Vec<AppealOption>,
    ) -> Self {
        let allowed = !restrictions.iter().any(|r| r.severity.is_blocking());
        let reason = if allowed {
            "Access permitted with applicable restrictions"
        } else {
            "Access denied due to jurisdiction restrictions"
        };
        Self {
            decision_id: Uuid::new_v4(),
            allowed,
            reason: reason.to_string(),
            jurisdiction,
            restrictions,
            warnings,
            appeal_options: if allowed { None } else { Some(appeal_options) },
        }
    }

    /// The immediate deny returned when the VPN/proxy detector reports a
    /// hit. No jurisdiction logic has run, so the jurisdiction is unknown.
    pub fn vpn_denied() -> Self {
        Self {
            decision_id: Uuid::new_v4(),
            allowed: false,
            reason: "VPN usage detected. Please disable VPN and try again.".to_string(),
            jurisdiction: UNKNOWN_JURISDICTION.to_string(),
            restrictions: vec![ContentRestriction {
                restriction_type: RestrictionType::GeoBlock,
                severity: Severity::Block,
                message: "VPN or proxy usage is not permitted for age verification compliance"
                    .to_string(),
                jurisdiction: UNKNOWN_JURISDICTION.to_string(),
                legal_basis: "Age verification requirements".to_string(),
                expires_at: None,
            }],
            warnings: vec!["VPN detected".to_string()],
            appeal_options: Some(vec![AppealOption {
                kind: AppealKind::VpnDisable,
                description: "Disable VPN/proxy and retry access".to_string(),
                url: None,
            }]),
        }
    }

    /// The default permissive-with-warning policy applied when no rule
    /// record exists for the resolved jurisdiction.
    pub fn unknown_jurisdiction(jurisdiction: String) -> Self {
        Self {
            decision_id: Uuid::new_v4(),
            allowed: true,
            reason: "Unknown jurisdiction, applying default restrictions".to_string(),
            jurisdiction: jurisdiction.clone(),
            restrictions: vec![ContentRestriction {
                restriction_type: RestrictionType::AgeGate,
                severity: Severity::RequireVerification,
                message: "Age verification required".to_string(),
                jurisdiction,
                legal_basis: "Default safety measures".to_string(),
                expires_at: None,
            }],
            warnings: vec!["Unknown jurisdiction detected".to_string()],
            appeal_options: None,
        }
    }

    /// The fail-closed deny returned when any fault occurs while producing
    /// a decision. The engine never leaks a fault as an allowed outcome.
    pub fn fail_closed() -> Self {
        Self {
            decision_id: Uuid::new_v4(),
            allowed: false,
            reason: "Unable to verify jurisdiction compliance".to_string(),
            jurisdiction: UNKNOWN_JURISDICTION.to_string(),
            restrictions: vec![ContentRestriction {
                restriction_type: RestrictionType::GeoBlock,
                severity: Severity::Block,
                message: "Technical error during compliance check".to_string(),
                jurisdiction: UNKNOWN_JURISDICTION.to_string(),
                legal_basis: "Safety precaution".to_string(),
                expires_at: None,
            }],
            warnings: vec!["Technical error occurred".to_string()],
            appeal_options: Some(vec![AppealOption {
                kind: AppealKind::ManualReview,
                description: "Contact support for manual verification".to_string(),
                url: Some("/appeal-restriction".to_string()),
            }]),
        }
    }
}
