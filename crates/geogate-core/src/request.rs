//! # Access Requests & Evaluation Facts
//!
//! The immutable [`AccessRequest`] created per inbound call, the closed
//! content/action categories rules key off, and the [`EvaluationFacts`] a
//! caller supplies about the requesting user. The engine never looks up
//! user data itself — restriction conditions are evaluated purely against
//! the facts handed in with the request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Content categories
// ---------------------------------------------------------------------------

/// A closed category of content that jurisdiction rules key off.
///
/// Every `match` on `ContentType` is exhaustive — adding a ninth category
/// is a compile error until every evaluation path is updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    AdultVideo,
    AdultPhoto,
    AdultLive,
    AdultText,
    Educational,
    Artistic,
    News,
    General,
}

impl ContentType {
    /// All content categories, in declaration order.
    pub fn all() -> &'static [ContentType] {
        &[
            Self::AdultVideo,
            Self::AdultPhoto,
            Self::AdultLive,
            Self::AdultText,
            Self::Educational,
            Self::Artistic,
            Self::News,
            Self::General,
        ]
    }

    /// Whether this category is age-restricted adult content.
    pub fn is_adult(self) -> bool {
        matches!(
            self,
            Self::AdultVideo | Self::AdultPhoto | Self::AdultLive | Self::AdultText
        )
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::AdultVideo => "adult_video",
            Self::AdultPhoto => "adult_photo",
            Self::AdultLive => "adult_live",
            Self::AdultText => "adult_text",
            Self::Educational => "educational",
            Self::Artistic => "artistic",
            Self::News => "news",
            Self::General => "general",
        };
        write!(f, "{s}")
    }
}

/// The action the caller wants to perform on the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestedAction {
    View,
    Upload,
    Purchase,
    Interact,
}

impl std::fmt::Display for RequestedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::View => "view",
            Self::Upload => "upload",
            Self::Purchase => "purchase",
            Self::Interact => "interact",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// AccessRequest
// ---------------------------------------------------------------------------

/// A single inbound access request to be gated.
///
/// Immutable once constructed. The `timestamp` is the instant the request
/// was made; time-window rules are evaluated against it (not against the
/// engine's wall clock), which keeps decisions deterministic and
/// replayable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRequest {
    /// Origin IP address of the request.
    pub ip: String,
    /// User agent string, if the transport captured one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Identifier of the requesting user, if authenticated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Identifier of the target content item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
    /// Category of the target content.
    pub content_type: ContentType,
    /// The action being requested.
    pub requested_action: RequestedAction,
    /// When the request was made.
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// EvaluationFacts
// ---------------------------------------------------------------------------

/// Whether the requesting user has completed identity/age verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Verified,
    #[default]
    Unverified,
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Verified => write!(f, "verified"),
            Self::Unverified => write!(f, "unverified"),
        }
    }
}

/// Facts about the requesting user and target content that restriction
/// conditions evaluate against.
///
/// The caller supplies these; the engine performs no lookups of its own.
/// The default is the most restrictive assumption set: age unknown,
/// unverified, nothing else known.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationFacts {
    /// Verified age of the user in years, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Identity/age verification status of the user.
    #[serde(default)]
    pub verification_status: VerificationStatus,
    /// Account type of the user (e.g. "creator", "subscriber").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    /// Editorial rating of the target content (e.g. "educational").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_rating: Option<String>,
    /// Payment method in play for purchase actions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

// ---------------------------------------------------------------------------
// Collaborator results
// ---------------------------------------------------------------------------

/// A geographic location resolved from an origin IP by the location
/// collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    /// ISO 3166-1 country code (e.g. "US", "DE").
    pub country: String,
    /// Region/state code within the country, if known (e.g. "TX").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// City name, if known. Carried for audit logging; the jurisdiction
    /// resolver does not consult it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// Result of the VPN/proxy detection collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpnDetection {
    /// Whether the origin IP is a known VPN or proxy exit.
    pub is_vpn: bool,
    /// Name of the VPN provider, when the detector can identify it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}
