//! # Jurisdiction Rule Model
//!
//! The full rule record owned by one jurisdiction: an ordered list of
//! content restriction rules, recurring time-of-day blackout windows, and
//! the descriptive metadata (age requirements, payment restrictions, legal
//! contacts) that decisions and reports surface.
//!
//! ## Closed condition vocabulary
//!
//! Condition kinds and operators are closed enums dispatched through a
//! single evaluator, and [`RestrictionCondition::validate`] rejects
//! kind/operator/value combinations the evaluator does not define. A rule
//! record that would evaluate to a silent `false` cannot enter the store.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use geogate_core::{ContentType, JurisdictionId};

use crate::error::RuleValidationError;

// ---------------------------------------------------------------------------
// Conditions
// ---------------------------------------------------------------------------

/// The fact a restriction condition tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    /// Verified age of the user in years (numeric).
    Age,
    /// Identity/age verification status ("verified" / "unverified").
    VerificationStatus,
    /// Account type of the user (e.g. "creator").
    UserType,
    /// Editorial rating of the target content (e.g. "educational").
    ContentRating,
    /// Minute-of-day of the request timestamp, UTC (numeric, 0..1440).
    Time,
    /// Payment method in play for purchase actions.
    PaymentMethod,
}

impl std::fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Age => "age",
            Self::VerificationStatus => "verification_status",
            Self::UserType => "user_type",
            Self::ContentRating => "content_rating",
            Self::Time => "time",
            Self::PaymentMethod => "payment_method",
        };
        write!(f, "{s}")
    }
}

/// Comparison applied between the fact and the condition value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    GreaterThan,
    LessThan,
    Contains,
    NotContains,
}

impl std::fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Equals => "equals",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
        };
        write!(f, "{s}")
    }
}

/// A single pure predicate over request/user facts.
///
/// Numeric kinds ([`ConditionKind::Age`], [`ConditionKind::Time`]) take the
/// ordering operators with a numeric value; string kinds take `equals` /
/// `contains` / `not_contains` with a string value. Anything else is
/// rejected by [`validate`](Self::validate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestrictionCondition {
    /// The fact being tested.
    pub kind: ConditionKind,
    /// The comparison to apply.
    pub operator: ConditionOperator,
    /// The value compared against (number for numeric kinds, string for
    /// string kinds).
    pub value: Value,
}

impl RestrictionCondition {
    /// Shorthand for a numeric condition.
    pub fn numeric(kind: ConditionKind, operator: ConditionOperator, value: u64) -> Self {
        Self {
            kind,
            operator,
            value: Value::from(value),
        }
    }

    /// Shorthand for a string condition.
    pub fn string(
        kind: ConditionKind,
        operator: ConditionOperator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            operator,
            value: Value::from(value.into()),
        }
    }

    /// Check that the kind/operator/value combination is one the evaluator
    /// defines.
    ///
    /// # Errors
    ///
    /// [`RuleValidationError::IncompatibleOperator`] for an operator the
    /// kind does not support, [`RuleValidationError::WrongValueType`] for a
    /// value of the wrong JSON type.
    pub fn validate(&self) -> Result<(), RuleValidationError> {
        use ConditionKind::*;
        use ConditionOperator::*;

        match self.kind {
            Age | Time => {
                if !matches!(self.operator, Equals | GreaterThan | LessThan) {
                    return Err(RuleValidationError::IncompatibleOperator {
                        kind: self.kind,
                        operator: self.operator,
                    });
                }
                if !self.value.is_u64() {
                    return Err(RuleValidationError::WrongValueType {
                        kind: self.kind,
                        expected: "number",
                    });
                }
            }
            VerificationStatus | UserType | ContentRating | PaymentMethod => {
                if !matches!(self.operator, Equals | Contains | NotContains) {
                    return Err(RuleValidationError::IncompatibleOperator {
                        kind: self.kind,
                        operator: self.operator,
                    });
                }
                if !self.value.is_string() {
                    return Err(RuleValidationError::WrongValueType {
                        kind: self.kind,
                        expected: "string",
                    });
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Content restriction rules
// ---------------------------------------------------------------------------

/// What a matching content restriction rule does. The action maps directly
/// to the fired restriction's severity, and to its semantic type (block →
/// geo_block, age_gate → age_gate, everything else → content_warning).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionAction {
    Block,
    AgeGate,
    Warning,
    Redirect,
}

impl std::fmt::Display for RestrictionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Block => "block",
            Self::AgeGate => "age_gate",
            Self::Warning => "warning",
            Self::Redirect => "redirect",
        };
        write!(f, "{s}")
    }
}

/// Named category of an exemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExemptionKind {
    VerifiedUser,
    CreatorAccount,
    Educational,
    Artistic,
    News,
}

/// A condition conjunction that, if fully satisfied, cancels an otherwise
/// matching restriction rule. Exemptions on a rule are a flat OR: any one
/// satisfied exemption cancels the rule, with no precedence ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exemption {
    /// The exemption category.
    pub kind: ExemptionKind,
    /// All of these must hold for the exemption to apply.
    pub conditions: Vec<RestrictionCondition>,
}

/// One content restriction rule within a jurisdiction's record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRestrictionRule {
    /// The content categories this rule applies to. Must be non-empty.
    pub content_types: Vec<ContentType>,
    /// What the rule does when it fires.
    pub action: RestrictionAction,
    /// Conjunction of conditions; an empty list is trivially true.
    pub conditions: Vec<RestrictionCondition>,
    /// Disjunction of exemptions; any satisfied exemption cancels the rule.
    pub exemptions: Vec<Exemption>,
    /// Human-readable citation of the legal basis for this rule.
    pub legal_basis: String,
}

impl ContentRestrictionRule {
    fn validate(&self) -> Result<(), RuleValidationError> {
        if self.content_types.is_empty() {
            return Err(RuleValidationError::EmptyContentTypes);
        }
        for condition in &self.conditions {
            condition.validate()?;
        }
        for exemption in &self.exemptions {
            for condition in &exemption.conditions {
                condition.validate()?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Time restrictions
// ---------------------------------------------------------------------------

/// A recurring wall-clock blackout window, potentially crossing midnight
/// (`start_time > end_time` spans midnight).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRestriction {
    /// Window start, wall clock `HH:MM` in `timezone`.
    pub start_time: String,
    /// Window end, wall clock `HH:MM` in `timezone`.
    pub end_time: String,
    /// IANA timezone name the window is anchored in (e.g. "Europe/Berlin").
    pub timezone: String,
    /// Days the window applies, 0 = Sunday … 6 = Saturday.
    pub days_of_week: Vec<u8>,
    /// Content categories the window applies to.
    pub content_types: Vec<ContentType>,
}

/// Parse a wall-clock `HH:MM` boundary.
pub fn parse_hhmm(value: &str) -> Result<NaiveTime, RuleValidationError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| RuleValidationError::InvalidTimeFormat {
        value: value.to_string(),
    })
}

impl TimeRestriction {
    /// Window start as a [`NaiveTime`].
    pub fn start(&self) -> Result<NaiveTime, RuleValidationError> {
        parse_hhmm(&self.start_time)
    }

    /// Window end as a [`NaiveTime`].
    pub fn end(&self) -> Result<NaiveTime, RuleValidationError> {
        parse_hhmm(&self.end_time)
    }

    /// The window's IANA timezone.
    pub fn tz(&self) -> Result<chrono_tz::Tz, RuleValidationError> {
        self.timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|_| RuleValidationError::UnknownTimezone {
                timezone: self.timezone.clone(),
            })
    }

    fn validate(&self) -> Result<(), RuleValidationError> {
        self.start()?;
        self.end()?;
        self.tz()?;
        for &day in &self.days_of_week {
            if day > 6 {
                return Err(RuleValidationError::InvalidDayOfWeek { day });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Descriptive metadata
// ---------------------------------------------------------------------------

/// Minimum-age requirement for a jurisdiction. Not independently evaluated;
/// surfaced in warnings, appeal options, and compliance reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRequirement {
    /// Minimum age in years.
    pub minimum_age: u32,
    /// Whether the jurisdiction mandates active verification (not just
    /// self-attestation).
    pub verification_required: bool,
    /// Verification methods the jurisdiction accepts.
    pub verification_methods: Vec<String>,
    /// Grace period in days for existing users, where the law grants one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace_period_days: Option<u32>,
}

/// Payment constraints for a jurisdiction. The sentinel method `"all"` in
/// `blocked_methods` means payment processing is unavailable entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRestriction {
    /// Payment methods that may not be used.
    pub blocked_methods: Vec<String>,
    /// Verification steps required before payment.
    pub required_verification: Vec<String>,
    /// Per-transaction ceiling in minor units, where the law imposes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_amount: Option<u64>,
    /// ISO 4217 currency code.
    pub currency: String,
}

impl PaymentRestriction {
    /// Whether this restriction blocks every payment method.
    pub fn blocks_all_methods(&self) -> bool {
        self.blocked_methods.iter().any(|m| m == "all")
    }
}

/// Kind of a registered legal contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalContactKind {
    General,
    Privacy,
    Compliance,
    Appeals,
}

/// A legal contact registered for a jurisdiction, surfaced in appeal
/// options and compliance reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalContact {
    /// What the contact handles.
    pub kind: LegalContactKind,
    /// Contact email address.
    pub email: String,
    /// Contact phone number, if registered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Postal address, if registered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

// ---------------------------------------------------------------------------
// JurisdictionRule
// ---------------------------------------------------------------------------

/// The complete rule record for one jurisdiction.
///
/// One record per jurisdiction identifier; the store owns all records and
/// replaces them wholesale. `last_updated` is re-stamped by the store on
/// every replacement regardless of the value carried here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JurisdictionRule {
    /// The jurisdiction this record governs.
    pub jurisdiction: JurisdictionId,
    /// ISO 3166-1 country code.
    pub country: String,
    /// Region/state code for compound jurisdictions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Ordered content restriction rules.
    pub content_restrictions: Vec<ContentRestrictionRule>,
    /// Age requirements (descriptive; drive warnings and appeal options).
    pub age_requirements: Vec<AgeRequirement>,
    /// Recurring blackout windows.
    pub time_restrictions: Vec<TimeRestriction>,
    /// Payment constraints (descriptive; drive warnings).
    pub payment_restrictions: Vec<PaymentRestriction>,
    /// Registered legal contacts.
    pub legal_contacts: Vec<LegalContact>,
    /// When this record last changed. Stamped by the store.
    pub last_updated: DateTime<Utc>,
}

impl JurisdictionRule {
    /// Validate the whole record: every condition's kind/operator/value
    /// combination, every time window's boundaries, timezone, and days.
    ///
    /// # Errors
    ///
    /// The first [`RuleValidationError`] encountered, in declaration order.
    pub fn validate(&self) -> Result<(), RuleValidationError> {
        for rule in &self.content_restrictions {
            rule.validate()?;
        }
        for window in &self.time_restrictions {
            window.validate()?;
        }
        Ok(())
    }
}
