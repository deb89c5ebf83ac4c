//! Rule subsystem error types.
//!
//! These errors surface on the admin and reporting paths only. The
//! decision path never sees them: a missing rule record triggers the
//! default policy there, and evaluation faults fail closed in the engine.

use crate::model::{ConditionKind, ConditionOperator};

/// Errors from the admin and reporting entry points.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// No rule record is registered for the jurisdiction. Hard error on
    /// the reporting path; the decision path applies fallback instead.
    #[error("no rules registered for jurisdiction {jurisdiction}")]
    NotFound {
        /// The jurisdiction identifier that was requested.
        jurisdiction: String,
    },

    /// A rule record failed validation and was rejected before touching
    /// the store.
    #[error("invalid rule record for {jurisdiction}: {source}")]
    InvalidRule {
        /// The jurisdiction identifier of the rejected record.
        jurisdiction: String,
        /// The specific validation failure.
        #[source]
        source: RuleValidationError,
    },
}

/// A specific way a [`JurisdictionRule`](crate::JurisdictionRule) can be
/// malformed. Checked at validation time so that an unsupported condition
/// shape is a construction-time error, never a silently-false evaluation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RuleValidationError {
    /// A content restriction rule applies to no content types.
    #[error("content restriction rule has an empty content-type list")]
    EmptyContentTypes,

    /// The operator is not defined for this condition kind.
    #[error("operator {operator} is not supported for condition kind {kind}")]
    IncompatibleOperator {
        kind: ConditionKind,
        operator: ConditionOperator,
    },

    /// The condition value has the wrong JSON type for its kind.
    #[error("condition kind {kind} requires a {expected} value")]
    WrongValueType {
        kind: ConditionKind,
        expected: &'static str,
    },

    /// A time-window boundary is not wall-clock `HH:MM`.
    #[error("time restriction boundary {value:?} is not HH:MM")]
    InvalidTimeFormat { value: String },

    /// The time-window timezone is not a known IANA zone name.
    #[error("unknown IANA timezone {timezone:?}")]
    UnknownTimezone { timezone: String },

    /// A day-of-week entry is outside 0..=6 (0 = Sunday).
    #[error("day-of-week {day} is outside 0..=6")]
    InvalidDayOfWeek { day: u8 },
}
