//! # Condition & Exemption Evaluation
//!
//! Pure, side-effect-free evaluation of restriction conditions against the
//! request and the caller-supplied facts. A single evaluator dispatches
//! the closed condition vocabulary; rule validation guarantees every
//! kind/operator/value combination reaching it is defined.
//!
//! ## Absent facts
//!
//! A condition over an absent fact never holds, `not_contains` included:
//! absence of knowledge is not evidence. This matches the engine's
//! conservative stance — an unknown age does not satisfy `age < 18`, and
//! an unknown content rating does not satisfy any rating test.

use chrono::Timelike;

use geogate_core::{AccessRequest, EvaluationFacts};
use geogate_rules::{ConditionKind, ConditionOperator, Exemption, RestrictionCondition};

/// Evaluate a single condition against the request and facts.
pub fn condition_holds(
    condition: &RestrictionCondition,
    request: &AccessRequest,
    facts: &EvaluationFacts,
) -> bool {
    match condition.kind {
        ConditionKind::Age => numeric_holds(facts.age.map(u64::from), condition),
        ConditionKind::Time => {
            let minute = u64::from(request.timestamp.hour() * 60 + request.timestamp.minute());
            numeric_holds(Some(minute), condition)
        }
        ConditionKind::VerificationStatus => {
            string_holds(Some(&facts.verification_status.to_string()), condition)
        }
        ConditionKind::UserType => string_holds(facts.user_type.as_deref(), condition),
        ConditionKind::ContentRating => string_holds(facts.content_rating.as_deref(), condition),
        ConditionKind::PaymentMethod => string_holds(facts.payment_method.as_deref(), condition),
    }
}

fn numeric_holds(fact: Option<u64>, condition: &RestrictionCondition) -> bool {
    let (Some(fact), Some(value)) = (fact, condition.value.as_u64()) else {
        return false;
    };
    match condition.operator {
        ConditionOperator::Equals => fact == value,
        ConditionOperator::GreaterThan => fact > value,
        ConditionOperator::LessThan => fact < value,
        // Rejected at validation time for numeric kinds.
        ConditionOperator::Contains | ConditionOperator::NotContains => false,
    }
}

fn string_holds(fact: Option<&str>, condition: &RestrictionCondition) -> bool {
    let (Some(fact), Some(value)) = (fact, condition.value.as_str()) else {
        return false;
    };
    match condition.operator {
        ConditionOperator::Equals => fact == value,
        ConditionOperator::Contains => fact.contains(value),
        ConditionOperator::NotContains => !fact.contains(value),
        // Rejected at validation time for string kinds.
        ConditionOperator::GreaterThan | ConditionOperator::LessThan => false,
    }
}

/// Evaluate a condition conjunction. An empty list is trivially true.
pub fn conditions_hold(
    conditions: &[RestrictionCondition],
    request: &AccessRequest,
    facts: &EvaluationFacts,
) -> bool {
    conditions.iter().all(|c| condition_holds(c, request, facts))
}

/// Evaluate an exemption disjunction: true if any exemption's condition
/// conjunction is fully satisfied. A flat OR with no precedence ordering
/// between competing exemptions.
pub fn exemption_applies(
    exemptions: &[Exemption],
    request: &AccessRequest,
    facts: &EvaluationFacts,
) -> bool {
    exemptions
        .iter()
        .any(|e| conditions_hold(&e.conditions, request, facts))
}
