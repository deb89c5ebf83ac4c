//! # Restriction Evaluation
//!
//! Applies a jurisdiction's content-type rules and time-window rules to a
//! request, producing the fired [`ContentRestriction`]s. Content rules and
//! time rules are evaluated independently and their outputs concatenated —
//! a request can accumulate restrictions from both at once.

use geogate_core::{
    AccessRequest, ContentRestriction, EvaluationFacts, RestrictionType, Severity,
};
use geogate_rules::{ContentRestrictionRule, JurisdictionRule, RestrictionAction};

use crate::conditions::{conditions_hold, exemption_applies};
use crate::error::EngineError;
use crate::timewindow::window_applies;

/// The fired restriction's severity is the rule's action, verbatim.
fn action_severity(action: RestrictionAction) -> Severity {
    match action {
        RestrictionAction::Block => Severity::Block,
        RestrictionAction::AgeGate => Severity::AgeGate,
        RestrictionAction::Warning => Severity::Warning,
        RestrictionAction::Redirect => Severity::Redirect,
    }
}

fn action_restriction_type(action: RestrictionAction) -> RestrictionType {
    match action {
        RestrictionAction::Block => RestrictionType::GeoBlock,
        RestrictionAction::AgeGate => RestrictionType::AgeGate,
        RestrictionAction::Warning | RestrictionAction::Redirect => {
            RestrictionType::ContentWarning
        }
    }
}

fn action_message(action: RestrictionAction) -> &'static str {
    match action {
        RestrictionAction::Block => "This content is not available in your region",
        RestrictionAction::AgeGate => "Age verification required to access this content",
        RestrictionAction::Warning => "This content may not be suitable for all audiences",
        RestrictionAction::Redirect => "Content access restrictions apply",
    }
}

fn rule_fires(
    rule: &ContentRestrictionRule,
    request: &AccessRequest,
    facts: &EvaluationFacts,
) -> bool {
    if !rule.content_types.contains(&request.content_type) {
        return false;
    }
    conditions_hold(&rule.conditions, request, facts)
        && !exemption_applies(&rule.exemptions, request, facts)
}

/// Evaluate the record's content restriction rules against the request.
pub fn evaluate_content_rules(
    request: &AccessRequest,
    facts: &EvaluationFacts,
    record: &JurisdictionRule,
) -> Vec<ContentRestriction> {
    record
        .content_restrictions
        .iter()
        .filter(|rule| rule_fires(rule, request, facts))
        .map(|rule| ContentRestriction {
            restriction_type: action_restriction_type(rule.action),
            severity: action_severity(rule.action),
            message: action_message(rule.action).to_string(),
            jurisdiction: record.jurisdiction.to_string(),
            legal_basis: rule.legal_basis.clone(),
            expires_at: None,
        })
        .collect()
}

/// Evaluate the record's time windows against the request timestamp.
///
/// A matching window always fires a blocking `time_restriction` whose
/// `expires_at` is the next occurrence of the window's end.
///
/// # Errors
///
/// [`EngineError::Evaluation`] when a stored window is malformed (see
/// [`window_applies`]).
pub fn evaluate_time_restrictions(
    request: &AccessRequest,
    record: &JurisdictionRule,
) -> Result<Vec<ContentRestriction>, EngineError> {
    let mut fired = Vec::new();
    for window in &record.time_restrictions {
        if !window.content_types.contains(&request.content_type) {
            continue;
        }
        if let Some(expires_at) = window_applies(window, request.timestamp)? {
            fired.push(ContentRestriction {
                restriction_type: RestrictionType::TimeRestriction,
                severity: Severity::Block,
                message: format!(
                    "Content access is restricted between {} and {}",
                    window.start_time, window.end_time
                ),
                jurisdiction: record.jurisdiction.to_string(),
                legal_basis: "Time-based content restrictions".to_string(),
                expires_at: Some(expires_at),
            });
        }
    }
    Ok(fired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use geogate_core::{ContentType, JurisdictionId, RequestedAction, VerificationStatus};
    use geogate_rules::{
        jurisdiction_registry, ConditionKind, ConditionOperator, Exemption, ExemptionKind,
        RestrictionCondition,
    };

    fn record(id: &str) -> JurisdictionRule {
        jurisdiction_registry()
            .into_iter()
            .find(|r| r.jurisdiction.as_str() == id)
            .unwrap()
    }

    fn request(content_type: ContentType) -> AccessRequest {
        AccessRequest {
            ip: "203.0.113.9".to_string(),
            user_agent: None,
            user_id: None,
            content_id: Some("content-123".to_string()),
            content_type,
            requested_action: RequestedAction::View,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn ban_rule_fires_unconditionally() {
        let fired = evaluate_content_rules(
            &request(ContentType::AdultVideo),
            &EvaluationFacts::default(),
            &record("CN"),
        );
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].restriction_type, RestrictionType::GeoBlock);
        assert_eq!(fired[0].severity, Severity::Block);
        assert_eq!(fired[0].message, "This content is not available in your region");
        assert!(fired[0].legal_basis.contains("Cybersecurity Law"));
    }

    #[test]
    fn rule_skips_non_matching_content_type() {
        let fired = evaluate_content_rules(
            &request(ContentType::News),
            &EvaluationFacts::default(),
            &record("CN"),
        );
        assert!(fired.is_empty());
    }

    #[test]
    fn age_gate_fires_for_unverified_and_not_for_verified() {
        let de = record("DE");
        let req = request(ContentType::AdultPhoto);

        let fired = evaluate_content_rules(&req, &EvaluationFacts::default(), &de);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].severity, Severity::AgeGate);
        assert_eq!(fired[0].restriction_type, RestrictionType::AgeGate);

        let verified = EvaluationFacts {
            verification_status: VerificationStatus::Verified,
            ..EvaluationFacts::default()
        };
        assert!(evaluate_content_rules(&req, &verified, &de).is_empty());
    }

    #[test]
    fn satisfied_exemption_cancels_the_rule() {
        let gb = record("GB");
        let req = request(ContentType::AdultVideo);

        let exempt = EvaluationFacts {
            content_rating: Some("educational".to_string()),
            ..EvaluationFacts::default()
        };
        assert!(evaluate_content_rules(&req, &exempt, &gb).is_empty());
        assert_eq!(
            evaluate_content_rules(&req, &EvaluationFacts::default(), &gb).len(),
            1
        );
    }

    #[test]
    fn redirect_action_maps_to_content_warning() {
        let mut rec = record("AU");
        rec.content_restrictions[0].action = RestrictionAction::Redirect;
        rec.content_restrictions[0].conditions.clear();

        let fired = evaluate_content_rules(
            &request(ContentType::AdultVideo),
            &EvaluationFacts::default(),
            &rec,
        );
        assert_eq!(fired[0].restriction_type, RestrictionType::ContentWarning);
        assert_eq!(fired[0].severity, Severity::Redirect);
        assert_eq!(fired[0].message, "Content access restrictions apply");
    }

    #[test]
    fn fallback_record_stamps_its_own_jurisdiction() {
        // A US-wide record resolved for a Texas request labels restrictions "US".
        let mut rec = record("US-TX");
        rec.jurisdiction = JurisdictionId::new("US").unwrap();
        rec.content_restrictions[0].conditions = vec![RestrictionCondition::string(
            ConditionKind::VerificationStatus,
            ConditionOperator::Equals,
            "unverified",
        )];

        let fired = evaluate_content_rules(
            &request(ContentType::AdultVideo),
            &EvaluationFacts::default(),
            &rec,
        );
        assert_eq!(fired[0].jurisdiction, "US");
    }

    #[test]
    fn time_window_fires_independently_of_content_rules() {
        let de = record("DE");
        let req = AccessRequest {
            // 23:30 Berlin in winter = 22:30 UTC.
            timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 22, 30, 0).unwrap(),
            ..request(ContentType::AdultLive)
        };

        let content = evaluate_content_rules(&req, &EvaluationFacts::default(), &de);
        let time = evaluate_time_restrictions(&req, &de).unwrap();
        assert_eq!(content.len(), 1, "age gate fires");
        assert_eq!(time.len(), 1, "blackout window fires");
        assert_eq!(time[0].restriction_type, RestrictionType::TimeRestriction);
        assert_eq!(time[0].severity, Severity::Block);
        assert!(time[0].expires_at.is_some());
        assert_eq!(
            time[0].message,
            "Content access is restricted between 22:00 and 06:00"
        );
    }

    #[test]
    fn time_window_skips_non_listed_content_type() {
        let de = record("DE");
        let req = AccessRequest {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 22, 30, 0).unwrap(),
            // AdultPhoto is outside the German blackout's content list.
            ..request(ContentType::AdultPhoto)
        };
        assert!(evaluate_time_restrictions(&req, &de).unwrap().is_empty());
    }

    #[test]
    fn any_of_multiple_exemptions_suffices() {
        let mut gb = record("GB");
        gb.content_restrictions[0].exemptions.push(Exemption {
            kind: ExemptionKind::CreatorAccount,
            conditions: vec![RestrictionCondition::string(
                ConditionKind::UserType,
                ConditionOperator::Equals,
                "creator",
            )],
        });

        let creator = EvaluationFacts {
            user_type: Some("creator".to_string()),
            ..EvaluationFacts::default()
        };
        assert!(evaluate_content_rules(&request(ContentType::AdultVideo), &creator, &gb).is_empty());
    }
}
