//! # Seeded Jurisdiction Registry
//!
//! The static rule table the store seeds from at construction. Each entry
//! reflects the jurisdiction's governing statute as of the `last_updated`
//! stamp; the admin path replaces entries wholesale as laws change.

use chrono::{DateTime, TimeZone, Utc};

use geogate_core::{ContentType, JurisdictionId};

use crate::model::{
    AgeRequirement, ConditionKind, ConditionOperator, ContentRestrictionRule, Exemption,
    ExemptionKind, JurisdictionRule, LegalContact, LegalContactKind, PaymentRestriction,
    RestrictionAction, RestrictionCondition, TimeRestriction,
};

fn jid(value: &str) -> JurisdictionId {
    // Registry identifiers are static non-empty literals.
    JurisdictionId::new(value).expect("static jurisdiction identifier")
}

fn stamped(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn unverified() -> RestrictionCondition {
    RestrictionCondition::string(
        ConditionKind::VerificationStatus,
        ConditionOperator::Equals,
        "unverified",
    )
}

fn adult_visual() -> Vec<ContentType> {
    vec![
        ContentType::AdultVideo,
        ContentType::AdultPhoto,
        ContentType::AdultLive,
    ]
}

fn all_adult() -> Vec<ContentType> {
    vec![
        ContentType::AdultVideo,
        ContentType::AdultPhoto,
        ContentType::AdultLive,
        ContentType::AdultText,
    ]
}

fn full_block(
    jurisdiction: &str,
    legal_basis: &str,
    currency: &str,
    updated: DateTime<Utc>,
) -> JurisdictionRule {
    JurisdictionRule {
        jurisdiction: jid(jurisdiction),
        country: jurisdiction.to_string(),
        region: None,
        content_restrictions: vec![ContentRestrictionRule {
            content_types: all_adult(),
            action: RestrictionAction::Block,
            conditions: vec![],
            exemptions: vec![],
            legal_basis: legal_basis.to_string(),
        }],
        age_requirements: vec![],
        time_restrictions: vec![],
        payment_restrictions: vec![PaymentRestriction {
            blocked_methods: vec!["all".to_string()],
            required_verification: vec![],
            maximum_amount: None,
            currency: currency.to_string(),
        }],
        legal_contacts: vec![],
        last_updated: updated,
    }
}

/// The built-in rule table.
///
/// Covers the age-verification statutes (US-TX, US-LA, GB, DE, AU), the
/// German broadcast-hours blackout, and the complete-ban jurisdictions
/// (CN, AE).
pub fn jurisdiction_registry() -> Vec<JurisdictionRule> {
    vec![
        // ── United States — Texas (HB 1181) ─────────────────────────────
        JurisdictionRule {
            jurisdiction: jid("US-TX"),
            country: "US".to_string(),
            region: Some("TX".to_string()),
            content_restrictions: vec![ContentRestrictionRule {
                content_types: adult_visual(),
                action: RestrictionAction::AgeGate,
                conditions: vec![
                    RestrictionCondition::numeric(
                        ConditionKind::Age,
                        ConditionOperator::LessThan,
                        18,
                    ),
                    unverified(),
                ],
                exemptions: vec![],
                legal_basis: "Texas HB 1181 - Protecting Minors from Harmful Material".to_string(),
            }],
            age_requirements: vec![AgeRequirement {
                minimum_age: 18,
                verification_required: true,
                verification_methods: vec![
                    "government_id".to_string(),
                    "digital_wallet".to_string(),
                    "credit_card".to_string(),
                ],
                grace_period_days: None,
            }],
            time_restrictions: vec![],
            payment_restrictions: vec![PaymentRestriction {
                blocked_methods: vec![],
                required_verification: vec!["government_id".to_string()],
                maximum_amount: None,
                currency: "USD".to_string(),
            }],
            legal_contacts: vec![LegalContact {
                kind: LegalContactKind::Compliance,
                email: "texas-compliance@platform.example".to_string(),
                phone: None,
                address: None,
            }],
            last_updated: stamped(2023, 9, 1),
        },
        // ── United States — Louisiana (Act 440) ─────────────────────────
        JurisdictionRule {
            jurisdiction: jid("US-LA"),
            country: "US".to_string(),
            region: Some("LA".to_string()),
            content_restrictions: vec![ContentRestrictionRule {
                content_types: adult_visual(),
                action: RestrictionAction::AgeGate,
                conditions: vec![unverified()],
                exemptions: vec![],
                legal_basis: "Louisiana Act 440 - Age Verification Requirements".to_string(),
            }],
            age_requirements: vec![AgeRequirement {
                minimum_age: 18,
                verification_required: true,
                verification_methods: vec![
                    "government_id".to_string(),
                    "device_verification".to_string(),
                ],
                grace_period_days: None,
            }],
            time_restrictions: vec![],
            payment_restrictions: vec![PaymentRestriction {
                blocked_methods: vec![],
                required_verification: vec!["age_verification".to_string()],
                maximum_amount: None,
                currency: "USD".to_string(),
            }],
            legal_contacts: vec![LegalContact {
                kind: LegalContactKind::Compliance,
                email: "louisiana-compliance@platform.example".to_string(),
                phone: None,
                address: None,
            }],
            last_updated: stamped(2023, 1, 1),
        },
        // ── United Kingdom ───────────────────────────────────────────────
        JurisdictionRule {
            jurisdiction: jid("GB"),
            country: "GB".to_string(),
            region: None,
            content_restrictions: vec![ContentRestrictionRule {
                content_types: adult_visual(),
                action: RestrictionAction::AgeGate,
                conditions: vec![unverified()],
                exemptions: vec![Exemption {
                    kind: ExemptionKind::Educational,
                    conditions: vec![RestrictionCondition::string(
                        ConditionKind::ContentRating,
                        ConditionOperator::Equals,
                        "educational",
                    )],
                }],
                legal_basis: "UK Age Verification Regulations".to_string(),
            }],
            age_requirements: vec![AgeRequirement {
                minimum_age: 18,
                verification_required: true,
                verification_methods: vec![
                    "government_id".to_string(),
                    "credit_check".to_string(),
                    "mobile_verification".to_string(),
                ],
                grace_period_days: None,
            }],
            time_restrictions: vec![],
            payment_restrictions: vec![PaymentRestriction {
                blocked_methods: vec![],
                required_verification: vec![
                    "age_verification".to_string(),
                    "financial_verification".to_string(),
                ],
                maximum_amount: None,
                currency: "GBP".to_string(),
            }],
            legal_contacts: vec![
                LegalContact {
                    kind: LegalContactKind::Compliance,
                    email: "uk-compliance@platform.example".to_string(),
                    phone: None,
                    address: None,
                },
                LegalContact {
                    kind: LegalContactKind::Appeals,
                    email: "uk-appeals@platform.example".to_string(),
                    phone: None,
                    address: None,
                },
            ],
            last_updated: stamped(2023, 7, 1),
        },
        // ── Germany (JMStV, with broadcast-hours blackout) ───────────────
        JurisdictionRule {
            jurisdiction: jid("DE"),
            country: "DE".to_string(),
            region: None,
            content_restrictions: vec![ContentRestrictionRule {
                content_types: adult_visual(),
                action: RestrictionAction::AgeGate,
                conditions: vec![unverified()],
                exemptions: vec![],
                legal_basis: "Jugendmedienschutz-Staatsvertrag (JMStV)".to_string(),
            }],
            age_requirements: vec![AgeRequirement {
                minimum_age: 18,
                verification_required: true,
                verification_methods: vec![
                    "personalausweis".to_string(),
                    "eid_verification".to_string(),
                ],
                grace_period_days: None,
            }],
            time_restrictions: vec![TimeRestriction {
                start_time: "22:00".to_string(),
                end_time: "06:00".to_string(),
                timezone: "Europe/Berlin".to_string(),
                days_of_week: vec![0, 1, 2, 3, 4, 5, 6],
                content_types: vec![ContentType::AdultVideo, ContentType::AdultLive],
            }],
            payment_restrictions: vec![PaymentRestriction {
                blocked_methods: vec![],
                required_verification: vec!["eid_verification".to_string()],
                maximum_amount: None,
                currency: "EUR".to_string(),
            }],
            legal_contacts: vec![LegalContact {
                kind: LegalContactKind::Compliance,
                email: "germany-compliance@platform.example".to_string(),
                phone: None,
                address: None,
            }],
            last_updated: stamped(2023, 5, 1),
        },
        // ── Australia ────────────────────────────────────────────────────
        JurisdictionRule {
            jurisdiction: jid("AU"),
            country: "AU".to_string(),
            region: None,
            content_restrictions: vec![ContentRestrictionRule {
                content_types: adult_visual(),
                action: RestrictionAction::AgeGate,
                conditions: vec![unverified()],
                exemptions: vec![],
                legal_basis: "eSafety Commissioner Requirements".to_string(),
            }],
            age_requirements: vec![AgeRequirement {
                minimum_age: 18,
                verification_required: true,
                verification_methods: vec!["government_id".to_string(), "passport".to_string()],
                grace_period_days: None,
            }],
            time_restrictions: vec![],
            payment_restrictions: vec![PaymentRestriction {
                blocked_methods: vec![],
                required_verification: vec!["age_verification".to_string()],
                maximum_amount: None,
                currency: "AUD".to_string(),
            }],
            legal_contacts: vec![LegalContact {
                kind: LegalContactKind::Compliance,
                email: "australia-compliance@platform.example".to_string(),
                phone: None,
                address: None,
            }],
            last_updated: stamped(2023, 6, 1),
        },
        // ── Complete-ban jurisdictions ───────────────────────────────────
        full_block(
            "CN",
            "Cybersecurity Law of the People's Republic of China",
            "CNY",
            stamped(2023, 1, 1),
        ),
        full_block("AE", "UAE Federal Penal Code", "AED", stamped(2023, 1, 1)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_contains_seven_jurisdictions() {
        let registry = jurisdiction_registry();
        assert_eq!(registry.len(), 7);
        let ids: Vec<&str> = registry.iter().map(|r| r.jurisdiction.as_str()).collect();
        assert!(ids.contains(&"US-TX"));
        assert!(ids.contains(&"US-LA"));
        assert!(ids.contains(&"GB"));
        assert!(ids.contains(&"DE"));
        assert!(ids.contains(&"AU"));
        assert!(ids.contains(&"CN"));
        assert!(ids.contains(&"AE"));
    }

    #[test]
    fn every_seeded_record_validates() {
        for rule in jurisdiction_registry() {
            rule.validate()
                .unwrap_or_else(|e| panic!("{} failed validation: {e}", rule.jurisdiction));
        }
    }

    #[test]
    fn germany_carries_broadcast_hours_blackout() {
        let registry = jurisdiction_registry();
        let de = registry
            .iter()
            .find(|r| r.jurisdiction.as_str() == "DE")
            .unwrap();
        assert_eq!(de.time_restrictions.len(), 1);
        let window = &de.time_restrictions[0];
        assert_eq!(window.start_time, "22:00");
        assert_eq!(window.end_time, "06:00");
        assert_eq!(window.timezone, "Europe/Berlin");
        assert_eq!(window.days_of_week.len(), 7);
        assert!(!window.content_types.contains(&ContentType::AdultPhoto));
    }

    #[test]
    fn ban_jurisdictions_block_unconditionally() {
        let registry = jurisdiction_registry();
        for id in ["CN", "AE"] {
            let record = registry
                .iter()
                .find(|r| r.jurisdiction.as_str() == id)
                .unwrap();
            let rule = &record.content_restrictions[0];
            assert_eq!(rule.action, RestrictionAction::Block);
            assert!(rule.conditions.is_empty());
            assert!(rule.exemptions.is_empty());
            assert!(record.payment_restrictions[0].blocks_all_methods());
            assert!(record.legal_contacts.is_empty());
        }
    }

    #[test]
    fn texas_cites_hb_1181() {
        let registry = jurisdiction_registry();
        let tx = registry
            .iter()
            .find(|r| r.jurisdiction.as_str() == "US-TX")
            .unwrap();
        assert!(tx.content_restrictions[0].legal_basis.contains("HB 1181"));
        assert_eq!(tx.region.as_deref(), Some("TX"));
    }
}
