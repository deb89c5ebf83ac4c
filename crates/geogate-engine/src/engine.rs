//! # Access Engine
//!
//! The decision composer and the engine's public entry points. One
//! [`AccessEngine`] owns the rule store and the two collaborator clients;
//! decision evaluation is a pure computation over an immutable store
//! snapshot plus the two bounded collaborator calls, so concurrent
//! requests evaluate with unbounded parallelism.
//!
//! ## Decision flow
//!
//! VPN short-circuit → location resolution → jurisdiction resolution →
//! rule lookup (exact → country → default) → restriction evaluation →
//! decision composition. Any fault anywhere in that chain fails closed.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use geogate_core::{
    AccessDecision, AccessRequest, AppealKind, AppealOption, EvaluationFacts, JurisdictionId,
};
use geogate_rules::{JurisdictionRule, LegalContactKind, RuleError, RuleStore};

use crate::collaborators::{CollaboratorError, LocationResolver, VpnDetector};
use crate::error::EngineError;
use crate::report::ComplianceReport;
use crate::restrictions::{evaluate_content_rules, evaluate_time_restrictions};

/// Engine tuning knobs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Upper bound on each collaborator call. A timeout fails closed.
    pub collaborator_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            collaborator_timeout: Duration::from_secs(5),
        }
    }
}

/// The jurisdiction-aware access decision engine.
///
/// Generic over its collaborator implementations so deployments wire in
/// provider clients and tests wire in canned ones. Share behind an `Arc`
/// for concurrent use.
#[derive(Debug)]
pub struct AccessEngine<L, V> {
    store: Arc<RuleStore>,
    location: L,
    vpn: V,
    config: EngineConfig,
}

impl<L, V> AccessEngine<L, V>
where
    L: LocationResolver,
    V: VpnDetector,
{
    /// Create an engine over `store` with the default configuration.
    pub fn new(store: Arc<RuleStore>, location: L, vpn: V) -> Self {
        Self::with_config(store, location, vpn, EngineConfig::default())
    }

    /// Create an engine with explicit configuration.
    pub fn with_config(store: Arc<RuleStore>, location: L, vpn: V, config: EngineConfig) -> Self {
        Self {
            store,
            location,
            vpn,
            config,
        }
    }

    /// The sole decision entry point.
    ///
    /// Never returns an error: every fault while producing a decision is
    /// converted into the fail-closed deny. Callers therefore always get a
    /// decision, and an internal fault can never surface as "allowed".
    pub async fn check_access(
        &self,
        request: &AccessRequest,
        facts: &EvaluationFacts,
    ) -> AccessDecision {
        tracing::info!(
            ip = %request.ip,
            content_type = %request.content_type,
            action = %request.requested_action,
            "checking access"
        );

        match self.evaluate(request, facts).await {
            Ok(decision) => decision,
            Err(error) => {
                tracing::error!(ip = %request.ip, %error, "access check failed, failing closed");
                AccessDecision::fail_closed()
            }
        }
    }

    async fn evaluate(
        &self,
        request: &AccessRequest,
        facts: &EvaluationFacts,
    ) -> Result<AccessDecision, EngineError> {
        // VPN short-circuit, before any jurisdiction logic.
        let detection = self
            .bounded("vpn_detection", self.vpn.detect(&request.ip))
            .await?;
        if detection.is_vpn {
            tracing::warn!(
                ip = %request.ip,
                provider = detection.provider.as_deref().unwrap_or("unknown"),
                "VPN detected"
            );
            return Ok(AccessDecision::vpn_denied());
        }

        let location = self
            .bounded("location_resolution", self.location.resolve(&request.ip))
            .await?;
        let jurisdiction = JurisdictionId::from_location(location.as_ref());

        let Some(record) = self.store.resolve(jurisdiction.as_str()) else {
            tracing::info!(%jurisdiction, "no rules registered, applying default policy");
            return Ok(AccessDecision::unknown_jurisdiction(jurisdiction.to_string()));
        };

        let mut restrictions = evaluate_content_rules(request, facts, &record);
        restrictions.extend(evaluate_time_restrictions(request, &record)?);

        let decision = AccessDecision::from_restrictions(
            jurisdiction.to_string(),
            restrictions,
            synthesize_warnings(&record),
            appeal_options(&record),
        );
        tracing::info!(
            ip = %request.ip,
            %jurisdiction,
            allowed = decision.allowed,
            restrictions = decision.restrictions.len(),
            "access decision"
        );
        Ok(decision)
    }

    async fn bounded<T>(
        &self,
        service: &'static str,
        call: impl Future<Output = Result<T, CollaboratorError>>,
    ) -> Result<T, EngineError> {
        let timeout = self.config.collaborator_timeout;
        match tokio::time::timeout(timeout, call).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(EngineError::Timeout {
                service,
                timeout_ms: timeout.as_millis() as u64,
            }),
        }
    }

    /// Replace a jurisdiction's rule record (admin path).
    ///
    /// # Errors
    ///
    /// [`RuleError::InvalidRule`] when the record fails validation; the
    /// store is untouched in that case.
    pub fn update_jurisdiction_rules(
        &self,
        jurisdiction: JurisdictionId,
        rule: JurisdictionRule,
    ) -> Result<(), RuleError> {
        self.store.replace(jurisdiction, rule)
    }

    /// All registered jurisdiction identifiers.
    pub fn supported_jurisdictions(&self) -> Vec<String> {
        self.store.supported_jurisdictions()
    }

    /// Snapshot a jurisdiction's current rule set (reporting path).
    ///
    /// No fallback is applied here: the report must reflect exactly what
    /// is registered under the identifier.
    ///
    /// # Errors
    ///
    /// [`RuleError::NotFound`] when the jurisdiction has no record.
    pub fn generate_compliance_report(
        &self,
        jurisdiction: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<ComplianceReport, RuleError> {
        let record = self
            .store
            .get(jurisdiction)
            .ok_or_else(|| RuleError::NotFound {
                jurisdiction: jurisdiction.to_string(),
            })?;
        Ok(ComplianceReport::for_record(&record, start, end))
    }
}

/// Warnings are synthesized from the rule record, not evaluated.
fn synthesize_warnings(record: &JurisdictionRule) -> Vec<String> {
    let mut warnings = Vec::new();

    if let Some(min_age) = record.age_requirements.iter().map(|r| r.minimum_age).max() {
        warnings.push(format!(
            "Content restricted to users {min_age} years and older"
        ));
    }
    if !record.time_restrictions.is_empty() {
        warnings.push("Time-based content restrictions may apply".to_string());
    }
    if record
        .payment_restrictions
        .iter()
        .any(|p| p.blocks_all_methods())
    {
        warnings.push("Payment processing not available in this region".to_string());
    }

    warnings
}

/// Appeal options for a denied decision, in fixed order: age verification
/// (when any requirement mandates it), the first appeals/compliance legal
/// contact, and always a manual review last.
fn appeal_options(record: &JurisdictionRule) -> Vec<AppealOption> {
    let mut options = Vec::new();

    if record.age_requirements.iter().any(|r| r.verification_required) {
        options.push(AppealOption {
            kind: AppealKind::AgeVerification,
            description: "Complete age verification to access content".to_string(),
            url: Some("/verify-age".to_string()),
        });
    }

    let legal_contact = record.legal_contacts.iter().find(|c| {
        matches!(
            c.kind,
            LegalContactKind::Appeals | LegalContactKind::Compliance
        )
    });
    if let Some(contact) = legal_contact {
        options.push(AppealOption {
            kind: AppealKind::LegalContact,
            description: "Contact our legal team for assistance".to_string(),
            url: Some(format!("mailto:{}", contact.email)),
        });
    }

    options.push(AppealOption {
        kind: AppealKind::ManualReview,
        description: "Request manual review of this decision".to_string(),
        url: Some("/appeal-restriction".to_string()),
    });

    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use geogate_core::{ContentType, RequestedAction, ResolvedLocation, VpnDetection};
    use geogate_rules::jurisdiction_registry;

    struct StaticLocation(Option<ResolvedLocation>);

    impl LocationResolver for StaticLocation {
        async fn resolve(&self, _ip: &str) -> Result<Option<ResolvedLocation>, CollaboratorError> {
            Ok(self.0.clone())
        }
    }

    struct FailingLocation;

    impl LocationResolver for FailingLocation {
        async fn resolve(&self, _ip: &str) -> Result<Option<ResolvedLocation>, CollaboratorError> {
            Err(CollaboratorError::Unavailable {
                service: "location_resolution",
                reason: "upstream 503".to_string(),
            })
        }
    }

    struct HangingLocation;

    impl LocationResolver for HangingLocation {
        async fn resolve(&self, _ip: &str) -> Result<Option<ResolvedLocation>, CollaboratorError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(None)
        }
    }

    struct NoVpn;

    impl VpnDetector for NoVpn {
        async fn detect(&self, _ip: &str) -> Result<VpnDetection, CollaboratorError> {
            Ok(VpnDetection {
                is_vpn: false,
                provider: None,
            })
        }
    }

    struct VpnHit;

    impl VpnDetector for VpnHit {
        async fn detect(&self, _ip: &str) -> Result<VpnDetection, CollaboratorError> {
            Ok(VpnDetection {
                is_vpn: true,
                provider: Some("ExampleVPN".to_string()),
            })
        }
    }

    fn located(country: &str, region: Option<&str>) -> StaticLocation {
        StaticLocation(Some(ResolvedLocation {
            country: country.to_string(),
            region: region.map(String::from),
            city: None,
        }))
    }

    fn request(content_type: ContentType, timestamp: DateTime<Utc>) -> AccessRequest {
        AccessRequest {
            ip: "198.51.100.23".to_string(),
            user_agent: Some("test-agent".to_string()),
            user_id: None,
            content_id: None,
            content_type,
            requested_action: RequestedAction::View,
            timestamp,
        }
    }

    fn midday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    fn engine<L: LocationResolver, V: VpnDetector>(location: L, vpn: V) -> AccessEngine<L, V> {
        AccessEngine::new(Arc::new(RuleStore::seeded()), location, vpn)
    }

    #[tokio::test]
    async fn vpn_short_circuits_before_jurisdiction_logic() {
        // A hanging resolver would time out if consulted; the VPN hit must
        // return first.
        let engine = AccessEngine::with_config(
            Arc::new(RuleStore::seeded()),
            HangingLocation,
            VpnHit,
            EngineConfig {
                collaborator_timeout: Duration::from_millis(10),
            },
        );
        let decision = engine
            .check_access(
                &request(ContentType::General, midday()),
                &EvaluationFacts::default(),
            )
            .await;
        assert!(!decision.allowed);
        assert_eq!(decision.warnings, vec!["VPN detected".to_string()]);
        let appeals = decision.appeal_options.unwrap();
        assert_eq!(appeals[0].kind, AppealKind::VpnDisable);
    }

    #[tokio::test]
    async fn resolver_fault_fails_closed() {
        let engine = engine(FailingLocation, NoVpn);
        let decision = engine
            .check_access(
                &request(ContentType::General, midday()),
                &EvaluationFacts::default(),
            )
            .await;
        assert!(!decision.allowed);
        assert_eq!(decision.jurisdiction, "unknown");
        assert_eq!(decision.warnings, vec!["Technical error occurred".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn resolver_timeout_fails_closed() {
        let engine = AccessEngine::with_config(
            Arc::new(RuleStore::seeded()),
            HangingLocation,
            NoVpn,
            EngineConfig {
                collaborator_timeout: Duration::from_millis(50),
            },
        );
        let decision = engine
            .check_access(
                &request(ContentType::AdultVideo, midday()),
                &EvaluationFacts::default(),
            )
            .await;
        assert!(!decision.allowed, "timeout must never surface as allowed");
    }

    #[tokio::test]
    async fn unresolved_location_gets_default_policy() {
        let engine = engine(StaticLocation(None), NoVpn);
        let decision = engine
            .check_access(
                &request(ContentType::AdultVideo, midday()),
                &EvaluationFacts::default(),
            )
            .await;
        assert!(decision.allowed);
        assert_eq!(decision.jurisdiction, "unknown");
        assert!(decision
            .warnings
            .contains(&"Unknown jurisdiction detected".to_string()));
    }

    #[tokio::test]
    async fn banned_jurisdiction_denies_with_legal_basis() {
        let engine = engine(located("CN", None), NoVpn);
        let decision = engine
            .check_access(
                &request(ContentType::AdultVideo, midday()),
                &EvaluationFacts::default(),
            )
            .await;
        assert!(!decision.allowed);
        assert_eq!(decision.reason, "Access denied due to jurisdiction restrictions");
        assert!(decision.restrictions[0].legal_basis.contains("Cybersecurity Law"));
        // CN registers no contacts and no age requirements: manual review only.
        let appeals = decision.appeal_options.unwrap();
        assert_eq!(appeals.len(), 1);
        assert_eq!(appeals[0].kind, AppealKind::ManualReview);
    }

    #[tokio::test]
    async fn appeal_options_keep_fixed_order() {
        // Germany at 23:30 Berlin: blackout blocks, and the record carries
        // an age requirement plus a compliance contact.
        let at = chrono_tz::Europe::Berlin
            .with_ymd_and_hms(2024, 1, 15, 23, 30, 0)
            .unwrap()
            .with_timezone(&Utc);
        let engine = engine(located("DE", None), NoVpn);
        let decision = engine
            .check_access(&request(ContentType::AdultLive, at), &EvaluationFacts::default())
            .await;

        assert!(!decision.allowed);
        let kinds: Vec<AppealKind> = decision
            .appeal_options
            .unwrap()
            .iter()
            .map(|o| o.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                AppealKind::AgeVerification,
                AppealKind::LegalContact,
                AppealKind::ManualReview
            ]
        );
    }

    #[tokio::test]
    async fn warnings_synthesized_from_record() {
        let engine = engine(located("DE", None), NoVpn);
        let decision = engine
            .check_access(
                &request(ContentType::AdultVideo, midday()),
                &EvaluationFacts::default(),
            )
            .await;
        assert!(decision
            .warnings
            .contains(&"Content restricted to users 18 years and older".to_string()));
        assert!(decision
            .warnings
            .contains(&"Time-based content restrictions may apply".to_string()));
    }

    #[tokio::test]
    async fn decision_carries_requested_jurisdiction_on_fallback() {
        // Seed a US-wide record; a Texas-located request with no US-TX
        // record evaluates under it but reports the requested identifier.
        let store = Arc::new(RuleStore::empty());
        let mut us = jurisdiction_registry()
            .into_iter()
            .find(|r| r.jurisdiction.as_str() == "US-LA")
            .unwrap();
        us.region = None;
        store
            .replace(JurisdictionId::new("US").unwrap(), us)
            .unwrap();

        let engine = AccessEngine::new(store, located("US", Some("TX")), NoVpn);
        let decision = engine
            .check_access(
                &request(ContentType::AdultVideo, midday()),
                &EvaluationFacts::default(),
            )
            .await;
        assert_eq!(decision.jurisdiction, "US-TX");
        assert_eq!(decision.restrictions[0].jurisdiction, "US");
    }

    #[test]
    fn report_requires_exact_registration() {
        let engine = engine(StaticLocation(None), NoVpn);
        let start = midday();
        let end = midday() + chrono::Duration::days(30);

        let report = engine.generate_compliance_report("DE", start, end).unwrap();
        assert_eq!(report.rules.time_restrictions, 1);

        // "US" exists only as regional records; no fallback on this path.
        let err = engine.generate_compliance_report("US", start, end).unwrap_err();
        assert!(matches!(err, RuleError::NotFound { .. }));
    }
}
