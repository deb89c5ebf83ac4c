//! # Compliance Reports
//!
//! Read-only snapshot of a jurisdiction's current rule set over a date
//! range. Reports reflect exactly what is registered — the reporting path
//! applies no country fallback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use geogate_rules::{AgeRequirement, JurisdictionRule, LegalContact};

/// The date range a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Rule counts for the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCounts {
    pub content_restrictions: usize,
    pub time_restrictions: usize,
    pub payment_restrictions: usize,
}

/// Snapshot of one jurisdiction's registered rule set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// The jurisdiction reported on.
    pub jurisdiction: String,
    /// The requested reporting period.
    pub period: ReportPeriod,
    /// Counts of the record's rule lists.
    pub rules: RuleCounts,
    /// The full age requirement list, verification methods included —
    /// auditors need the shapes, not a count.
    pub age_requirements: Vec<AgeRequirement>,
    /// When the record last changed.
    pub last_updated: DateTime<Utc>,
    /// Registered legal contacts.
    pub legal_contacts: Vec<LegalContact>,
}

impl ComplianceReport {
    /// Build a snapshot of `record` for the given period.
    pub fn for_record(
        record: &JurisdictionRule,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            jurisdiction: record.jurisdiction.to_string(),
            period: ReportPeriod { start, end },
            rules: RuleCounts {
                content_restrictions: record.content_restrictions.len(),
                time_restrictions: record.time_restrictions.len(),
                payment_restrictions: record.payment_restrictions.len(),
            },
            age_requirements: record.age_requirements.clone(),
            last_updated: record.last_updated,
            legal_contacts: record.legal_contacts.clone(),
        }
    }
}
