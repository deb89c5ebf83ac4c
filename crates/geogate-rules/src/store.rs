//! # Rule Store
//!
//! In-memory jurisdiction rule store backed by `DashMap`.
//!
//! The store is the shared, read-mostly structure of the engine. Records
//! are held as `Arc<JurisdictionRule>` and replaced wholesale: a reader
//! holding a snapshot keeps the record it resolved, and a concurrent
//! replacement can never expose a partially-updated record. There is no
//! in-place mutation path.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;

use geogate_core::JurisdictionId;

use crate::error::RuleError;
use crate::model::JurisdictionRule;
use crate::registry::jurisdiction_registry;

/// Shared jurisdiction rule store.
///
/// Lookups take `&str` because decision-path identifiers arrive as derived
/// strings; the typed [`JurisdictionId`] is required only on the mutation
/// path.
#[derive(Debug, Default)]
pub struct RuleStore {
    rules: DashMap<String, Arc<JurisdictionRule>>,
}

impl RuleStore {
    /// Create an empty store with no registered jurisdictions.
    pub fn empty() -> Self {
        Self {
            rules: DashMap::new(),
        }
    }

    /// Create a store seeded from the built-in
    /// [`jurisdiction_registry`](crate::jurisdiction_registry).
    pub fn seeded() -> Self {
        let store = Self::empty();
        let registry = jurisdiction_registry();
        let count = registry.len();
        for rule in registry {
            store
                .rules
                .insert(rule.jurisdiction.as_str().to_string(), Arc::new(rule));
        }
        tracing::info!(count, "loaded jurisdiction rules");
        store
    }

    /// Exact-match lookup. No fallback; used by the reporting path, which
    /// must reflect exactly what is registered.
    pub fn get(&self, jurisdiction: &str) -> Option<Arc<JurisdictionRule>> {
        self.rules.get(jurisdiction).map(|r| Arc::clone(&r))
    }

    /// Decision-path lookup with fallback: exact match first, then the
    /// country-only prefix for compound identifiers ("US-TX" → "US").
    ///
    /// `None` means "no rules", which the decision composer treats as the
    /// default-policy case, not an error. The exact → country order is
    /// load-bearing: rule authors define country-wide defaults that more
    /// specific regional records override.
    pub fn resolve(&self, jurisdiction: &str) -> Option<Arc<JurisdictionRule>> {
        if let Some(rule) = self.get(jurisdiction) {
            return Some(rule);
        }
        let (country, _) = jurisdiction.split_once('-')?;
        self.get(country)
    }

    /// Replace the whole record for a jurisdiction, the only mutation path.
    ///
    /// The record is validated first and rejected before the store is
    /// touched if malformed. `last_updated` is re-stamped with the current
    /// time regardless of the caller-supplied value, and the record's
    /// `jurisdiction` field is normalized to the key it is stored under.
    ///
    /// # Errors
    ///
    /// [`RuleError::InvalidRule`] if validation fails.
    pub fn replace(
        &self,
        jurisdiction: JurisdictionId,
        mut rule: JurisdictionRule,
    ) -> Result<(), RuleError> {
        rule.validate().map_err(|source| RuleError::InvalidRule {
            jurisdiction: jurisdiction.to_string(),
            source,
        })?;

        rule.jurisdiction = jurisdiction.clone();
        rule.last_updated = Utc::now();
        self.rules
            .insert(jurisdiction.as_str().to_string(), Arc::new(rule));
        tracing::info!(jurisdiction = %jurisdiction, "replaced jurisdiction rules");
        Ok(())
    }

    /// All registered jurisdiction identifiers, in no particular order.
    pub fn supported_jurisdictions(&self) -> Vec<String> {
        self.rules.iter().map(|r| r.key().clone()).collect()
    }

    /// Number of registered jurisdictions.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no jurisdictions are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
