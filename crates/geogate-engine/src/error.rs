//! Engine error types.
//!
//! Every variant here is an internal fault of the decision path. None of
//! them escape [`check_access`](crate::AccessEngine::check_access): the
//! top-level wrapper converts them all into the fail-closed deny decision.

use crate::collaborators::CollaboratorError;

/// Faults encountered while producing a decision.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A collaborator call returned an error.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    /// A collaborator call exceeded the configured timeout. Treated
    /// identically to any other evaluation fault; no retry is attempted.
    #[error("{service} call timed out after {timeout_ms}ms")]
    Timeout {
        /// Which collaborator timed out.
        service: &'static str,
        /// The configured timeout that elapsed.
        timeout_ms: u64,
    },

    /// Rule evaluation hit a malformed stored value (unparseable window
    /// boundary or timezone). Validation keeps these out of the store;
    /// this covers records seeded or deserialized around it.
    #[error("rule evaluation failed: {reason}")]
    Evaluation {
        /// Human-readable description of the fault.
        reason: String,
    },
}
