//! Validation errors for core identifiers.

/// Errors from validating core identifier types at construction time.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The jurisdiction identifier is empty or whitespace-only.
    #[error("jurisdiction identifier must be non-empty")]
    InvalidJurisdictionId,
}
