//! # Collaborator Trait Boundaries
//!
//! The two external I/O dependencies of the decision path: IP-to-location
//! resolution and VPN/proxy detection. The engine does not implement
//! either — deployments wire in their provider clients behind these
//! traits, and tests wire in canned implementations.
//!
//! ## Contract
//!
//! Implementations must be `Send + Sync` so the engine can be shared
//! across async tasks behind an `Arc`. Each call is bounded by the
//! engine's configured timeout; a timeout or an `Err` is an evaluation
//! fault and fails closed. A location resolver returning `Ok(None)` is a
//! *successful* "could not place this IP" outcome and maps to the unknown
//! jurisdiction, not to a deny.

use std::future::Future;

use geogate_core::{ResolvedLocation, VpnDetection};

/// Errors from collaborator calls.
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    /// The underlying provider is unreachable or returned a transport
    /// error.
    #[error("{service} unavailable: {reason}")]
    Unavailable {
        /// Which collaborator failed.
        service: &'static str,
        /// Human-readable reason for the failure.
        reason: String,
    },
}

/// Resolves an origin IP to a geographic location.
pub trait LocationResolver: Send + Sync {
    /// Resolve `ip` to a location.
    ///
    /// `Ok(None)` means the resolver succeeded but could not place the IP;
    /// the engine treats that as the unknown jurisdiction.
    fn resolve(
        &self,
        ip: &str,
    ) -> impl Future<Output = Result<Option<ResolvedLocation>, CollaboratorError>> + Send;
}

/// Detects whether an origin IP is a VPN or proxy exit.
pub trait VpnDetector: Send + Sync {
    /// Check `ip` against the detector's VPN/proxy intelligence.
    fn detect(
        &self,
        ip: &str,
    ) -> impl Future<Output = Result<VpnDetection, CollaboratorError>> + Send;
}
