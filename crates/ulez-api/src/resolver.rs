//! # Compliance Resolver
//!
//! The orchestration pipeline behind both the JSON and HTML surfaces:
//!
//! ```text
//! normalize → cache lookup → upstream check (outer timeout) → cache store
//!                                   │
//!                                   └─ rate-limited / indeterminate
//!                                              → heuristic estimate
//! ```
//!
//! Two timeout layers with different fallback behavior, kept distinct on
//! purpose:
//!
//! - The client's own 10 s request timeout classifies as
//!   `Indeterminate` and falls back to the heuristic.
//! - The outer bound here (default 15 s) surfaces
//!   [`ResolveError::Timeout`] to the caller and does NOT fall back, and
//!   the failure is not cached.
//!
//! Every resolved result — upstream, not-found, or heuristic — is written
//! to the cache before returning.

use std::time::Instant;

use ulez_client::CheckOutcome;
use ulez_core::{heuristic, ComplianceResult, Vrm, VrmError};

use crate::state::AppState;

/// Resolution failures surfaced to the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Registration failed length validation; nothing was looked up.
    #[error("Invalid registration format")]
    InvalidFormat,
    /// The outer timeout elapsed before the upstream attempt resolved.
    #[error("timed out waiting for upstream check")]
    Timeout,
}

impl From<VrmError> for ResolveError {
    fn from(_: VrmError) -> Self {
        Self::InvalidFormat
    }
}

/// Resolve a raw registration to a compliance result.
///
/// Cache hits return immediately. On a miss the upstream client gets one
/// attempt bounded by the configured outer timeout; rate limits and
/// indeterminate outcomes recover via the heuristic estimator, while an
/// outer timeout aborts the attempt (the dropped future cancels the
/// underlying request) and surfaces to the caller.
pub async fn resolve(state: &AppState, raw: &str) -> Result<ComplianceResult, ResolveError> {
    let started = Instant::now();
    let vrm = Vrm::normalize(raw)?;

    if let Some(result) = state.cache.get(vrm.as_str()) {
        tracing::info!(
            registration = %vrm,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "cache hit"
        );
        return Ok(result);
    }

    let outcome = tokio::time::timeout(state.config.resolve_timeout(), state.client.check(&vrm))
        .await
        .map_err(|_| {
            tracing::error!(
                registration = %vrm,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "timeout checking compliance"
            );
            ResolveError::Timeout
        })?;

    let result = match outcome {
        CheckOutcome::Success(result) | CheckOutcome::NotFound(result) => result,
        CheckOutcome::RateLimited | CheckOutcome::Indeterminate => {
            tracing::warn!(registration = %vrm, "direct API failed, using enhanced heuristics");
            heuristic::estimate(&vrm)
        }
    };

    state.cache.put(vrm.as_str(), result.clone());
    tracing::info!(
        registration = %vrm,
        compliant = result.compliant,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "resolved"
    );
    Ok(result)
}
