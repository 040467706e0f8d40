//! # ulez-core — Foundational types for the ULEZ checker
//!
//! Pure domain layer with no I/O:
//!
//! - [`Vrm`] — normalized, length-validated vehicle registration mark.
//! - [`ComplianceResult`] — the single domain entity returned by every
//!   resolution path (upstream, not-found, heuristic).
//! - [`heuristic`] — deterministic compliance estimate from the UK
//!   age-identifier encoding, used when the upstream check fails.
//! - [`ResultCache`] — process-local TTL cache keyed by normalized
//!   registration.
//!
//! ## Crate Policy
//!
//! - No network, no async, no clocks other than `std::time::Instant`
//!   inside the cache.
//! - Everything here is deterministic and unit-testable in isolation.

pub mod cache;
pub mod heuristic;
pub mod result;
pub mod vrm;

pub use cache::ResultCache;
pub use result::{ComplianceResult, EmissionsValue, DAILY_CHARGE_GBP};
pub use vrm::{Vrm, VrmError};
