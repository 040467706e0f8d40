//! Tower/axum middleware for the API surface.

pub mod metrics;
