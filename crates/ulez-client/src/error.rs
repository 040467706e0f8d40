//! Upstream client error types.
//!
//! Only construction can fail. Request-path failures never surface as
//! errors — they classify into [`crate::CheckOutcome`] variants so the
//! resolver can decide whether to fall back.

/// Errors building the upstream client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
