//! Upstream client configuration.
//!
//! Defaults point at the production check endpoint. Override via
//! environment variables or explicit construction for staging/testing.

use url::Url;

/// Production ULEZ check endpoint.
pub const DEFAULT_CHECK_URL: &str = "https://api.motorway.co.uk/platform/v3/ulez/check";

/// Total request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection establishment sub-timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 3;

/// Configuration for connecting to the upstream check API.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Check endpoint URL.
    pub check_url: Url,
    /// Total request timeout in seconds (default: 10).
    pub timeout_secs: u64,
    /// Connect sub-timeout in seconds (default: 3).
    pub connect_timeout_secs: u64,
    /// Rotate the user agent per request (default: true). When disabled,
    /// every request carries the first agent in the pool.
    pub rotate_user_agents: bool,
}

impl UpstreamConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `ULEZ_CHECK_URL` (default: production endpoint)
    /// - `ULEZ_UPSTREAM_TIMEOUT_SECS` (default: 10)
    /// - `ULEZ_UPSTREAM_CONNECT_TIMEOUT_SECS` (default: 3)
    /// - `ULEZ_ROTATE_USER_AGENTS` (default: true; "false" disables)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            check_url: env_url("ULEZ_CHECK_URL", DEFAULT_CHECK_URL)?,
            timeout_secs: env_u64("ULEZ_UPSTREAM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
            connect_timeout_secs: env_u64(
                "ULEZ_UPSTREAM_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            ),
            rotate_user_agents: std::env::var("ULEZ_ROTATE_USER_AGENTS")
                .map(|v| v.to_lowercase() != "false")
                .unwrap_or(true),
        })
    }

    /// Create a configuration pointing at a local mock server (for tests).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the localhost URL cannot be
    /// parsed (should not occur for valid port numbers, but avoids
    /// `expect()`).
    pub fn local_mock(port: u16) -> Result<Self, ConfigError> {
        let check_url = Url::parse(&format!("http://127.0.0.1:{port}/platform/v3/ulez/check"))
            .map_err(|e| ConfigError::InvalidUrl("localhost".to_string(), e.to_string()))?;
        Ok(Self {
            check_url,
            timeout_secs: 5,
            connect_timeout_secs: 2,
            rotate_user_agents: false,
        })
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            // The literal default endpoint always parses.
            check_url: Url::parse(DEFAULT_CHECK_URL).unwrap(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            rotate_user_agents: true,
        }
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

fn env_u64(var: &str, default: u64) -> u64 {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
