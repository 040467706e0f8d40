//! # Application State & Configuration
//!
//! One [`AppState`] is constructed per process and handed to the router;
//! the cache and upstream client are injected components, not module
//! globals, so tests can build states against mock upstreams.

use std::sync::Arc;
use std::time::Duration;

use ulez_client::{CheckClient, ClientError, UpstreamConfig};
use ulez_core::ResultCache;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 5005;

/// Default orchestration-level timeout around one upstream attempt.
pub const DEFAULT_RESOLVE_TIMEOUT_SECS: u64 = 15;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen port for the HTTP server.
    pub port: u16,
    /// Result cache entry lifetime in seconds.
    pub cache_ttl_secs: u64,
    /// Outer bound on one upstream attempt, in seconds. Distinct from
    /// the client's own request timeout — this is the orchestration
    /// layer's safety margin.
    pub resolve_timeout_secs: u64,
    /// Upstream client configuration.
    pub upstream: UpstreamConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 5005)
    /// - `ULEZ_CACHE_TTL_SECS` (default: 3600)
    /// - `ULEZ_RESOLVE_TIMEOUT_SECS` (default: 15)
    /// - plus the `ULEZ_CHECK_URL` / `ULEZ_UPSTREAM_*` /
    ///   `ULEZ_ROTATE_USER_AGENTS` variables read by
    ///   [`UpstreamConfig::from_env`].
    pub fn from_env() -> Result<Self, ulez_client::config::ConfigError> {
        Ok(Self {
            port: env_parsed("PORT", DEFAULT_PORT),
            cache_ttl_secs: env_parsed(
                "ULEZ_CACHE_TTL_SECS",
                ulez_core::cache::DEFAULT_TTL.as_secs(),
            ),
            resolve_timeout_secs: env_parsed(
                "ULEZ_RESOLVE_TIMEOUT_SECS",
                DEFAULT_RESOLVE_TIMEOUT_SECS,
            ),
            upstream: UpstreamConfig::from_env()?,
        })
    }

    /// The outer resolve timeout as a [`Duration`].
    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_secs(self.resolve_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cache_ttl_secs: ulez_core::cache::DEFAULT_TTL.as_secs(),
            resolve_timeout_secs: DEFAULT_RESOLVE_TIMEOUT_SECS,
            upstream: UpstreamConfig::default(),
        }
    }
}

fn env_parsed<T: std::str::FromStr>(var: &str, default: T) -> T {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Shared application state passed to all route handlers.
///
/// Cheaply cloneable — all clones share the same cache and client.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub cache: ResultCache,
    pub client: CheckClient,
}

impl AppState {
    /// Build the state from configuration, constructing the upstream
    /// client and an empty cache.
    pub fn with_config(config: AppConfig) -> Result<Self, ClientError> {
        let cache = ResultCache::with_ttl(Duration::from_secs(config.cache_ttl_secs));
        let client = CheckClient::new(config.upstream.clone())?;
        Ok(Self {
            config: Arc::new(config),
            cache,
            client,
        })
    }

    /// Default-configured state (production endpoint, one-hour TTL).
    pub fn new() -> Result<Self, ClientError> {
        Self::with_config(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = AppConfig::default();
        assert_eq!(config.port, 5005);
        assert_eq!(config.cache_ttl_secs, 3600);
        assert_eq!(config.resolve_timeout_secs, 15);
    }

    #[test]
    fn state_builds_from_default_config() {
        let state = AppState::new().unwrap();
        assert!(state.cache.is_empty());
        assert_eq!(state.config.resolve_timeout(), Duration::from_secs(15));
    }
}
