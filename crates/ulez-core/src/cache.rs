//! # Result Cache
//!
//! Process-local TTL cache keyed by normalized registration. Entries are
//! evicted lazily: an expired entry is removed by the `get` that finds
//! it. There is no size bound — the cache lives for the process lifetime
//! only and is replaced wholesale on re-resolution.
//!
//! Storage is a sharded `DashMap` behind an `Arc`, so the handle is
//! cheaply cloneable and safe under concurrent readers and writers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::result::ComplianceResult;

/// Default entry lifetime: one hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// A cached result and the instant it was stored.
#[derive(Debug, Clone)]
struct CacheEntry {
    result: ComplianceResult,
    inserted_at: Instant,
}

/// Shared TTL cache of resolved compliance results.
///
/// Cheaply cloneable — all clones share the same entries.
#[derive(Debug, Clone)]
pub struct ResultCache {
    entries: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl ResultCache {
    /// Create a cache with the default one-hour TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Create a cache with an explicit TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Look up a fresh result. An expired entry is removed and reported
    /// as absent.
    pub fn get(&self, key: &str) -> Option<ComplianceResult> {
        let expired = match self.entries.get(key) {
            Some(entry) => {
                if entry.inserted_at.elapsed() < self.ttl {
                    return Some(entry.result.clone());
                }
                true
            }
            None => false,
        };
        if expired {
            self.entries.remove(key);
        }
        None
    }

    /// Store a result, overwriting any prior entry for the key.
    pub fn put(&self, key: impl Into<String>, result: ComplianceResult) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                result,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Number of entries currently held (including not-yet-evicted
    /// expired ones).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of the cached registration keys, for the stats endpoint.
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.key().clone()).collect()
    }

    /// The configured entry lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(registration: &str) -> ComplianceResult {
        ComplianceResult {
            registration: registration.to_string(),
            compliant: true,
            make_model: Some("Toyota Prius".to_string()),
            year: Some(2019),
            engine_category: Some("Euro 6".to_string()),
            co2_emissions: None,
            charge: None,
            message: None,
        }
    }

    #[test]
    fn round_trip_within_ttl() {
        let cache = ResultCache::new();
        cache.put("AB12CDE", sample("AB12CDE"));
        assert_eq!(cache.get("AB12CDE"), Some(sample("AB12CDE")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn miss_on_unknown_key() {
        let cache = ResultCache::new();
        assert_eq!(cache.get("ZZ99ZZZ"), None);
    }

    #[test]
    fn expired_entry_is_removed_on_read() {
        let cache = ResultCache::with_ttl(Duration::from_millis(10));
        cache.put("AB12CDE", sample("AB12CDE"));
        std::thread::sleep(Duration::from_millis(25));
        assert_eq!(cache.get("AB12CDE"), None);
        assert_eq!(cache.len(), 0, "expired entry must be evicted by get");
    }

    #[test]
    fn put_overwrites() {
        let cache = ResultCache::new();
        cache.put("AB12CDE", sample("AB12CDE"));
        let mut updated = sample("AB12CDE");
        updated.year = Some(2020);
        cache.put("AB12CDE", updated.clone());
        assert_eq!(cache.get("AB12CDE"), Some(updated));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_lists_cached_registrations() {
        let cache = ResultCache::new();
        cache.put("AB12CDE", sample("AB12CDE"));
        cache.put("WO15CZY", sample("WO15CZY"));
        let mut keys = cache.keys();
        keys.sort();
        assert_eq!(keys, vec!["AB12CDE".to_string(), "WO15CZY".to_string()]);
    }

    #[test]
    fn concurrent_writes_same_key() {
        let cache = ResultCache::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    let mut result = sample("AB12CDE");
                    result.year = Some(2010 + i);
                    cache.put("AB12CDE", result);
                    cache.get("AB12CDE")
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().is_some());
        }
        assert_eq!(cache.len(), 1);
    }
}
