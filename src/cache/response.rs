//! TTL response cache for upstream payloads.
//!
//! [`ResponseCache`] maps a resolved upstream URL to the parsed JSON body
//! and the wall-clock time it was fetched. It sits in
//! [`JikanGateway`](crate::gateway::JikanGateway) above the
//! [`RateGate`](crate::upstream::RateGate): a fresh hit never reaches the
//! gate, so it costs no upstream quota and no spacing delay.
//!
//! # Freshness
//!
//! An entry is fresh while `now - fetched_at <= ttl`. Freshness is judged
//! against an injected [`Clock`] rather than moka's internal timer, so stale
//! entries stay in the table (invisible to lookups) until a refresh
//! overwrites them. Nothing is evicted unless a capacity bound is
//! configured.
//!
//! # Failures
//!
//! A failed populate (network error, non-JSON body, retry cap hit) leaves
//! the table untouched. There is no negative caching: the next identical
//! query goes upstream again.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde_json::Value;
use tracing::{debug, warn};

use crate::Result;
use crate::clock::Clock;
use crate::telemetry;

/// Configuration for the response cache.
///
/// ```rust
/// # use animanga::cache::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .ttl(Duration::from_secs(60))
///     .max_entries(10_000);
/// assert_eq!(config.max_entries, Some(10_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum age of an entry that is still served. Default: 5 minutes.
    pub ttl: Duration,
    /// Optional LRU capacity bound. Default: `None` (unbounded).
    pub max_entries: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_entries: None,
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time-to-live for cached payloads.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Bound the number of cached payloads.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = Some(n);
        self
    }
}

/// A cached payload and when it was fetched.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub payload: Arc<Value>,
    /// Milliseconds since the Unix epoch.
    pub fetched_at_ms: i64,
}

impl CacheEntry {
    /// Whether the entry may still be served at `now_ms`.
    pub fn is_fresh(&self, now_ms: i64, ttl: Duration) -> bool {
        now_ms - self.fetched_at_ms <= ttl.as_millis() as i64
    }
}

/// In-memory response cache keyed by resolved upstream URL.
pub struct ResponseCache {
    entries: Cache<String, CacheEntry>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(config: &CacheConfig) -> Self {
        let mut builder = Cache::builder();
        if let Some(max) = config.max_entries {
            builder = builder.max_capacity(max);
        }
        Self {
            entries: builder.build(),
            ttl: config.ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Raw entry for `key`, fresh or not.
    pub async fn entry(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).await
    }

    /// Payload for `key` if it is fresh at `now_ms`.
    pub async fn get_fresh(&self, key: &str, now_ms: i64) -> Option<Arc<Value>> {
        self.entries
            .get(key)
            .await
            .filter(|entry| entry.is_fresh(now_ms, self.ttl))
            .map(|entry| entry.payload)
    }

    /// Store a payload, replacing whatever was there.
    pub async fn insert(&self, key: impl Into<String>, payload: Arc<Value>, now_ms: i64) {
        let entry = CacheEntry {
            payload,
            fetched_at_ms: now_ms,
        };
        self.entries.insert(key.into(), entry).await;
    }

    /// Serve `key` from the cache, or run `populate` and store its result.
    ///
    /// Returns `None` when the entry is absent or stale and `populate`
    /// fails. The failure is logged and counted, never propagated.
    pub async fn get_or_populate<F, Fut>(
        &self,
        key: &str,
        operation: &'static str,
        clock: &dyn Clock,
        populate: F,
    ) -> Option<Arc<Value>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value>>,
    {
        if let Some(payload) = self.get_fresh(key, clock.now_millis()).await {
            metrics::counter!(telemetry::CACHE_HITS_TOTAL, "operation" => operation).increment(1);
            debug!(operation, key, "cache hit");
            return Some(payload);
        }
        metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "operation" => operation).increment(1);
        debug!(operation, key, "cache miss");

        match populate().await {
            Ok(value) => {
                let payload = Arc::new(value);
                self.insert(key, Arc::clone(&payload), clock.now_millis())
                    .await;
                Some(payload)
            }
            Err(e) => {
                metrics::counter!(telemetry::UPSTREAM_FAILURES_TOTAL, "operation" => operation)
                    .increment(1);
                warn!(
                    operation,
                    key,
                    error = %e,
                    transient = e.is_transient(),
                    "upstream fetch failed, serving no data"
                );
                None
            }
        }
    }

    /// Number of stored entries, fresh or stale.
    pub async fn len(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
