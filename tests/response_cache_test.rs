//! Tests for [`ResponseCache`]: TTL cache of upstream payloads keyed by URL.

use std::cell::Cell;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use animanga::AnimangaError;
use animanga::cache::{CacheConfig, ResponseCache};
use animanga::clock::{Clock, ManualClock};

const KEY: &str = "https://api.jikan.moe/v4/top/anime?limit=5";

// =========================================================================
// CacheConfig
// =========================================================================

#[test]
fn cache_config_defaults() {
    let config = CacheConfig::default();
    assert_eq!(config.ttl, Duration::from_secs(300));
    assert_eq!(config.max_entries, None);
}

#[test]
fn cache_config_builder() {
    let config = CacheConfig::new()
        .max_entries(500)
        .ttl(Duration::from_secs(60));
    assert_eq!(config.max_entries, Some(500));
    assert_eq!(config.ttl, Duration::from_secs(60));
}

// =========================================================================
// Direct access
// =========================================================================

#[tokio::test]
async fn miss_then_hit() {
    let cache = ResponseCache::new(&CacheConfig::default());

    assert!(cache.get_fresh(KEY, 0).await.is_none());

    let payload = Arc::new(json!({ "data": [] }));
    cache.insert(KEY, Arc::clone(&payload), 1_000).await;

    let hit = cache.get_fresh(KEY, 2_000).await.unwrap();
    assert!(Arc::ptr_eq(&hit, &payload));
}

#[tokio::test]
async fn freshness_boundary_is_inclusive() {
    let cache = ResponseCache::new(&CacheConfig::new().ttl(Duration::from_millis(100)));
    cache.insert(KEY, Arc::new(json!(1)), 1_000).await;

    assert!(cache.get_fresh(KEY, 1_100).await.is_some());
    assert!(cache.get_fresh(KEY, 1_101).await.is_none());
    // Stale entries are kept until replaced.
    assert!(cache.entry(KEY).await.is_some());
}

#[tokio::test]
async fn insert_replaces_entry() {
    let cache = ResponseCache::new(&CacheConfig::default());
    cache.insert(KEY, Arc::new(json!("old")), 0).await;
    cache.insert(KEY, Arc::new(json!("new")), 10).await;

    let entry = cache.entry(KEY).await.unwrap();
    assert_eq!(*entry.payload, json!("new"));
    assert_eq!(entry.fetched_at_ms, 10);
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn keys_are_exact() {
    let cache = ResponseCache::new(&CacheConfig::default());
    cache.insert(KEY, Arc::new(json!(1)), 0).await;

    assert!(cache.get_fresh(&format!("{KEY}&page=2"), 0).await.is_none());
    assert!(cache.get_fresh(KEY, 0).await.is_some());
}

// =========================================================================
// get_or_populate
// =========================================================================

#[tokio::test]
async fn populate_runs_once_while_fresh() {
    let cache = ResponseCache::new(&CacheConfig::default());
    let clock = ManualClock::from_millis(0);
    let calls = Cell::new(0);

    for _ in 0..3 {
        let payload = cache
            .get_or_populate(KEY, "top_anime", &clock, || async {
                calls.set(calls.get() + 1);
                Ok(json!({ "data": [1, 2] }))
            })
            .await
            .unwrap();
        assert_eq!(payload["data"][1], 2);
        clock.advance(Duration::from_secs(60));
    }

    assert_eq!(calls.get(), 1);
}

#[tokio::test]
async fn stale_entry_is_refreshed_at_current_time() {
    let cache = ResponseCache::new(&CacheConfig::default());
    let clock = ManualClock::from_millis(0);

    cache
        .get_or_populate(KEY, "top_anime", &clock, || async { Ok(json!("v1")) })
        .await;
    clock.advance(Duration::from_secs(301));
    let refreshed = cache
        .get_or_populate(KEY, "top_anime", &clock, || async { Ok(json!("v2")) })
        .await
        .unwrap();

    assert_eq!(*refreshed, json!("v2"));
    let entry = cache.entry(KEY).await.unwrap();
    assert_eq!(entry.fetched_at_ms, clock.now_millis());
}

#[tokio::test]
async fn failed_populate_stores_nothing() {
    let cache = ResponseCache::new(&CacheConfig::default());
    let clock = ManualClock::from_millis(0);

    let result = cache
        .get_or_populate(KEY, "top_anime", &clock, || async {
            Err(AnimangaError::Api {
                status: 503,
                message: "unavailable".into(),
            })
        })
        .await;

    assert!(result.is_none());
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn failed_refresh_keeps_stale_entry_but_serves_nothing() {
    let cache = ResponseCache::new(&CacheConfig::default());
    let clock = ManualClock::from_millis(0);

    cache
        .get_or_populate(KEY, "top_anime", &clock, || async { Ok(json!("v1")) })
        .await;
    clock.advance(Duration::from_secs(400));
    let result = cache
        .get_or_populate(KEY, "top_anime", &clock, || async {
            Err(AnimangaError::Http("timeout".into()))
        })
        .await;

    assert!(result.is_none());
    assert_eq!(*cache.entry(KEY).await.unwrap().payload, json!("v1"));
}

#[tokio::test]
async fn capacity_bound_evicts() {
    let cache = ResponseCache::new(&CacheConfig::new().max_entries(2));
    for i in 0..20 {
        cache.insert(format!("{KEY}&n={i}"), Arc::new(json!(i)), 0).await;
    }
    assert!(cache.len().await <= 2);
}
