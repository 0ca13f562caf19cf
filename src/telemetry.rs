//! Telemetry metric name constants.
//!
//! Centralised metric names for animanga operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `animanga_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `operation`: catalog query that needed the payload (e.g. "airing_anime")
//! - `status`: upstream HTTP status code as a string

/// Total upstream calls issued by the rate gate, including 429 retries.
///
/// Labels: `status`.
pub const UPSTREAM_REQUESTS_TOTAL: &str = "animanga_upstream_requests_total";

/// Upstream call duration in seconds (network time only, not spacing waits).
pub const UPSTREAM_REQUEST_DURATION_SECONDS: &str = "animanga_upstream_request_duration_seconds";

/// Total 429 responses absorbed by the rate gate.
pub const UPSTREAM_RATE_LIMITED_TOTAL: &str = "animanga_upstream_rate_limited_total";

/// Total populate failures swallowed at the cache boundary.
///
/// Labels: `operation`.
pub const UPSTREAM_FAILURES_TOTAL: &str = "animanga_upstream_failures_total";

/// Total fresh cache hits.
///
/// Labels: `operation`.
pub const CACHE_HITS_TOTAL: &str = "animanga_cache_hits_total";

/// Total cache misses (absent or stale entries).
///
/// Labels: `operation`.
pub const CACHE_MISSES_TOTAL: &str = "animanga_cache_misses_total";
