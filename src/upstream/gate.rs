//! Outbound call spacing and 429 cooldown-retry.
//!
//! The [`RateGate`] sits directly above the [`Transport`] and is the only
//! component that talks to the network. It guarantees two things:
//!
//! - consecutive upstream calls start at least `min_interval` apart;
//! - a 429 response is never returned to the caller. The gate sleeps for
//!   `cooldown` and re-issues the identical request, going through the
//!   spacing check again.
//!
//! # Serialization
//!
//! The last-issued instant lives behind a `tokio::sync::Mutex` that is held
//! across the spacing wait and the stamp, but released before the network
//! call. Concurrent callers therefore queue in FIFO order and each one starts
//! at least `min_interval` after the previous one, while slow responses do
//! not block the next caller's turn.
//!
//! # Time
//!
//! All waiting goes through `tokio::time`, so tests drive the gate on a
//! paused runtime (`#[tokio::test(start_paused = true)]`) without real
//! sleeps.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::transport::{Transport, UpstreamResponse};
use crate::telemetry;
use crate::{AnimangaError, Result};

/// Spacing and retry policy for the [`RateGate`].
///
/// Defaults match the upstream's documented budget of three requests per
/// second:
///
/// ```rust
/// # use animanga::upstream::RateGateConfig;
/// # use std::time::Duration;
/// let config = RateGateConfig::default();
/// assert_eq!(config.min_interval, Duration::from_millis(400));
/// assert_eq!(config.cooldown, Duration::from_millis(2000));
/// assert_eq!(config.max_retries, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateGateConfig {
    /// Minimum gap between the start of two upstream calls. Default: 400ms.
    pub min_interval: Duration,
    /// Pause after a 429 before re-issuing. Default: 2s.
    pub cooldown: Duration,
    /// How many 429s to absorb before giving up. `None` retries until the
    /// upstream admits the request. Default: `None`.
    pub max_retries: Option<u32>,
}

impl Default for RateGateConfig {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_millis(400),
            cooldown: Duration::from_millis(2000),
            max_retries: None,
        }
    }
}

impl RateGateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum spacing between calls.
    pub fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    /// Set the pause after a 429.
    pub fn cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Cap the number of 429 retries.
    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = Some(n);
        self
    }

    /// Retry 429s without limit.
    pub fn unbounded(mut self) -> Self {
        self.max_retries = None;
        self
    }
}

/// Serializes outbound calls and absorbs upstream rate limiting.
pub struct RateGate {
    transport: Arc<dyn Transport>,
    config: RateGateConfig,
    last_issued: Mutex<Option<Instant>>,
}

impl RateGate {
    pub fn new(transport: Arc<dyn Transport>, config: RateGateConfig) -> Self {
        Self {
            transport,
            config,
            last_issued: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &RateGateConfig {
        &self.config
    }

    /// Name of the underlying transport, as it appears in the gate's logs.
    pub fn transport_name(&self) -> &str {
        self.transport.name()
    }

    /// Issue a GET for `url`, honouring spacing and retrying 429s.
    ///
    /// Returns the first non-429 response, whatever its status. Transport
    /// errors are returned immediately without retry.
    pub async fn send(&self, url: &str) -> Result<UpstreamResponse> {
        let transport = self.transport.name();
        let mut rate_limited = 0u32;
        loop {
            self.wait_turn().await;

            let started = Instant::now();
            let response = self.transport.get(url).await?;
            metrics::histogram!(telemetry::UPSTREAM_REQUEST_DURATION_SECONDS)
                .record(started.elapsed().as_secs_f64());
            metrics::counter!(telemetry::UPSTREAM_REQUESTS_TOTAL,
                "status" => response.status.to_string(),
            )
            .increment(1);

            if !response.is_rate_limited() {
                debug!(transport, url, status = response.status, "upstream responded");
                return Ok(response);
            }

            rate_limited += 1;
            metrics::counter!(telemetry::UPSTREAM_RATE_LIMITED_TOTAL).increment(1);
            if let Some(max) = self.config.max_retries
                && rate_limited > max
            {
                warn!(transport, url, attempts = rate_limited, "giving up after repeated 429s");
                return Err(AnimangaError::RateLimited {
                    attempts: rate_limited,
                });
            }

            warn!(
                transport,
                url,
                attempt = rate_limited,
                cooldown_ms = self.config.cooldown.as_millis() as u64,
                "rate limited by upstream, cooling down"
            );
            tokio::time::sleep(self.config.cooldown).await;
        }
    }

    /// Wait until `min_interval` has passed since the previous call, then
    /// claim the slot.
    async fn wait_turn(&self) {
        let mut last = self.last_issued.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.config.min_interval {
                tokio::time::sleep(self.config.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}
