//! Builder for configuring gateway instances

use std::sync::Arc;
use std::time::Duration;

use super::JikanGateway;
use crate::cache::{CacheConfig, ResponseCache};
use crate::clock::{Clock, SystemClock};
use crate::upstream::{DEFAULT_BASE_URL, HttpTransport, RateGate, RateGateConfig, Transport};
use crate::{AnimangaError, Result};

/// Default per-request HTTP timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Main entry point for creating gateway instances.
pub struct Animanga;

impl Animanga {
    /// Create a new builder for configuring the gateway.
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::new()
    }
}

/// Builder for configuring gateway instances.
///
/// ```rust
/// # use animanga::Animanga;
/// # use animanga::cache::CacheConfig;
/// # use std::time::Duration;
/// let gateway = Animanga::builder()
///     .cache(CacheConfig::new().ttl(Duration::from_secs(60)))
///     .build()
///     .unwrap();
/// assert_eq!(gateway.base_url(), "https://api.jikan.moe/v4");
/// ```
pub struct GatewayBuilder {
    base_url: String,
    timeout: Duration,
    rate_gate: RateGateConfig,
    cache: CacheConfig,
    clock: Option<Arc<dyn Clock>>,
    transport: Option<Arc<dyn Transport>>,
}

impl GatewayBuilder {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            rate_gate: RateGateConfig::default(),
            cache: CacheConfig::default(),
            clock: None,
            transport: None,
        }
    }

    /// Point the gateway at a different upstream (e.g. a wiremock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the HTTP timeout for each upstream call.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set spacing and 429 retry policy.
    pub fn rate_gate(mut self, config: RateGateConfig) -> Self {
        self.rate_gate = config;
        self
    }

    /// Set cache TTL and capacity.
    pub fn cache(mut self, config: CacheConfig) -> Self {
        self.cache = config;
        self
    }

    /// Use a custom clock for cache freshness and season resolution.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Use a custom transport instead of the reqwest client.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the gateway.
    pub fn build(self) -> Result<JikanGateway> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url).map_err(|e| {
            AnimangaError::Configuration(format!("invalid base URL {base_url:?}: {e}"))
        })?;

        if self.rate_gate.min_interval.is_zero() {
            tracing::warn!("rate gate spacing disabled; upstream quota is unprotected");
        }

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(self.timeout)?),
        };
        let clock: Arc<dyn Clock> = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        Ok(JikanGateway::new(
            base_url,
            RateGate::new(transport, self.rate_gate),
            ResponseCache::new(&self.cache),
            clock,
        ))
    }
}

impl Default for GatewayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparsable_base_url() {
        let result = Animanga::builder().base_url("not a url").build();
        assert!(matches!(result, Err(AnimangaError::Configuration(_))));
    }

    #[test]
    fn trims_trailing_slash() {
        let gateway = Animanga::builder()
            .base_url("http://localhost:8080/v4/")
            .build()
            .unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:8080/v4");
    }

    #[test]
    fn carries_rate_gate_config() {
        let gateway = Animanga::builder()
            .rate_gate(RateGateConfig::new().max_retries(2))
            .build()
            .unwrap();
        assert_eq!(gateway.rate_gate().config().max_retries, Some(2));
        assert_eq!(gateway.cache().ttl(), Duration::from_secs(300));
    }
}
