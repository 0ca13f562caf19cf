//! Transport seam between the rate gate and the network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::{AnimangaError, Result};

/// Status code the upstream uses to signal rate limiting.
pub const TOO_MANY_REQUESTS: u16 = 429;

/// A raw upstream response. The body is kept as text; parsing happens at the
/// cache boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the upstream rejected the call with 429.
    pub fn is_rate_limited(&self) -> bool {
        self.status == TOO_MANY_REQUESTS
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON, whatever the status.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Issues a single GET. Implementations must not retry or throttle; that is
/// the rate gate's job.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Fetch `url`. Network-level failures are errors; every HTTP status,
    /// including 4xx/5xx, is a successful [`UpstreamResponse`].
    async fn get(&self, url: &str) -> Result<UpstreamResponse>;
}

/// reqwest-backed transport.
#[derive(Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Build a transport whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(crate::version::USER_AGENT)
            .build()
            .map_err(|e| {
                AnimangaError::Configuration(format!("failed to build HTTP client: {e}"))
            })?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn get(&self, url: &str) -> Result<UpstreamResponse> {
        let response = self.http.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(UpstreamResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_statuses() {
        assert!(UpstreamResponse::new(429, "").is_rate_limited());
        assert!(!UpstreamResponse::new(500, "").is_rate_limited());
        assert!(UpstreamResponse::new(204, "").is_success());
        assert!(!UpstreamResponse::new(404, "").is_success());
    }

    #[test]
    fn json_parses_error_bodies_too() {
        let resp = UpstreamResponse::new(404, r#"{"status":404,"message":"Resource does not exist"}"#);
        let value = resp.json().unwrap();
        assert_eq!(value["status"], 404);
    }

    #[test]
    fn json_rejects_html() {
        let resp = UpstreamResponse::new(502, "<html>Bad Gateway</html>");
        assert!(matches!(resp.json(), Err(AnimangaError::Json(_))));
    }
}
