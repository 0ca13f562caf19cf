//! The Jikan gateway client.
//!
//! [`JikanGateway`] owns one [`ResponseCache`] and one [`RateGate`]. All
//! catalog queries served by an instance share that state; separate
//! instances (e.g. one per test) share nothing.

mod anime;
mod builder;
mod manga;

pub use builder::{Animanga, GatewayBuilder};

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::ResponseCache;
use crate::clock::Clock;
use crate::traits::Catalog;
use crate::types::{Anime, Envelope, Manga, Season, TopAnimeFilter, TopMangaFilter};
use crate::upstream::{RateGate, UpstreamRequest, UpstreamResponse};
use crate::{AnimangaError, Result};

/// Gateway client for the Jikan API.
pub struct JikanGateway {
    base_url: String,
    gate: RateGate,
    cache: ResponseCache,
    clock: Arc<dyn Clock>,
}

impl JikanGateway {
    pub(crate) fn new(
        base_url: String,
        gate: RateGate,
        cache: ResponseCache,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            base_url,
            gate,
            cache,
            clock,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn rate_gate(&self) -> &RateGate {
        &self.gate
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Payload for `request`, from the cache when fresh, otherwise through
    /// the rate gate. `None` when the upstream could not provide one.
    pub async fn fetch(&self, operation: &'static str, request: &UpstreamRequest) -> Option<Arc<Value>> {
        let url = request.resolve(&self.base_url);
        let gate = &self.gate;
        let target = url.as_str();
        self.cache
            .get_or_populate(&url, operation, self.clock.as_ref(), move || async move {
                let response = gate.send(target).await?;
                payload_of(response)
            })
            .await
    }

    /// `data` array of a list endpoint, or empty. Records are decoded one
    /// at a time, in upstream order.
    async fn fetch_list<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: &UpstreamRequest,
    ) -> Vec<T> {
        self.fetch_data::<Vec<Value>>(operation, request)
            .await
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| decode_item(operation, item))
            .collect()
    }

    /// `data` record of a detail endpoint, or `None`.
    async fn fetch_item<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: &UpstreamRequest,
    ) -> Option<T> {
        let item = self.fetch_data::<Value>(operation, request).await?;
        decode_item(operation, item)
    }

    /// The envelope's `data` member, or `None`.
    async fn fetch_data<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: &UpstreamRequest,
    ) -> Option<T> {
        let payload = self.fetch(operation, request).await?;
        match Envelope::<T>::deserialize(payload.as_ref()) {
            Ok(envelope) => envelope.data,
            Err(e) => {
                warn!(operation, error = %e, "unexpected upstream payload shape");
                None
            }
        }
    }
}

/// Turn a raw response into a cacheable payload. Any JSON body is kept,
/// whatever the status, so error envelopes (e.g. a 404 for an unknown id)
/// are cached like any other answer. Bodies that are not JSON are failures
/// and never cached.
fn payload_of(response: UpstreamResponse) -> Result<Value> {
    match response.json() {
        Ok(value) => {
            if !response.is_success() {
                let message = value.get("message").and_then(Value::as_str).unwrap_or("");
                debug!(status = response.status, message, "upstream error envelope");
            }
            Ok(value)
        }
        Err(e) if response.is_success() => Err(e),
        Err(_) => Err(AnimangaError::Api {
            status: response.status,
            message: response.body.chars().take(200).collect(),
        }),
    }
}

/// Decode one catalog record. Records that do not fit the typed shape are
/// logged and skipped so the rest of the page survives.
fn decode_item<T: DeserializeOwned>(operation: &'static str, item: Value) -> Option<T> {
    let mal_id = item.get("mal_id").and_then(Value::as_u64);
    match serde_json::from_value(item) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(operation, ?mal_id, error = %e, "skipping malformed catalog record");
            None
        }
    }
}

#[async_trait]
impl Catalog for JikanGateway {
    async fn top_anime(&self, limit: usize, filter: TopAnimeFilter) -> Vec<Anime> {
        JikanGateway::top_anime(self, limit, filter).await
    }

    async fn airing_anime(&self, limit: usize) -> Vec<Anime> {
        JikanGateway::airing_anime(self, limit).await
    }

    async fn upcoming_anime(&self, limit: usize) -> Vec<Anime> {
        JikanGateway::upcoming_anime(self, limit).await
    }

    async fn seasonal_anime(
        &self,
        year: Option<i32>,
        season: Option<Season>,
        limit: usize,
    ) -> Vec<Anime> {
        JikanGateway::seasonal_anime(self, year, season, limit).await
    }

    async fn search_anime(&self, query: &str, limit: usize) -> Vec<Anime> {
        JikanGateway::search_anime(self, query, limit).await
    }

    async fn anime_by_id(&self, id: u64) -> Option<Anime> {
        JikanGateway::anime_by_id(self, id).await
    }

    async fn top_manga(&self, limit: usize, filter: TopMangaFilter) -> Vec<Manga> {
        JikanGateway::top_manga(self, limit, filter).await
    }

    async fn latest_manga(&self, limit: usize) -> Vec<Manga> {
        JikanGateway::latest_manga(self, limit).await
    }

    async fn search_manga(&self, query: &str, limit: usize) -> Vec<Manga> {
        JikanGateway::search_manga(self, query, limit).await
    }

    async fn top_light_novels(&self, limit: usize) -> Vec<Manga> {
        JikanGateway::top_light_novels(self, limit).await
    }

    async fn latest_light_novels(&self, limit: usize) -> Vec<Manga> {
        JikanGateway::latest_light_novels(self, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_is_a_payload() {
        let value = payload_of(UpstreamResponse::new(
            404,
            r#"{"status":404,"message":"Resource does not exist"}"#,
        ))
        .unwrap();
        assert_eq!(value["status"], 404);
        assert!(value.get("data").is_none());
    }

    #[test]
    fn error_status_without_json_keeps_body() {
        let err = payload_of(UpstreamResponse::new(503, "Service Unavailable")).unwrap_err();
        match &err {
            AnimangaError::Api { status, message } => {
                assert_eq!(*status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_transient());
    }

    #[test]
    fn malformed_record_is_skipped() {
        let good: Option<Anime> = decode_item("top_anime", serde_json::json!({"mal_id": 1}));
        assert_eq!(good.map(|a| a.mal_id), Some(1));
        let missing_id: Option<Anime> =
            decode_item("top_anime", serde_json::json!({"title": "No id"}));
        assert!(missing_id.is_none());
        let wrong_type: Option<Anime> =
            decode_item("top_anime", serde_json::json!({"mal_id": 2, "episodes": "unknown"}));
        assert!(wrong_type.is_none());
    }

    #[test]
    fn success_must_be_json() {
        assert!(payload_of(UpstreamResponse::new(200, r#"{"data":[]}"#)).is_ok());
        assert!(matches!(
            payload_of(UpstreamResponse::new(200, "<html>")),
            Err(AnimangaError::Json(_))
        ));
    }
}
