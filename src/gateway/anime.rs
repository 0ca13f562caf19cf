//! Anime catalog queries.

use chrono::Datelike;

use super::JikanGateway;
use crate::shaping;
use crate::types::{Anime, Season, TopAnimeFilter};
use crate::upstream::UpstreamRequest;

impl JikanGateway {
    /// Top anime ranked by `filter`. The upstream honours `limit` itself.
    pub async fn top_anime(&self, limit: usize, filter: TopAnimeFilter) -> Vec<Anime> {
        let request = UpstreamRequest::new("/top/anime")
            .param("limit", limit)
            .param("filter", filter);
        self.fetch_list("top_anime", &request).await
    }

    /// Currently airing anime, with foreign co-productions removed.
    ///
    /// Over-fetches three times the limit (capped at the upstream page size)
    /// because the native-script filter usually drops a few entries.
    pub async fn airing_anime(&self, limit: usize) -> Vec<Anime> {
        let request = UpstreamRequest::new("/top/anime")
            .param("filter", TopAnimeFilter::Airing)
            .param("limit", shaping::over_fetch(limit, 3));
        let items = self.fetch_list("airing_anime", &request).await;
        shaping::retain_native(items, limit)
    }

    pub async fn upcoming_anime(&self, limit: usize) -> Vec<Anime> {
        let request = UpstreamRequest::new("/seasons/upcoming").param("limit", limit);
        self.fetch_list("upcoming_anime", &request).await
    }

    /// Anime of a broadcast season; see [`resolve_season`](Self::resolve_season).
    pub async fn seasonal_anime(
        &self,
        year: Option<i32>,
        season: Option<Season>,
        limit: usize,
    ) -> Vec<Anime> {
        let (year, season) = self.resolve_season(year, season);
        let request =
            UpstreamRequest::new(format!("/seasons/{year}/{season}")).param("limit", limit);
        self.fetch_list("seasonal_anime", &request).await
    }

    /// Fill in a missing year or season from the gateway clock.
    pub fn resolve_season(&self, year: Option<i32>, season: Option<Season>) -> (i32, Season) {
        let now = self.clock().now();
        (
            year.unwrap_or_else(|| now.year()),
            season.unwrap_or_else(|| Season::at(now)),
        )
    }

    pub async fn search_anime(&self, query: &str, limit: usize) -> Vec<Anime> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let request = UpstreamRequest::new("/anime")
            .param("q", query)
            .param("limit", limit);
        self.fetch_list("search_anime", &request).await
    }

    pub async fn anime_by_id(&self, id: u64) -> Option<Anime> {
        let request = UpstreamRequest::new(format!("/anime/{id}"));
        self.fetch_item("anime_by_id", &request).await
    }
}
