//! Manga and light-novel catalog queries.

use super::JikanGateway;
use crate::shaping::{self, LATEST_MANGA_TYPES, TOP_MANGA_TYPES};
use crate::types::{Manga, TopMangaFilter};
use crate::upstream::UpstreamRequest;

const LIGHT_NOVEL: &str = "lightnovel";

impl JikanGateway {
    /// Top manga ranked by `filter`, comic formats only.
    pub async fn top_manga(&self, limit: usize, filter: TopMangaFilter) -> Vec<Manga> {
        let request = UpstreamRequest::new("/top/manga")
            .param("limit", shaping::over_fetch(limit, 2))
            .param("filter", filter);
        let items = self.fetch_list("top_manga", &request).await;
        shaping::retain_types(items, TOP_MANGA_TYPES, limit)
    }

    /// Newest manga by start date. Manhwa, manhua and doujinshi are left out.
    pub async fn latest_manga(&self, limit: usize) -> Vec<Manga> {
        let request = UpstreamRequest::new("/manga")
            .param("order_by", "start_date")
            .param("sort", "desc")
            .param("limit", shaping::over_fetch(limit, 2));
        let items = self.fetch_list("latest_manga", &request).await;
        shaping::retain_types(items, LATEST_MANGA_TYPES, limit)
    }

    pub async fn search_manga(&self, query: &str, limit: usize) -> Vec<Manga> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let request = UpstreamRequest::new("/manga")
            .param("q", query)
            .param("limit", limit);
        self.fetch_list("search_manga", &request).await
    }

    pub async fn top_light_novels(&self, limit: usize) -> Vec<Manga> {
        let request = UpstreamRequest::new("/top/manga")
            .param("type", LIGHT_NOVEL)
            .param("limit", shaping::over_fetch(limit, 2));
        let mut items: Vec<Manga> = self.fetch_list("top_light_novels", &request).await;
        items.truncate(limit);
        items
    }

    /// Newest light novels by start date. Repeated entries are dropped, first
    /// occurrence wins.
    pub async fn latest_light_novels(&self, limit: usize) -> Vec<Manga> {
        let request = UpstreamRequest::new("/manga")
            .param("type", LIGHT_NOVEL)
            .param("order_by", "start_date")
            .param("sort", "desc")
            .param("limit", shaping::over_fetch(limit, 3));
        let items = self.fetch_list("latest_light_novels", &request).await;
        shaping::dedup_by_id(items, limit)
    }
}
