//! Core Catalog trait

use async_trait::async_trait;

use crate::types::{Anime, Manga, Season, TopAnimeFilter, TopMangaFilter};

/// Read-only catalog queries.
///
/// Every list operation returns an empty `Vec` when the upstream cannot
/// answer, and [`anime_by_id`](Catalog::anime_by_id) returns `None`. Callers
/// treat "no data" as a normal outcome; failures are logged by the
/// implementation, never surfaced.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Top anime ranked by `filter`, as ordered upstream.
    async fn top_anime(&self, limit: usize, filter: TopAnimeFilter) -> Vec<Anime>;

    /// Currently airing anime, restricted to Japanese productions.
    async fn airing_anime(&self, limit: usize) -> Vec<Anime>;

    /// Anime announced for upcoming seasons.
    async fn upcoming_anime(&self, limit: usize) -> Vec<Anime>;

    /// Anime of a broadcast season. Missing year or season resolve to the
    /// current one.
    async fn seasonal_anime(
        &self,
        year: Option<i32>,
        season: Option<Season>,
        limit: usize,
    ) -> Vec<Anime>;

    /// Free-text anime search. A blank query returns nothing.
    async fn search_anime(&self, query: &str, limit: usize) -> Vec<Anime>;

    /// A single anime by MyAnimeList id.
    async fn anime_by_id(&self, id: u64) -> Option<Anime>;

    /// Top manga ranked by `filter`, restricted to comic formats.
    async fn top_manga(&self, limit: usize, filter: TopMangaFilter) -> Vec<Manga>;

    /// Most recently started manga and one-shots.
    async fn latest_manga(&self, limit: usize) -> Vec<Manga>;

    /// Free-text manga search. A blank query returns nothing.
    async fn search_manga(&self, query: &str, limit: usize) -> Vec<Manga>;

    /// Top light novels.
    async fn top_light_novels(&self, limit: usize) -> Vec<Manga>;

    /// Most recently started light novels, without duplicate entries.
    async fn latest_light_novels(&self, limit: usize) -> Vec<Manga>;
}
