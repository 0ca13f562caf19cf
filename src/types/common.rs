//! Shapes shared by anime and manga records, and the upstream envelope.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Upstream response wrapper: `{ "data": ..., "pagination": {...} }`.
///
/// `data` is optional because error bodies (`{"status": 404, ...}`) share
/// the same endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Pagination block on list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub last_visible_page: Option<u32>,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub current_page: Option<u32>,
}

/// Image URLs in one format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrls {
    pub image_url: Option<String>,
    pub small_image_url: Option<String>,
    pub large_image_url: Option<String>,
}

/// Cover art in the formats the upstream serves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Images {
    #[serde(default)]
    pub jpg: Option<ImageUrls>,
    #[serde(default)]
    pub webp: Option<ImageUrls>,
}

/// A genre (or theme/demographic) reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub mal_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Start/end of an airing or publication run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Treat an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Fields the shaping rules read. Everything else on a record is carried
/// through untouched.
pub trait CatalogItem {
    /// MyAnimeList identifier.
    fn mal_id(&self) -> u64;
    /// Media format (e.g. "TV", "ONA", "Manga", "Light Novel").
    fn kind(&self) -> Option<&str>;
    /// Title in the source-language script.
    fn native_title(&self) -> Option<&str>;
}
