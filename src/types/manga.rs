//! Manga and light-novel records as served by the upstream.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{CatalogItem, DateRange, Genre, Images, null_as_default};

/// A manga entry. Light novels use the same shape with `type` set to
/// "Light Novel".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manga {
    pub mal_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub title_english: Option<String>,
    #[serde(default)]
    pub title_japanese: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub images: Option<Images>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub scored_by: Option<u64>,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub popularity: Option<u32>,
    #[serde(default)]
    pub members: Option<u64>,
    #[serde(default)]
    pub chapters: Option<u32>,
    #[serde(default)]
    pub volumes: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub published: Option<DateRange>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogItem for Manga {
    fn mal_id(&self) -> u64 {
        self.mal_id
    }

    fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    fn native_title(&self) -> Option<&str> {
        self.title_japanese.as_deref()
    }
}
