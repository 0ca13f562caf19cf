//! REST handlers over the [`Catalog`](crate::Catalog).

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::AppState;
use crate::types::{Season, TopAnimeFilter, TopMangaFilter};

/// Default page size for listing endpoints.
const LIST_LIMIT: usize = 12;
/// Default page size for search endpoints.
const SEARCH_LIMIT: usize = 10;

/// `{ data: [...], total: n }`
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub total: usize,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self {
            total: data.len(),
            data,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeasonalParams {
    pub limit: Option<String>,
    pub year: Option<String>,
    pub season: Option<String>,
}

/// Parse a `limit` query value. Missing, unparsable or zero values fall
/// back to `default`.
pub fn limit_or(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

pub async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Welcome to THE animanga API",
        "version": crate::PKG_VERSION,
        "endpoints": {
            "anime": "/api/anime",
            "manga": "/api/manga",
            "lightnovel": "/api/manga/lightnovel",
        },
    }))
}

pub async fn health() -> &'static str {
    "OK"
}

// ===== Anime =====

pub async fn top_anime(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    let limit = limit_or(params.limit.as_deref(), LIST_LIMIT);
    let data = state
        .catalog
        .top_anime(limit, TopAnimeFilter::ByPopularity)
        .await;
    Json(ListResponse::from(data)).into_response()
}

pub async fn airing_anime(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    let limit = limit_or(params.limit.as_deref(), LIST_LIMIT);
    Json(ListResponse::from(state.catalog.airing_anime(limit).await)).into_response()
}

pub async fn upcoming_anime(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    let limit = limit_or(params.limit.as_deref(), LIST_LIMIT);
    Json(ListResponse::from(state.catalog.upcoming_anime(limit).await)).into_response()
}

pub async fn seasonal_anime(
    State(state): State<AppState>,
    Query(params): Query<SeasonalParams>,
) -> Response {
    let limit = limit_or(params.limit.as_deref(), LIST_LIMIT);
    let year = params
        .year
        .as_deref()
        .and_then(|y| y.trim().parse::<i32>().ok())
        .filter(|y| *y > 0);
    // Unknown season names fall back to the current season.
    let season = params
        .season
        .as_deref()
        .and_then(|s| s.parse::<Season>().ok());
    let data = state.catalog.seasonal_anime(year, season, limit).await;
    Json(ListResponse::from(data)).into_response()
}

pub async fn search_anime(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let limit = limit_or(params.limit.as_deref(), SEARCH_LIMIT);
    let query = params.q.unwrap_or_default();
    Json(ListResponse::from(state.catalog.search_anime(&query, limit).await)).into_response()
}

pub async fn anime_by_id(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Ok(id) = id.parse::<u64>() else {
        return error(StatusCode::BAD_REQUEST, "Invalid anime ID");
    };
    match state.catalog.anime_by_id(id).await {
        Some(anime) => Json(json!({ "data": anime })).into_response(),
        None => error(StatusCode::NOT_FOUND, "Anime not found"),
    }
}

// ===== Manga =====

pub async fn top_manga(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    let limit = limit_or(params.limit.as_deref(), LIST_LIMIT);
    let data = state
        .catalog
        .top_manga(limit, TopMangaFilter::ByPopularity)
        .await;
    Json(ListResponse::from(data)).into_response()
}

pub async fn latest_manga(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    let limit = limit_or(params.limit.as_deref(), LIST_LIMIT);
    Json(ListResponse::from(state.catalog.latest_manga(limit).await)).into_response()
}

pub async fn search_manga(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let limit = limit_or(params.limit.as_deref(), SEARCH_LIMIT);
    let query = params.q.unwrap_or_default();
    Json(ListResponse::from(state.catalog.search_manga(&query, limit).await)).into_response()
}

pub async fn top_light_novels(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    let limit = limit_or(params.limit.as_deref(), LIST_LIMIT);
    Json(ListResponse::from(state.catalog.top_light_novels(limit).await)).into_response()
}

pub async fn latest_light_novels(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    let limit = limit_or(params.limit.as_deref(), LIST_LIMIT);
    Json(ListResponse::from(state.catalog.latest_light_novels(limit).await)).into_response()
}
