//! Router configuration for the HTTP server.

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;

use super::AppState;
use super::handlers;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Anime
        .route("/api/anime/top", get(handlers::top_anime))
        .route("/api/anime/airing", get(handlers::airing_anime))
        .route("/api/anime/upcoming", get(handlers::upcoming_anime))
        .route("/api/anime/seasonal", get(handlers::seasonal_anime))
        .route("/api/anime/search", get(handlers::search_anime))
        .route("/api/anime/:id", get(handlers::anime_by_id))
        // Manga
        .route("/api/manga/top", get(handlers::top_manga))
        .route("/api/manga/latest", get(handlers::latest_manga))
        .route("/api/manga/search", get(handlers::search_manga))
        // Light novels
        .route("/api/manga/lightnovel/top", get(handlers::top_light_novels))
        .route(
            "/api/manga/lightnovel/latest",
            get(handlers::latest_light_novels),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
