//! Animanga - Rate-limited, cached gateway to the Jikan anime/manga API
//!
//! This crate provides a stable `Catalog` trait over the public Jikan v4
//! API. Every upstream call passes through one shared [`RateGate`]
//! (minimum spacing between calls, cooldown and retry on HTTP 429) and one
//! shared [`ResponseCache`] keyed by the resolved request URL.
//!
//! Catalog queries never fail: when the upstream cannot answer they yield
//! an empty list (or `None` for a single title) and log the cause.
//!
//! # Example
//!
//! ```rust,no_run
//! use animanga::{Animanga, TopAnimeFilter};
//!
//! #[tokio::main]
//! async fn main() -> animanga::Result<()> {
//!     let gateway = Animanga::builder().build()?;
//!
//!     for anime in gateway.top_anime(5, TopAnimeFilter::ByPopularity).await {
//!         println!("{} ({:?})", anime.title, anime.score);
//!     }
//!
//!     let airing = gateway.airing_anime(12).await;
//!     println!("{} Japanese titles airing", airing.len());
//!     Ok(())
//! }
//! ```
//!
//! # HTTP server (requires `server` feature)
//!
//! The `animangad` binary exposes the catalog as a JSON REST API; see
//! [`server`].
//!
//! [`RateGate`]: upstream::RateGate
//! [`ResponseCache`]: cache::ResponseCache

pub mod cache;
pub mod clock;
pub mod error;
pub mod gateway;
#[cfg(feature = "server")]
pub mod server;
pub mod shaping;
pub mod telemetry;
pub mod traits;
pub mod types;
pub mod upstream;
pub mod version;

// Re-export main types at crate root
pub use error::{AnimangaError, Result};
pub use gateway::{Animanga, GatewayBuilder, JikanGateway};
pub use traits::Catalog;
pub use version::PKG_VERSION;

// Re-export all types
pub use types::{
    Anime, CatalogItem, DateRange, Envelope, Genre, ImageUrls, Images, Manga, Pagination, Season,
    TopAnimeFilter, TopMangaFilter,
};
