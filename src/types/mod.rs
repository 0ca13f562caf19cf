//! Public types for the Animanga API.

mod anime;
mod common;
mod manga;
mod query;

pub use anime::Anime;
pub use common::{CatalogItem, DateRange, Envelope, Genre, ImageUrls, Images, Pagination};
pub use manga::Manga;
pub use query::{Season, TopAnimeFilter, TopMangaFilter};
