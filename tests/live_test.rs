//! Live integration tests against the public Jikan API - ignored by default,
//! run with:
//! `cargo test --test live_test -- --ignored --test-threads=1`

use animanga::{Animanga, Season, TopAnimeFilter};

#[tokio::test]
#[ignore]
async fn test_live_top_anime() {
    let gateway = Animanga::builder().build().expect("Failed to build gateway");

    let items = gateway.top_anime(5, TopAnimeFilter::ByPopularity).await;

    assert_eq!(items.len(), 5);
    assert!(items.iter().all(|a| a.mal_id > 0 && !a.title.is_empty()));
}

#[tokio::test]
#[ignore]
async fn test_live_airing_is_japanese() {
    let gateway = Animanga::builder().build().expect("Failed to build gateway");

    let items = gateway.airing_anime(6).await;

    assert!(!items.is_empty());
    for anime in &items {
        let native = anime.title_japanese.as_deref().unwrap_or_default();
        assert!(
            animanga::shaping::has_native_japanese_script(native),
            "non-kana title slipped through: {native:?}"
        );
    }
}

#[tokio::test]
#[ignore]
async fn test_live_burst_is_throttled() {
    let gateway = Animanga::builder().build().expect("Failed to build gateway");

    // Five distinct misses in a row would trip the upstream limit without
    // spacing.
    for year in 2019..2024 {
        let items = gateway.seasonal_anime(Some(year), Some(Season::Spring), 3).await;
        assert!(!items.is_empty(), "no data for spring {year}");
    }
}

#[tokio::test]
#[ignore]
async fn test_live_anime_by_id() {
    let gateway = Animanga::builder().build().expect("Failed to build gateway");

    let bebop = gateway.anime_by_id(1).await.expect("Cowboy Bebop exists");
    assert_eq!(bebop.title, "Cowboy Bebop");
    assert!(gateway.anime_by_id(0).await.is_none());
}
