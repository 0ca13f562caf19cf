//! Wiremock integration tests for the reqwest transport.
//!
//! Exercises the full path through [`JikanGateway`]: URL building, HTTP
//! fetch, 429 cooldown-retry, status handling and cache population.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use animanga::upstream::{HttpTransport, RateGateConfig, Transport};
use animanga::{Animanga, JikanGateway, TopAnimeFilter};

/// Short spacing keeps real-time tests fast.
fn fast_gate() -> RateGateConfig {
    RateGateConfig::new()
        .min_interval(Duration::from_millis(10))
        .cooldown(Duration::from_millis(50))
}

fn gateway_for(server: &MockServer) -> JikanGateway {
    Animanga::builder()
        .base_url(server.uri())
        .rate_gate(fast_gate())
        .build()
        .unwrap()
}

fn sample_top_anime() -> serde_json::Value {
    json!({
        "pagination": { "last_visible_page": 1, "has_next_page": false },
        "data": [
            {
                "mal_id": 52991,
                "title": "Sousou no Frieren",
                "title_japanese": "葬送のフリーレン",
                "type": "TV",
                "score": 9.31,
                "episodes": 28,
                "images": { "jpg": { "image_url": "https://cdn.example/1.jpg" } },
                "genres": [{ "mal_id": 2, "type": "anime", "name": "Adventure" }]
            },
            {
                "mal_id": 5114,
                "title": "Fullmetal Alchemist: Brotherhood",
                "title_japanese": "鋼の錬金術師 FULLMETAL ALCHEMIST",
                "type": "TV",
                "score": 9.1
            }
        ]
    })
}

#[tokio::test]
async fn transport_reports_every_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
    let response = transport
        .get(&format!("{}/broken", server.uri()))
        .await
        .unwrap();
    assert_eq!(response.status, 503);
    assert_eq!(response.body, "down");
}

#[tokio::test]
async fn transport_sends_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", animanga::version::USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
    let response = transport.get(&server.uri()).await.unwrap();
    assert!(response.is_success());
}

#[tokio::test]
async fn built_gateway_uses_http_transport() {
    let server = MockServer::start().await;
    let gateway = gateway_for(&server);
    assert_eq!(gateway.rate_gate().transport_name(), "http");
}

#[tokio::test]
async fn unreachable_upstream_is_an_http_error() {
    let transport = HttpTransport::new(Duration::from_secs(1)).unwrap();
    let err = transport.get("http://127.0.0.1:1/anime").await.unwrap_err();
    assert!(err.is_transient());
}

#[tokio::test]
async fn top_anime_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top/anime"))
        .and(query_param("limit", "2"))
        .and(query_param("filter", "bypopularity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_top_anime()))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let first = gateway.top_anime(2, TopAnimeFilter::ByPopularity).await;
    let second = gateway.top_anime(2, TopAnimeFilter::ByPopularity).await;

    assert_eq!(first.len(), 2);
    assert_eq!(first[0].title, "Sousou no Frieren");
    assert_eq!(first[0].score, Some(9.31));
    assert_eq!(first[0].genres[0].name, "Adventure");
    assert_eq!(first, second);
    // `expect(1)` is verified when the server drops.
}

#[tokio::test]
async fn search_query_is_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anime"))
        .and(query_param("q", "shingeki no kyojin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    assert!(gateway.search_anime("shingeki no kyojin", 10).await.is_empty());
}

#[tokio::test]
async fn rate_limited_requests_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top/anime"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "status": 429,
            "type": "RateLimitException",
            "message": "You are being rate-limited."
        })))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/top/anime"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_top_anime()))
        .with_priority(2)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let started = std::time::Instant::now();
    let items = gateway.top_anime(2, TopAnimeFilter::ByPopularity).await;

    assert_eq!(items.len(), 2);
    assert!(started.elapsed() >= Duration::from_millis(100));
    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 3);
}

#[tokio::test]
async fn not_found_maps_to_none_and_is_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anime/0"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": 404,
            "type": "BadResponseException",
            "message": "Resource does not exist"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    assert!(gateway.anime_by_id(0).await.is_none());
    assert!(gateway.anime_by_id(0).await.is_none());
}

#[tokio::test]
async fn server_error_yields_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    assert!(gateway.latest_manga(5).await.is_empty());
    assert!(gateway.cache().is_empty().await);
}
