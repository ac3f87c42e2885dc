//! Integration tests for `JikanClient` using wiremock HTTP mocks.

use aniscope_core::AnimeId;
use aniscope_jikan::{JikanClient, JikanError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> JikanClient {
    JikanClient::with_base_url(30, 0, base_url).expect("client construction should not fail")
}

fn review_json(username: &str, score: f64, text: &str, spoiler: bool) -> serde_json::Value {
    serde_json::json!({
        "user": { "username": username },
        "score": score,
        "review": text,
        "is_spoiler": spoiler
    })
}

fn long_text(seed: &str) -> String {
    format!("{seed} {}", "this show kept me watching every single week".repeat(2))
}

#[tokio::test]
async fn search_anime_returns_first_match_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anime"))
        .and(query_param("q", "Naruto"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{ "mal_id": 20, "title": "Naruto" }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let id = client.search_anime("Naruto").await.unwrap();
    assert_eq!(id, Some(AnimeId(20)));
}

#[tokio::test]
async fn search_anime_empty_results_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anime"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let id = client.search_anime("definitely not an anime").await.unwrap();
    assert_eq!(id, None);
}

#[tokio::test]
async fn search_anime_surfaces_non_2xx_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anime"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search_anime("Naruto").await.unwrap_err();
    assert!(matches!(
        err,
        JikanError::UnexpectedStatus { status: 500, .. }
    ));
}

#[tokio::test]
async fn search_anime_rejects_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anime"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"data\": \"nope\"}"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search_anime("Naruto").await.unwrap_err();
    assert!(matches!(err, JikanError::Deserialize { .. }));
}

#[tokio::test]
async fn collect_reviews_drops_spoilers_and_short_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anime/20/reviews"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                review_json("keeper", 9.0, &long_text("loved it."), false),
                review_json("spoiler_guy", 8.0, &long_text("the ending twist is"), true),
                review_json("terse", 7.0, "too short to keep", false),
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reviews = client.collect_reviews(AnimeId(20), 1, true).await;

    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].username, "keeper");
    assert_eq!(reviews[0].score, Some(9.0));
}

#[tokio::test]
async fn collect_reviews_keeps_spoilers_when_filter_disabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anime/20/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [review_json("spoiler_guy", 8.0, &long_text("the ending twist is"), true)]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reviews = client.collect_reviews(AnimeId(20), 1, false).await;
    assert_eq!(reviews.len(), 1);
}

#[tokio::test]
async fn collect_reviews_never_includes_short_normalized_text() {
    let server = MockServer::start().await;
    // 60 raw chars that normalize (trim) down to under the 50-char bound.
    let padded_short = format!("   {}   ", "x".repeat(44));
    Mock::given(method("GET"))
        .and(path("/anime/20/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                review_json("padded", 5.0, &padded_short, false),
                review_json("keeper", 6.0, &long_text("solid pacing."), false),
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reviews = client.collect_reviews(AnimeId(20), 1, true).await;

    assert!(reviews.iter().all(|r| r.text.chars().count() > 50));
    assert_eq!(reviews.len(), 1);
}

#[tokio::test]
async fn collect_reviews_skips_failed_page_and_keeps_partial_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anime/20/reviews"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [review_json("page_one", 9.0, &long_text("a classic."), false)]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/anime/20/reviews"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/anime/20/reviews"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [review_json("page_three", 4.0, &long_text("it fell apart late."), false)]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reviews = client.collect_reviews(AnimeId(20), 3, true).await;

    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].username, "page_one");
    assert_eq!(reviews[1].username, "page_three");
}

#[tokio::test]
async fn collect_reviews_normalizes_newlines() {
    let server = MockServer::start().await;
    let multiline = format!("first paragraph\nsecond paragraph\n{}", "filler text ".repeat(5));
    Mock::given(method("GET"))
        .and(path("/anime/20/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [review_json("writer", 7.0, &multiline, false)]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reviews = client.collect_reviews(AnimeId(20), 1, true).await;

    assert_eq!(reviews.len(), 1);
    assert!(!reviews[0].text.contains('\n'));
}
