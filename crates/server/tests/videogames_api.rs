//! API tests for the video game query endpoints.
//!
//! Run in-process against the router, backed by a seeded SQLite catalog or
//! by the mock catalog where store failures are needed.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{fixtures, titles, TestFixture};
use gamecatalog_core::{testing::RecordedCatalogCall, CatalogError, SearchCriteria};

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_search_by_title() {
    let fixture = TestFixture::new();

    let response = fixture.get("/videogames?title=mario").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(
        response.body,
        json!([{
            "id": 1,
            "title": "Super Mario Bros",
            "developer": "Nintendo EAD",
            "publisher": "Nintendo",
            "genre": "Platformer",
            "platform": "NES",
            "release_date": "1985-09-13",
            "artwork_url": "super-mario-bros.png"
        }])
    );
}

#[tokio::test]
async fn test_search_is_case_insensitive_substring() {
    let fixture = TestFixture::new();

    let response = fixture.get("/videogames?platform=NeS").await;

    assert_status!(response, StatusCode::OK);
    // NES, Genesis and SNES all contain "nes"
    assert_eq!(
        titles(&response.body),
        vec![
            "Super Mario Bros",
            "Sonic the Hedgehog",
            "The Legend of Zelda",
            "Street Fighter II"
        ]
    );
}

#[tokio::test]
async fn test_search_filters_are_conjunctive() {
    let fixture = TestFixture::new();

    let response = fixture
        .get("/videogames?publisher=nintendo&genre=action")
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(
        titles(&response.body),
        vec!["The Legend of Zelda", "Metroid Prime"]
    );
}

#[tokio::test]
async fn test_search_without_filters_returns_whole_catalog() {
    let fixture = TestFixture::new();

    let response = fixture.get("/videogames").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(
        titles(&response.body).len(),
        fixtures::sample_catalog().len()
    );
}

#[tokio::test]
async fn test_search_blank_filters_are_ignored() {
    let fixture = TestFixture::new();

    let response = fixture
        .get("/videogames?title=&developer=%20%20&genre=shooter")
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(titles(&response.body), vec!["Half-Life"]);
}

#[tokio::test]
async fn test_search_unknown_params_are_ignored() {
    let fixture = TestFixture::new();

    let response = fixture.get("/videogames?year=1991&title=sonic").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(titles(&response.body), vec!["Sonic the Hedgehog"]);
}

#[tokio::test]
async fn test_search_no_match_returns_empty_array() {
    let fixture = TestFixture::new();

    let response = fixture.get("/videogames?developer=nobody").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_search_wildcards_match_literally() {
    let fixture = TestFixture::new();

    for query in ["title=%25", "title=_", "title=%5C"] {
        let response = fixture.get(&format!("/videogames?{}", query)).await;
        assert_status!(response, StatusCode::OK);
        assert_eq!(response.body, json!([]), "query {}", query);
    }
}

#[tokio::test]
async fn test_search_injection_attempt_is_plain_text() {
    let fixture = TestFixture::new();

    let response = fixture
        .get("/videogames?title=%27%20OR%20%271%27%3D%271")
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_search_folds_non_ascii_case() {
    let fixture = TestFixture::with_records(&[
        fixtures::game(1, "ÉCCO THE DOLPHIN"),
        fixtures::game(2, "Ecco Jr."),
    ]);

    // title=écco
    let response = fixture.get("/videogames?title=%C3%A9cco").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(titles(&response.body), vec!["ÉCCO THE DOLPHIN"]);

    // title=ÉCCO
    let response = fixture.get("/videogames?title=%C3%89CCO").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(titles(&response.body), vec!["ÉCCO THE DOLPHIN"]);
}

#[tokio::test]
async fn test_search_passes_criteria_to_store() {
    let fixture = TestFixture::with_mock();

    let response = fixture.get("/videogames?genre=Platformer&platform=nes").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(
        titles(&response.body),
        vec!["Super Mario Bros", "Sonic the Hedgehog"]
    );
    assert_eq!(
        fixture.mock().recorded_calls(),
        vec![RecordedCatalogCall::Search(SearchCriteria {
            genre: "Platformer".to_string(),
            platform: "nes".to_string(),
            ..SearchCriteria::default()
        })]
    );
}

#[tokio::test]
async fn test_search_store_failure_returns_500() {
    let fixture = TestFixture::with_mock();
    fixture.mock().set_unavailable(true);

    let response = fixture.get("/videogames?title=mario").await;

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, json!({ "error": "Internal server error" }));

    // The service keeps answering once the store recovers.
    fixture.mock().set_unavailable(false);
    let response = fixture.get("/videogames?title=mario").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(titles(&response.body), vec!["Super Mario Bros"]);
}

// =============================================================================
// Single record
// =============================================================================

#[tokio::test]
async fn test_get_videogame() {
    let fixture = TestFixture::new();

    let response = fixture.get("/videogames/5").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["title"], "Street Fighter II");
    assert_eq!(response.body["release_date"], "1991-02-06");
}

#[tokio::test]
async fn test_get_unknown_videogame_returns_404() {
    let fixture = TestFixture::new();

    let response = fixture.get("/videogames/99999").await;

    assert_status!(response, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({ "error": "Game not found: 99999" }));
}

#[tokio::test]
async fn test_get_non_numeric_id_returns_400() {
    let fixture = TestFixture::new();

    let response = fixture.get("/videogames/zelda").await;

    assert_status!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_store_failure_is_not_404() {
    let fixture = TestFixture::with_mock();
    fixture
        .mock()
        .set_next_error(CatalogError::Database("disk I/O error".to_string()));

    let response = fixture.get("/videogames/1").await;

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!response.text.contains("disk I/O"));
}

// =============================================================================
// Artwork
// =============================================================================

#[tokio::test]
async fn test_get_artwork() {
    let fixture = TestFixture::new();

    let response = fixture.get("/videogames/2/artwork").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "artworkUrl": "https://images.example.com/sonic.jpg" })
    );
}

#[tokio::test]
async fn test_get_artwork_unknown_id_returns_404() {
    let fixture = TestFixture::new();

    let response = fixture.get("/videogames/99999/artwork").await;

    assert_status!(response, StatusCode::NOT_FOUND);
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_static_artwork_is_served() {
    let fixture = TestFixture::new();

    let response = fixture.get("/images/zelda.png").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.content_type.as_deref(), Some("image/png"));
}

#[tokio::test]
async fn test_missing_static_artwork_returns_404() {
    let fixture = TestFixture::new();

    let response = fixture.get("/images/missing.png").await;

    assert_status!(response, StatusCode::NOT_FOUND);
}

// =============================================================================
// Health and metrics
// =============================================================================

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new();

    let response = fixture.get("/health").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_metrics_exposes_catalog_and_http_metrics() {
    let fixture = TestFixture::new();
    fixture.get("/videogames/1").await;

    let response = fixture.get("/metrics").await;

    assert_status!(response, StatusCode::OK);
    assert!(response.text.contains("gamecatalog_catalog_records"));
    assert!(response.text.contains("gamecatalog_catalog_queries_total"));
    assert!(response
        .text
        .contains(r#"path="/videogames/{id}""#));
}

#[tokio::test]
async fn test_metrics_paths_do_not_grow_with_requested_urls() {
    let fixture = TestFixture::new();

    for i in 0..50 {
        let response = fixture.get(&format!("/nope-{}", i)).await;
        assert_status!(response, StatusCode::NOT_FOUND);
        fixture.get(&format!("/images/missing-{}.png", i)).await;
    }
    fixture.get("/images/zelda.png").await;

    let response = fixture.get("/metrics").await;

    assert_status!(response, StatusCode::OK);
    assert!(!response.text.contains("nope-"));
    assert!(!response.text.contains("missing-"));
    assert!(!response.text.contains("zelda.png"));
    assert!(response.text.contains(r#"path="unmatched""#));
    assert!(response.text.contains(r#"path="/images""#));

    let series = response
        .text
        .lines()
        .filter(|line| line.starts_with("gamecatalog_http_requests_total{"))
        .count();
    assert!(series < 25, "{} request series", series);
}
