//! Route-level tests driving the router with in-memory state and a
//! canned catalog.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use catalog::{
    Catalog, ContentDetails, ContentSummary, ContentType, Credits, DiscoverFilters, GenreTag,
    Page, SeasonDetails, TimeWindow,
};
use serde_json::{json, Value};
use server::{create_router, AppState};
use std::sync::Arc;
use tower::ServiceExt;

/// Catalog with one fixed trending/popular listing and nothing else.
struct CannedCatalog;

fn listing() -> Page<ContentSummary> {
    Page {
        results: (1..=10)
            .map(|id| ContentSummary {
                id,
                title: Some(format!("Movie {id}")),
                popularity: 42.0,
                vote_average: 7.5,
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

#[async_trait]
impl Catalog for CannedCatalog {
    async fn search(
        &self,
        _query: &str,
        _content_type: ContentType,
        _page: u32,
    ) -> catalog::Result<Page<ContentSummary>> {
        Ok(Page::default())
    }

    async fn details(
        &self,
        content_id: u64,
        _content_type: ContentType,
    ) -> catalog::Result<ContentDetails> {
        Err(catalog::CatalogError::Status {
            endpoint: format!("movie/{content_id}"),
            status: 404,
        })
    }

    async fn credits(
        &self,
        content_id: u64,
        _content_type: ContentType,
    ) -> catalog::Result<Credits> {
        Err(catalog::CatalogError::Status {
            endpoint: format!("movie/{content_id}/credits"),
            status: 404,
        })
    }

    async fn trending(
        &self,
        content_type: ContentType,
        _window: TimeWindow,
    ) -> catalog::Result<Page<ContentSummary>> {
        Ok(match content_type {
            ContentType::Movie => listing(),
            ContentType::Tv => Page::default(),
        })
    }

    async fn popular(
        &self,
        content_type: ContentType,
        _page: u32,
    ) -> catalog::Result<Page<ContentSummary>> {
        Ok(match content_type {
            ContentType::Movie => listing(),
            ContentType::Tv => Page::default(),
        })
    }

    async fn top_rated(
        &self,
        _content_type: ContentType,
        _page: u32,
    ) -> catalog::Result<Page<ContentSummary>> {
        Ok(Page::default())
    }

    async fn genres(&self, _content_type: ContentType) -> catalog::Result<Vec<GenreTag>> {
        Ok(Vec::new())
    }

    async fn season_details(
        &self,
        _show_id: u64,
        _season_number: u32,
    ) -> catalog::Result<SeasonDetails> {
        Ok(SeasonDetails::default())
    }

    async fn discover(
        &self,
        _content_type: ContentType,
        _filters: &DiscoverFilters,
    ) -> catalog::Result<Page<ContentSummary>> {
        Ok(Page::default())
    }
}

fn test_app() -> Router {
    create_router(AppState::new(Arc::new(CannedCatalog)))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_check_responds() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn missing_user_header_is_rejected() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/api/ratings", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("x-user-id"));
}

#[tokio::test]
async fn rating_round_trip() {
    let app = test_app();
    let draft = json!({
        "content_id": "27205",
        "content_type": "movie",
        "score": 9,
        "review_title": "Mind-bending"
    });

    let (status, body) = send(&app, "PUT", "/api/ratings", Some("1"), Some(draft.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["score"], 9);

    // Re-submission updates in place.
    let (status, _) = send(&app, "PUT", "/api/ratings", Some("1"), Some(draft)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/api/ratings", Some("1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Another user sees nothing.
    let (_, body) = send(&app, "GET", "/api/ratings", Some("2"), None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn out_of_range_score_is_a_bad_request() {
    let app = test_app();
    let draft = json!({
        "content_id": "27205",
        "content_type": "movie",
        "score": 11
    });

    let (status, body) = send(&app, "PUT", "/api/ratings", Some("1"), Some(draft)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("score"));
}

#[tokio::test]
async fn watchlist_filtering_and_removal() {
    let app = test_app();

    for (id, status) in [("100", "watching"), ("200", "completed")] {
        let draft = json!({
            "content_id": id,
            "content_type": "movie",
            "status": status
        });
        let (code, _) = send(&app, "PUT", "/api/watchlist", Some("1"), Some(draft)).await;
        assert_eq!(code, StatusCode::CREATED);
    }

    let (_, body) = send(&app, "GET", "/api/watchlist", Some("1"), None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = send(
        &app,
        "GET",
        "/api/watchlist?status=completed",
        Some("1"),
        None,
    )
    .await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["content_id"], "200");

    let (status, _) = send(&app, "DELETE", "/api/watchlist/movie/100", Some("1"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Removing it again is a 404.
    let (status, _) = send(&app, "DELETE", "/api/watchlist/movie/100", Some("1"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn episode_toggle_flips_state() {
    let app = test_app();
    let request = json!({ "show_id": "1396", "season": 1, "episode": 1 });

    let (status, body) = send(
        &app,
        "POST",
        "/api/episodes/toggle",
        Some("1"),
        Some(request.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["watched"], true);

    let (_, body) = send(&app, "POST", "/api/episodes/toggle", Some("1"), Some(request)).await;
    assert_eq!(body["watched"], false);
}

#[tokio::test]
async fn analytics_refresh_then_overview() {
    let app = test_app();

    let draft = json!({
        "content_id": "27205",
        "content_type": "movie",
        "status": "completed"
    });
    send(&app, "PUT", "/api/watchlist", Some("1"), Some(draft)).await;

    let (status, summary) = send(&app, "POST", "/api/analytics/refresh", Some("1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total_movies_watched"], 1);
    assert_eq!(summary["total_hours_watched"], 2.0);

    let (status, body) = send(&app, "GET", "/api/analytics", Some("1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["total_movies_watched"], 1);
    assert_eq!(body["monthly"].as_array().unwrap().len(), 1);
    assert!(!body["genre_time"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn overview_before_any_refresh_is_empty() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/api/analytics", Some("1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["summary"].is_null());
    assert!(body["monthly"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn generate_then_list_recommendations() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/recommendations/generate",
        Some("1"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["counts"]["daily_picks"], 5);
    assert_eq!(body["counts"]["weekly_suggestions"], 10);

    let (status, body) = send(&app, "GET", "/api/recommendations", Some("1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["daily_picks"].as_array().unwrap().len(), 5);
    assert_eq!(body["weekly_suggestions"].as_array().unwrap().len(), 10);
    // No ratings yet: the profile-driven variants stay empty.
    assert!(body["content_based"].as_array().unwrap().is_empty());
    assert!(body["genre_affinities"].as_array().unwrap().is_empty());

    // Rows belong to the generating user only.
    let (_, body) = send(&app, "GET", "/api/recommendations", Some("2"), None).await;
    assert!(body["daily_picks"].as_array().unwrap().is_empty());
}
