use crate::state::AppState;
use axum::{
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

pub mod analytics;
pub mod engagement;
pub mod recommendations;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/recommendations/generate",
            post(recommendations::generate),
        )
        .route("/recommendations", get(recommendations::list))
        .route("/analytics/refresh", post(analytics::refresh))
        .route("/analytics", get(analytics::overview))
        .route(
            "/ratings",
            put(engagement::put_rating).get(engagement::list_ratings),
        )
        .route(
            "/watchlist",
            put(engagement::put_watchlist_entry).get(engagement::list_watchlist),
        )
        .route(
            "/watchlist/:content_type/:content_id",
            delete(engagement::delete_watchlist_entry),
        )
        .route("/episodes/toggle", post(engagement::toggle_episode))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
