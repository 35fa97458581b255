use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use catalog::ContentType;
use engagement::{
    EngagementStore, Rating, RatingDraft, StoreError, WatchStatus, WatchlistDraft, WatchlistEntry,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{error::ApiResult, identity::UserIdentity, state::AppState};

/// Submit or update a rating. 201 on first write, 200 on an update.
pub async fn put_rating(
    State(state): State<AppState>,
    UserIdentity(user): UserIdentity,
    Json(draft): Json<RatingDraft>,
) -> ApiResult<(StatusCode, Json<Rating>)> {
    let (rating, created) = state.store.upsert_rating(user, draft).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(rating)))
}

pub async fn list_ratings(
    State(state): State<AppState>,
    UserIdentity(user): UserIdentity,
) -> ApiResult<Json<Vec<Rating>>> {
    Ok(Json(state.store.ratings_for(user).await?))
}

#[derive(Debug, Deserialize)]
pub struct WatchlistQuery {
    pub status: Option<WatchStatus>,
}

/// Add a title to the watchlist or move it to a new status.
pub async fn put_watchlist_entry(
    State(state): State<AppState>,
    UserIdentity(user): UserIdentity,
    Json(draft): Json<WatchlistDraft>,
) -> ApiResult<(StatusCode, Json<WatchlistEntry>)> {
    let (entry, created) = state.store.upsert_watchlist_entry(user, draft).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(entry)))
}

pub async fn list_watchlist(
    State(state): State<AppState>,
    UserIdentity(user): UserIdentity,
    Query(query): Query<WatchlistQuery>,
) -> ApiResult<Json<Vec<WatchlistEntry>>> {
    Ok(Json(state.store.watchlist_for(user, query.status).await?))
}

pub async fn delete_watchlist_entry(
    State(state): State<AppState>,
    UserIdentity(user): UserIdentity,
    Path((content_type, content_id)): Path<(ContentType, String)>,
) -> ApiResult<StatusCode> {
    let removed = state
        .store
        .remove_watchlist_entry(user, &content_id, content_type)
        .await?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StoreError::NotFound {
            entity: "watchlist entry",
        }
        .into())
    }
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub show_id: String,
    pub season: u32,
    pub episode: u32,
}

/// Flip the watched mark for one episode; responds with the new state.
pub async fn toggle_episode(
    State(state): State<AppState>,
    UserIdentity(user): UserIdentity,
    Json(request): Json<ToggleRequest>,
) -> ApiResult<Json<Value>> {
    let watched = state
        .store
        .toggle_episode(user, &request.show_id, request.season, request.episode)
        .await?;
    Ok(Json(json!({ "watched": watched })))
}
