use axum::{extract::State, Json};
use engagement::{
    CollaborativeMatch, ContentBasedMatch, DailyPick, GenreAffinity, RecommendationStore,
    WeeklySuggestion,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::{error::ApiResult, identity::UserIdentity, state::AppState};

/// Every stored recommendation variant for one user.
#[derive(Serialize)]
pub struct RecommendationsResponse {
    pub daily_picks: Vec<DailyPick>,
    pub weekly_suggestions: Vec<WeeklySuggestion>,
    pub content_based: Vec<ContentBasedMatch>,
    pub collaborative: Vec<CollaborativeMatch>,
    pub genre_affinities: Vec<GenreAffinity>,
}

/// Run one generation cycle for the caller and report per-variant counts.
pub async fn generate(
    State(state): State<AppState>,
    UserIdentity(user): UserIdentity,
) -> ApiResult<Json<Value>> {
    let report = state.engine.generate_for(user).await?;
    Ok(Json(json!({ "success": true, "counts": report })))
}

/// Current recommendation rows. A failed read degrades that variant to an
/// empty list rather than failing the whole response.
pub async fn list(
    State(state): State<AppState>,
    UserIdentity(user): UserIdentity,
) -> Json<RecommendationsResponse> {
    let store = &state.store;

    Json(RecommendationsResponse {
        daily_picks: store.daily_picks_for(user).await.unwrap_or_else(|err| {
            warn!(user, error = %err, "daily-picks read failed");
            Vec::new()
        }),
        weekly_suggestions: store
            .weekly_suggestions_for(user)
            .await
            .unwrap_or_else(|err| {
                warn!(user, error = %err, "weekly-suggestions read failed");
                Vec::new()
            }),
        content_based: store.content_matches_for(user).await.unwrap_or_else(|err| {
            warn!(user, error = %err, "content-based read failed");
            Vec::new()
        }),
        collaborative: store
            .collaborative_matches_for(user)
            .await
            .unwrap_or_else(|err| {
                warn!(user, error = %err, "collaborative read failed");
                Vec::new()
            }),
        genre_affinities: store.genre_affinities_for(user).await.unwrap_or_else(|err| {
            warn!(user, error = %err, "genre-affinity read failed");
            Vec::new()
        }),
    })
}
