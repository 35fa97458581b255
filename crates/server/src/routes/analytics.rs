use axum::{extract::State, Json};
use engagement::{AnalyticsStore, AnalyticsSummary, GenreTimeSpent, MonthlyActivity};
use serde::Serialize;

use crate::{error::ApiResult, identity::UserIdentity, state::AppState};

/// Stored analytics rows for one user.
#[derive(Serialize)]
pub struct AnalyticsResponse {
    /// `null` until the first refresh.
    pub summary: Option<AnalyticsSummary>,
    pub monthly: Vec<MonthlyActivity>,
    pub genre_time: Vec<GenreTimeSpent>,
}

/// Recompute the caller's analytics and return the fresh summary.
pub async fn refresh(
    State(state): State<AppState>,
    UserIdentity(user): UserIdentity,
) -> ApiResult<Json<AnalyticsSummary>> {
    Ok(Json(state.aggregator.refresh(user).await?))
}

pub async fn overview(
    State(state): State<AppState>,
    UserIdentity(user): UserIdentity,
) -> ApiResult<Json<AnalyticsResponse>> {
    Ok(Json(AnalyticsResponse {
        summary: state.store.summary_for(user).await?,
        monthly: state.store.monthly_for(user).await?,
        genre_time: state.store.genre_time_for(user).await?,
    }))
}
