//! # Analytics Crate
//!
//! Derives per-user viewing totals from engagement records.
//!
//! `AnalyticsAggregator::refresh(user)` recomputes and upserts one
//! `AnalyticsSummary` and the current-month `MonthlyActivity` row, then
//! replaces the user's genre-time breakdown via a `GenreTimeModel`.
//!
//! Hours are estimates built from fixed constants (2 hours per completed
//! movie, 45 minutes per episode), not actual runtimes. Values are plain
//! floats with no rounding applied. Refresh is idempotent: two calls with
//! no intervening engagement changes produce identical rows.

pub mod genre_time;

pub use genre_time::{DemoGenreSplit, GenreHours, GenreTimeModel};

use catalog::ContentType;
use chrono::{Datelike, Utc};
use engagement::{
    AnalyticsStore, AnalyticsSummary, EngagementStore, GenreTimeSpent, MonthlyActivity, Result,
    UserId, WatchStatus,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Assumed runtime of a completed movie, in hours.
pub const MOVIE_HOURS: f64 = 2.0;

/// Assumed runtime of one episode, in hours (45 minutes).
pub const EPISODE_HOURS: f64 = 0.75;

/// Recomputes per-user analytics from the engagement store.
pub struct AnalyticsAggregator<S> {
    store: Arc<S>,
    genre_model: Box<dyn GenreTimeModel>,
}

impl<S> AnalyticsAggregator<S>
where
    S: EngagementStore + AnalyticsStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            genre_model: Box::new(DemoGenreSplit),
        }
    }

    /// Swap the genre-time model (e.g. a real per-title weighting).
    pub fn with_genre_model(mut self, model: Box<dyn GenreTimeModel>) -> Self {
        self.genre_model = model;
        self
    }

    /// Recompute and upsert the user's summary, current-month activity,
    /// and genre-time rows. Returns the fresh summary.
    pub async fn refresh(&self, user: UserId) -> Result<AnalyticsSummary> {
        let completed = self
            .store
            .watchlist_for(user, Some(WatchStatus::Completed))
            .await?;
        let movies_watched = completed
            .iter()
            .filter(|e| e.content_type == ContentType::Movie)
            .count() as u32;

        let episodes_watched = self.store.episode_progress_for(user, None).await?.len() as u32;

        let total_hours =
            f64::from(movies_watched) * MOVIE_HOURS + f64::from(episodes_watched) * EPISODE_HOURS;

        debug!(
            user,
            movies_watched, episodes_watched, total_hours, "recomputed viewing totals"
        );

        let summary = AnalyticsSummary {
            user,
            total_hours_watched: total_hours,
            total_movies_watched: movies_watched,
            total_episodes_watched: episodes_watched,
            last_updated: Utc::now(),
        };
        self.store.upsert_summary(summary.clone()).await?;

        // Monthly snapshot covers the current calendar month only.
        let today = Utc::now().date_naive();
        self.store
            .upsert_monthly(MonthlyActivity {
                user,
                year: today.year(),
                month: today.month(),
                hours_watched: total_hours,
                movies_watched,
                episodes_watched,
            })
            .await?;

        let now = Utc::now();
        let genre_rows: Vec<GenreTimeSpent> = self
            .genre_model
            .split(total_hours)
            .into_iter()
            .map(|g| GenreTimeSpent {
                user,
                genre_id: g.genre_id,
                genre_name: g.genre_name,
                hours: g.hours,
                last_updated: now,
            })
            .collect();
        self.store.replace_genre_time(user, genre_rows).await?;

        info!(
            user,
            model = self.genre_model.name(),
            "analytics refreshed"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engagement::{MemoryStore, RatingDraft, WatchlistDraft};

    async fn seeded_store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());

        store
            .upsert_rating(
                1,
                RatingDraft {
                    content_id: "27205".to_string(),
                    content_type: ContentType::Movie,
                    score: 9,
                    review_title: None,
                    review_text: None,
                    contains_spoilers: false,
                },
            )
            .await
            .unwrap();
        store
            .upsert_watchlist_entry(
                1,
                WatchlistDraft {
                    content_id: "27205".to_string(),
                    content_type: ContentType::Movie,
                    status: WatchStatus::Completed,
                },
            )
            .await
            .unwrap();

        store
    }

    #[tokio::test]
    async fn one_completed_movie_is_two_hours() {
        let store = seeded_store().await;
        let aggregator = AnalyticsAggregator::new(store.clone());

        let summary = aggregator.refresh(1).await.unwrap();

        assert_eq!(summary.total_movies_watched, 1);
        assert_eq!(summary.total_episodes_watched, 0);
        assert_eq!(summary.total_hours_watched, 2.0);
    }

    #[tokio::test]
    async fn episodes_count_at_three_quarters_hour() {
        let store = seeded_store().await;
        store.toggle_episode(1, "1396", 1, 1).await.unwrap();
        store.toggle_episode(1, "1396", 1, 2).await.unwrap();

        let aggregator = AnalyticsAggregator::new(store.clone());
        let summary = aggregator.refresh(1).await.unwrap();

        assert_eq!(summary.total_episodes_watched, 2);
        assert_eq!(summary.total_hours_watched, 2.0 + 1.5);
    }

    #[tokio::test]
    async fn refresh_is_idempotent() {
        let store = seeded_store().await;
        let aggregator = AnalyticsAggregator::new(store.clone());

        let first = aggregator.refresh(1).await.unwrap();
        let second = aggregator.refresh(1).await.unwrap();

        assert_eq!(first.total_hours_watched, second.total_hours_watched);
        assert_eq!(first.total_movies_watched, second.total_movies_watched);
        assert_eq!(first.total_episodes_watched, second.total_episodes_watched);

        // Still exactly one summary and one monthly row.
        assert!(store.summary_for(1).await.unwrap().is_some());
        assert_eq!(store.monthly_for(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn genre_time_rows_are_replaced_not_accumulated() {
        let store = seeded_store().await;
        let aggregator = AnalyticsAggregator::new(store.clone());

        aggregator.refresh(1).await.unwrap();
        aggregator.refresh(1).await.unwrap();

        let rows = store.genre_time_for(1).await.unwrap();
        assert_eq!(rows.len(), 5);
        let action = rows.iter().find(|r| r.genre_name == "Action").unwrap();
        assert_eq!(action.hours, 0.5); // 25% of 2.0
    }

    #[tokio::test]
    async fn incomplete_and_tv_entries_do_not_count_as_movies() {
        let store = seeded_store().await;
        store
            .upsert_watchlist_entry(
                1,
                WatchlistDraft {
                    content_id: "550".to_string(),
                    content_type: ContentType::Movie,
                    status: WatchStatus::Watching,
                },
            )
            .await
            .unwrap();
        store
            .upsert_watchlist_entry(
                1,
                WatchlistDraft {
                    content_id: "1396".to_string(),
                    content_type: ContentType::Tv,
                    status: WatchStatus::Completed,
                },
            )
            .await
            .unwrap();

        let aggregator = AnalyticsAggregator::new(store.clone());
        let summary = aggregator.refresh(1).await.unwrap();

        assert_eq!(summary.total_movies_watched, 1);
    }
}
