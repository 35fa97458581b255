//! Store traits for engagement records and derived rows.
//!
//! The recommendation engine and the analytics aggregator only touch
//! persistence through these traits; nothing downstream assumes a schema.
//! `MemoryStore` implements all three. The traits are `async` so a
//! database-backed implementation can slot in without touching callers.

use crate::error::Result;
use crate::types::{
    AnalyticsSummary, CollaborativeMatch, ContentBasedMatch, DailyPick, EpisodeProgress,
    GenreAffinity, GenreTimeSpent, MonthlyActivity, Rating, RatingDraft, UserId, WatchStatus,
    WatchlistDraft, WatchlistEntry, WeeklySuggestion,
};
use async_trait::async_trait;
use catalog::ContentType;

/// User-generated interaction data: ratings, watchlists, episode marks.
#[async_trait]
pub trait EngagementStore: Send + Sync {
    /// Create or update a rating. Returns the stored row and whether it
    /// was newly created.
    async fn upsert_rating(&self, user: UserId, draft: RatingDraft) -> Result<(Rating, bool)>;

    async fn ratings_for(&self, user: UserId) -> Result<Vec<Rating>>;

    /// Create or re-status a watchlist entry. Returns the stored row and
    /// whether it was newly created.
    async fn upsert_watchlist_entry(
        &self,
        user: UserId,
        draft: WatchlistDraft,
    ) -> Result<(WatchlistEntry, bool)>;

    /// Watchlist rows for a user, optionally restricted to one status.
    async fn watchlist_for(
        &self,
        user: UserId,
        status: Option<WatchStatus>,
    ) -> Result<Vec<WatchlistEntry>>;

    /// Remove an entry. Returns whether a row existed.
    async fn remove_watchlist_entry(
        &self,
        user: UserId,
        content_id: &str,
        content_type: ContentType,
    ) -> Result<bool>;

    /// Flip the watched mark for one episode. Returns the state after the
    /// flip: `true` means the row now exists (watched).
    async fn toggle_episode(
        &self,
        user: UserId,
        show_id: &str,
        season: u32,
        episode: u32,
    ) -> Result<bool>;

    /// Episode marks for a user, optionally restricted to one show.
    async fn episode_progress_for(
        &self,
        user: UserId,
        show_id: Option<&str>,
    ) -> Result<Vec<EpisodeProgress>>;
}

/// Derived recommendation rows. Each variant is unique per
/// (user, content_id, content_type); inserts on an occupied key are
/// skipped, so the first-seen row wins within a generation cycle.
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    /// Delete every recommendation variant and all genre-affinity rows
    /// for the user. Runs first in each generation cycle.
    async fn clear_recommendations(&self, user: UserId) -> Result<()>;

    /// Insert one row; returns `false` when the key was already occupied.
    async fn insert_daily_pick(&self, pick: DailyPick) -> Result<bool>;
    async fn insert_weekly_suggestion(&self, suggestion: WeeklySuggestion) -> Result<bool>;
    async fn insert_content_match(&self, row: ContentBasedMatch) -> Result<bool>;
    async fn insert_collaborative_match(&self, row: CollaborativeMatch) -> Result<bool>;

    async fn daily_picks_for(&self, user: UserId) -> Result<Vec<DailyPick>>;
    async fn weekly_suggestions_for(&self, user: UserId) -> Result<Vec<WeeklySuggestion>>;
    async fn content_matches_for(&self, user: UserId) -> Result<Vec<ContentBasedMatch>>;
    async fn collaborative_matches_for(&self, user: UserId) -> Result<Vec<CollaborativeMatch>>;

    /// Destructive overwrite of the user's genre-affinity rows.
    async fn replace_genre_affinities(&self, user: UserId, rows: Vec<GenreAffinity>)
        -> Result<()>;
    async fn genre_affinities_for(&self, user: UserId) -> Result<Vec<GenreAffinity>>;
}

/// Derived analytics rows, upserted by `AnalyticsAggregator::refresh`.
#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    async fn upsert_summary(&self, summary: AnalyticsSummary) -> Result<()>;
    async fn summary_for(&self, user: UserId) -> Result<Option<AnalyticsSummary>>;

    async fn upsert_monthly(&self, row: MonthlyActivity) -> Result<()>;
    async fn monthly_for(&self, user: UserId) -> Result<Vec<MonthlyActivity>>;

    /// Destructive overwrite of the user's genre-time rows.
    async fn replace_genre_time(&self, user: UserId, rows: Vec<GenreTimeSpent>) -> Result<()>;
    async fn genre_time_for(&self, user: UserId) -> Result<Vec<GenreTimeSpent>>;
}
