//! Domain types for user engagement and derived recommendation rows.
//!
//! Ratings, watchlist entries, and episode-progress marks are what users
//! write; everything else here is derived from them by the analytics
//! aggregator and the recommendation engine. Each type notes its unique
//! key; the store enforces at most one row per key.

use catalog::{ContentType, GenreId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identifiers. Identity itself (sessions, accounts) lives outside
/// this system.
pub type UserId = u64;

/// Watchlist lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchStatus {
    PlanToWatch,
    Watching,
    Completed,
    Dropped,
}

impl WatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WatchStatus::PlanToWatch => "plan_to_watch",
            WatchStatus::Watching => "watching",
            WatchStatus::Completed => "completed",
            WatchStatus::Dropped => "dropped",
        }
    }
}

/// A user's rating of one title. Unique per (user, content_id,
/// content_type); re-submission updates in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    pub user: UserId,
    pub content_id: String,
    pub content_type: ContentType,
    /// Integer score, 1 through 10.
    pub score: u8,
    pub review_title: Option<String>,
    pub review_text: Option<String>,
    pub contains_spoilers: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a caller supplies when submitting or updating a rating.
#[derive(Debug, Clone, Deserialize)]
pub struct RatingDraft {
    pub content_id: String,
    pub content_type: ContentType,
    pub score: u8,
    #[serde(default)]
    pub review_title: Option<String>,
    #[serde(default)]
    pub review_text: Option<String>,
    #[serde(default)]
    pub contains_spoilers: bool,
}

/// One watchlist row. Unique per (user, content_id, content_type).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub user: UserId,
    pub content_id: String,
    pub content_type: ContentType,
    pub status: WatchStatus,
    pub added_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for adding or re-statusing a watchlist entry.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchlistDraft {
    pub content_id: String,
    pub content_type: ContentType,
    pub status: WatchStatus,
}

/// A watched-episode mark. Existence is the boolean: toggling an
/// unwatched episode creates the row, toggling again deletes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeProgress {
    pub user: UserId,
    pub show_id: String,
    pub season: u32,
    pub episode: u32,
    pub watched_at: DateTime<Utc>,
}

/// Per-user, per-genre preference row. The whole set is replaced on each
/// generation cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreAffinity {
    pub user: UserId,
    pub genre_id: GenreId,
    pub genre_name: String,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

/// Daily pick: shuffled popular content, scored by vote average x10.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPick {
    pub user: UserId,
    pub content_id: String,
    pub content_type: ContentType,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

/// Weekly suggestion: shuffled trending content. The score here is the
/// raw popularity value, a different unit than the daily-pick score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySuggestion {
    pub user: UserId,
    pub content_id: String,
    pub content_type: ContentType,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

/// Content-based match from genre affinity, with a human-readable reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBasedMatch {
    pub user: UserId,
    pub content_id: String,
    pub content_type: ContentType,
    pub similarity_score: f64,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

/// Collaborative-filtering approximation drawn from trending listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaborativeMatch {
    pub user: UserId,
    pub content_id: String,
    pub content_type: ContentType,
    pub predicted_rating: f64,
    pub created_at: DateTime<Utc>,
}

/// Per-user viewing totals. One row per user, recomputed on refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub user: UserId,
    pub total_hours_watched: f64,
    pub total_movies_watched: u32,
    pub total_episodes_watched: u32,
    pub last_updated: DateTime<Utc>,
}

/// Activity counters for one calendar month. Unique per (user, year, month).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyActivity {
    pub user: UserId,
    pub year: i32,
    pub month: u32,
    pub hours_watched: f64,
    pub movies_watched: u32,
    pub episodes_watched: u32,
}

/// Estimated hours spent per genre. Unique per (user, genre_id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreTimeSpent {
    pub user: UserId,
    pub genre_id: GenreId,
    pub genre_name: String,
    pub hours: f64,
    pub last_updated: DateTime<Utc>,
}
