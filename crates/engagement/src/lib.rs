//! # Engagement Crate
//!
//! User engagement records (ratings, watchlists, episode progress) and the
//! derived rows the recommendation engine and analytics aggregator write
//! back (recommendation variants, genre affinities, activity summaries).
//!
//! ## Main Components
//!
//! - **types**: domain types with their uniqueness keys
//! - **store**: `EngagementStore`, `RecommendationStore`, `AnalyticsStore` traits
//! - **memory**: `MemoryStore`, the in-memory implementation of all three
//! - **error**: `StoreError`
//!
//! Consumers only read and write through the traits; no direct schema
//! access is assumed anywhere downstream.

pub mod error;
pub mod memory;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use store::{AnalyticsStore, EngagementStore, RecommendationStore};
pub use types::{
    AnalyticsSummary, CollaborativeMatch, ContentBasedMatch, DailyPick, EpisodeProgress,
    GenreAffinity, GenreTimeSpent, MonthlyActivity, Rating, RatingDraft, UserId, WatchStatus,
    WatchlistDraft, WatchlistEntry, WeeklySuggestion,
};
