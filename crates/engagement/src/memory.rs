//! In-memory store implementation.
//!
//! Backs all three store traits with `HashMap`s behind a single `RwLock`.
//! Uniqueness constraints fall out of the map keys. Suitable for tests
//! and single-node deployments; a database-backed implementation would
//! replace this without touching the traits.

use crate::error::{Result, StoreError};
use crate::store::{AnalyticsStore, EngagementStore, RecommendationStore};
use crate::types::{
    AnalyticsSummary, CollaborativeMatch, ContentBasedMatch, DailyPick, EpisodeProgress,
    GenreAffinity, GenreTimeSpent, MonthlyActivity, Rating, RatingDraft, UserId, WatchStatus,
    WatchlistDraft, WatchlistEntry, WeeklySuggestion,
};
use async_trait::async_trait;
use catalog::{ContentType, GenreId};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

type ContentKey = (UserId, String, ContentType);
type EpisodeKey = (UserId, String, u32, u32);

#[derive(Default)]
struct Inner {
    ratings: HashMap<ContentKey, Rating>,
    watchlist: HashMap<ContentKey, WatchlistEntry>,
    episodes: HashMap<EpisodeKey, EpisodeProgress>,
    daily_picks: HashMap<ContentKey, DailyPick>,
    weekly_suggestions: HashMap<ContentKey, WeeklySuggestion>,
    content_matches: HashMap<ContentKey, ContentBasedMatch>,
    collaborative_matches: HashMap<ContentKey, CollaborativeMatch>,
    genre_affinities: HashMap<(UserId, GenreId), GenreAffinity>,
    summaries: HashMap<UserId, AnalyticsSummary>,
    monthly: HashMap<(UserId, i32, u32), MonthlyActivity>,
    genre_time: HashMap<(UserId, GenreId), GenreTimeSpent>,
}

/// In-memory implementation of all store traits.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))
    }
}

fn validate_content_id(content_id: &str) -> Result<()> {
    if content_id.trim().is_empty() {
        return Err(StoreError::Validation {
            field: "content_id",
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

fn validate_score(score: u8) -> Result<()> {
    if !(1..=10).contains(&score) {
        return Err(StoreError::Validation {
            field: "score",
            reason: format!("{score} is outside 1-10"),
        });
    }
    Ok(())
}

#[async_trait]
impl EngagementStore for MemoryStore {
    async fn upsert_rating(&self, user: UserId, draft: RatingDraft) -> Result<(Rating, bool)> {
        validate_content_id(&draft.content_id)?;
        validate_score(draft.score)?;

        let now = Utc::now();
        let key = (user, draft.content_id.clone(), draft.content_type);
        let mut inner = self.write()?;

        let (rating, created) = match inner.ratings.get(&key) {
            Some(existing) => (
                Rating {
                    score: draft.score,
                    review_title: draft.review_title,
                    review_text: draft.review_text,
                    contains_spoilers: draft.contains_spoilers,
                    updated_at: now,
                    ..existing.clone()
                },
                false,
            ),
            None => (
                Rating {
                    user,
                    content_id: draft.content_id,
                    content_type: draft.content_type,
                    score: draft.score,
                    review_title: draft.review_title,
                    review_text: draft.review_text,
                    contains_spoilers: draft.contains_spoilers,
                    created_at: now,
                    updated_at: now,
                },
                true,
            ),
        };

        inner.ratings.insert(key, rating.clone());
        Ok((rating, created))
    }

    async fn ratings_for(&self, user: UserId) -> Result<Vec<Rating>> {
        let inner = self.read()?;
        let mut ratings: Vec<Rating> = inner
            .ratings
            .values()
            .filter(|r| r.user == user)
            .cloned()
            .collect();
        ratings.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(ratings)
    }

    async fn upsert_watchlist_entry(
        &self,
        user: UserId,
        draft: WatchlistDraft,
    ) -> Result<(WatchlistEntry, bool)> {
        validate_content_id(&draft.content_id)?;

        let now = Utc::now();
        let key = (user, draft.content_id.clone(), draft.content_type);
        let mut inner = self.write()?;

        let (entry, created) = match inner.watchlist.get(&key) {
            Some(existing) => (
                WatchlistEntry {
                    status: draft.status,
                    updated_at: now,
                    ..existing.clone()
                },
                false,
            ),
            None => (
                WatchlistEntry {
                    user,
                    content_id: draft.content_id,
                    content_type: draft.content_type,
                    status: draft.status,
                    added_at: now,
                    updated_at: now,
                },
                true,
            ),
        };

        inner.watchlist.insert(key, entry.clone());
        Ok((entry, created))
    }

    async fn watchlist_for(
        &self,
        user: UserId,
        status: Option<WatchStatus>,
    ) -> Result<Vec<WatchlistEntry>> {
        let inner = self.read()?;
        let mut entries: Vec<WatchlistEntry> = inner
            .watchlist
            .values()
            .filter(|e| e.user == user && status.is_none_or(|s| e.status == s))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(entries)
    }

    async fn remove_watchlist_entry(
        &self,
        user: UserId,
        content_id: &str,
        content_type: ContentType,
    ) -> Result<bool> {
        let key = (user, content_id.to_string(), content_type);
        let mut inner = self.write()?;
        Ok(inner.watchlist.remove(&key).is_some())
    }

    async fn toggle_episode(
        &self,
        user: UserId,
        show_id: &str,
        season: u32,
        episode: u32,
    ) -> Result<bool> {
        validate_content_id(show_id)?;

        let key = (user, show_id.to_string(), season, episode);
        let mut inner = self.write()?;

        if inner.episodes.remove(&key).is_some() {
            return Ok(false);
        }

        inner.episodes.insert(
            key,
            EpisodeProgress {
                user,
                show_id: show_id.to_string(),
                season,
                episode,
                watched_at: Utc::now(),
            },
        );
        Ok(true)
    }

    async fn episode_progress_for(
        &self,
        user: UserId,
        show_id: Option<&str>,
    ) -> Result<Vec<EpisodeProgress>> {
        let inner = self.read()?;
        let mut rows: Vec<EpisodeProgress> = inner
            .episodes
            .values()
            .filter(|p| p.user == user && show_id.is_none_or(|s| p.show_id == s))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            (a.show_id.as_str(), a.season, a.episode).cmp(&(b.show_id.as_str(), b.season, b.episode))
        });
        Ok(rows)
    }
}

#[async_trait]
impl RecommendationStore for MemoryStore {
    async fn clear_recommendations(&self, user: UserId) -> Result<()> {
        let mut inner = self.write()?;
        inner.daily_picks.retain(|k, _| k.0 != user);
        inner.weekly_suggestions.retain(|k, _| k.0 != user);
        inner.content_matches.retain(|k, _| k.0 != user);
        inner.collaborative_matches.retain(|k, _| k.0 != user);
        inner.genre_affinities.retain(|k, _| k.0 != user);
        Ok(())
    }

    async fn insert_daily_pick(&self, pick: DailyPick) -> Result<bool> {
        validate_content_id(&pick.content_id)?;
        let key = (pick.user, pick.content_id.clone(), pick.content_type);
        let mut inner = self.write()?;
        if inner.daily_picks.contains_key(&key) {
            return Ok(false);
        }
        inner.daily_picks.insert(key, pick);
        Ok(true)
    }

    async fn insert_weekly_suggestion(&self, suggestion: WeeklySuggestion) -> Result<bool> {
        validate_content_id(&suggestion.content_id)?;
        let key = (
            suggestion.user,
            suggestion.content_id.clone(),
            suggestion.content_type,
        );
        let mut inner = self.write()?;
        if inner.weekly_suggestions.contains_key(&key) {
            return Ok(false);
        }
        inner.weekly_suggestions.insert(key, suggestion);
        Ok(true)
    }

    async fn insert_content_match(&self, row: ContentBasedMatch) -> Result<bool> {
        validate_content_id(&row.content_id)?;
        let key = (row.user, row.content_id.clone(), row.content_type);
        let mut inner = self.write()?;
        if inner.content_matches.contains_key(&key) {
            return Ok(false);
        }
        inner.content_matches.insert(key, row);
        Ok(true)
    }

    async fn insert_collaborative_match(&self, row: CollaborativeMatch) -> Result<bool> {
        validate_content_id(&row.content_id)?;
        let key = (row.user, row.content_id.clone(), row.content_type);
        let mut inner = self.write()?;
        if inner.collaborative_matches.contains_key(&key) {
            return Ok(false);
        }
        inner.collaborative_matches.insert(key, row);
        Ok(true)
    }

    async fn daily_picks_for(&self, user: UserId) -> Result<Vec<DailyPick>> {
        let inner = self.read()?;
        let mut rows: Vec<DailyPick> = inner
            .daily_picks
            .values()
            .filter(|p| p.user == user)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(rows)
    }

    async fn weekly_suggestions_for(&self, user: UserId) -> Result<Vec<WeeklySuggestion>> {
        let inner = self.read()?;
        let mut rows: Vec<WeeklySuggestion> = inner
            .weekly_suggestions
            .values()
            .filter(|s| s.user == user)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(rows)
    }

    async fn content_matches_for(&self, user: UserId) -> Result<Vec<ContentBasedMatch>> {
        let inner = self.read()?;
        let mut rows: Vec<ContentBasedMatch> = inner
            .content_matches
            .values()
            .filter(|m| m.user == user)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
        Ok(rows)
    }

    async fn collaborative_matches_for(&self, user: UserId) -> Result<Vec<CollaborativeMatch>> {
        let inner = self.read()?;
        let mut rows: Vec<CollaborativeMatch> = inner
            .collaborative_matches
            .values()
            .filter(|m| m.user == user)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.predicted_rating.total_cmp(&a.predicted_rating));
        Ok(rows)
    }

    async fn replace_genre_affinities(
        &self,
        user: UserId,
        rows: Vec<GenreAffinity>,
    ) -> Result<()> {
        let mut inner = self.write()?;
        inner.genre_affinities.retain(|k, _| k.0 != user);
        for row in rows {
            inner.genre_affinities.insert((user, row.genre_id), row);
        }
        Ok(())
    }

    async fn genre_affinities_for(&self, user: UserId) -> Result<Vec<GenreAffinity>> {
        let inner = self.read()?;
        let mut rows: Vec<GenreAffinity> = inner
            .genre_affinities
            .values()
            .filter(|a| a.user == user)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(rows)
    }
}

#[async_trait]
impl AnalyticsStore for MemoryStore {
    async fn upsert_summary(&self, summary: AnalyticsSummary) -> Result<()> {
        let mut inner = self.write()?;
        inner.summaries.insert(summary.user, summary);
        Ok(())
    }

    async fn summary_for(&self, user: UserId) -> Result<Option<AnalyticsSummary>> {
        let inner = self.read()?;
        Ok(inner.summaries.get(&user).cloned())
    }

    async fn upsert_monthly(&self, row: MonthlyActivity) -> Result<()> {
        let mut inner = self.write()?;
        inner.monthly.insert((row.user, row.year, row.month), row);
        Ok(())
    }

    async fn monthly_for(&self, user: UserId) -> Result<Vec<MonthlyActivity>> {
        let inner = self.read()?;
        let mut rows: Vec<MonthlyActivity> = inner
            .monthly
            .values()
            .filter(|m| m.user == user)
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));
        Ok(rows)
    }

    async fn replace_genre_time(&self, user: UserId, rows: Vec<GenreTimeSpent>) -> Result<()> {
        let mut inner = self.write()?;
        inner.genre_time.retain(|k, _| k.0 != user);
        for row in rows {
            inner.genre_time.insert((user, row.genre_id), row);
        }
        Ok(())
    }

    async fn genre_time_for(&self, user: UserId) -> Result<Vec<GenreTimeSpent>> {
        let inner = self.read()?;
        let mut rows: Vec<GenreTimeSpent> = inner
            .genre_time
            .values()
            .filter(|g| g.user == user)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.hours.total_cmp(&a.hours));
        Ok(rows)
    }
}
