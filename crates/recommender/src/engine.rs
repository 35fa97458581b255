//! # Recommendation Engine
//!
//! One `generate_for(user)` call runs a full generation cycle:
//! 1. Clear every recommendation variant and genre-affinity row
//! 2. Content-based matches from the user's taste profile
//! 3. Collaborative approximation from trending listings
//! 4. Daily picks from popular listings
//! 5. Weekly suggestions from trending listings
//! 6. Genre recommendations from the configured genre signal
//!
//! Steps 2-6 are independent. Each step's external-fetch failure is
//! caught and logged, and that step contributes nothing; the cycle
//! reports success once the clear has completed. Generation is
//! serialized per user through an advisory async lock, so two concurrent
//! calls for the same user cannot interleave their clear and writes.

use crate::genre_signal::{CatalogGenreSignal, GenreSignal};
use crate::profile::{build_taste_profile, PROFILE_MIN_SCORE};
use crate::scoring::{
    content_similarity, daily_pick_score, genre_recommendation_score, predicted_rating,
    COLLABORATIVE_CAP, PREDICTED_RATING_FLOOR, SIMILARITY_FLOOR,
};
use anyhow::Result;
use catalog::{
    Catalog, ContentSummary, ContentType, DiscoverFilters, GenreId, TimeWindow,
};
use chrono::Utc;
use engagement::{
    CollaborativeMatch, ContentBasedMatch, DailyPick, EngagementStore, GenreAffinity, Rating,
    RecommendationStore, StoreError, UserId, WatchlistEntry, WeeklySuggestion,
};
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Reason attached to every content-based match.
const CONTENT_MATCH_REASON: &str = "popular in a genre you like";

/// How many top genres feed the content-based discovery queries.
const TOP_GENRE_COUNT: usize = 3;

/// Listing slice sizes for the shuffle steps.
const SHUFFLE_POOL_PER_TYPE: usize = 10;
const DAILY_PICK_COUNT: usize = 5;
const WEEKLY_SUGGESTION_COUNT: usize = 10;

/// Per-variant insert counts for one generation cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub daily_picks: usize,
    pub weekly_suggestions: usize,
    pub content_based: usize,
    pub collaborative: usize,
    pub genre_affinities: usize,
}

/// Generates per-user recommendations from engagement history and
/// catalog listings.
pub struct RecommendationEngine<S> {
    catalog: Arc<dyn Catalog>,
    store: Arc<S>,
    genre_signal: Box<dyn GenreSignal>,
    user_locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl<S> RecommendationEngine<S>
where
    S: EngagementStore + RecommendationStore,
{
    pub fn new(catalog: Arc<dyn Catalog>, store: Arc<S>) -> Self {
        Self {
            catalog,
            store,
            genre_signal: Box::new(CatalogGenreSignal),
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Swap the genre signal (e.g. `DemoGenreSignal` for the legacy path).
    pub fn with_genre_signal(mut self, signal: Box<dyn GenreSignal>) -> Self {
        self.genre_signal = signal;
        self
    }

    /// Advisory lock serializing generation per user.
    async fn user_lock(&self, user: UserId) -> Arc<Mutex<()>> {
        let mut locks = self.user_locks.lock().await;
        locks
            .entry(user)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop the user's lock entry once no task holds a clone of it, so
    /// the map does not grow with every user ever generated for.
    async fn release_user_lock(&self, user: UserId) {
        let mut locks = self.user_locks.lock().await;
        if locks
            .get(&user)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&user);
        }
    }

    /// Run one generation cycle for the user.
    ///
    /// Only the initial clear (and reading the user's engagement rows)
    /// can fail the operation; every later step degrades to an empty
    /// contribution on error.
    #[instrument(skip(self))]
    pub async fn generate_for(&self, user: UserId) -> Result<GenerationReport, StoreError> {
        let lock = self.user_lock(user).await;
        let result = {
            let _guard = lock.lock().await;
            self.run_cycle(user).await
        };
        drop(lock);
        self.release_user_lock(user).await;
        result
    }

    async fn run_cycle(&self, user: UserId) -> Result<GenerationReport, StoreError> {
        self.store.clear_recommendations(user).await?;
        let ratings = self.store.ratings_for(user).await?;
        let watchlist = self.store.watchlist_for(user, None).await?;

        let mut report = GenerationReport::default();

        match self.content_based(user, &ratings).await {
            Ok(count) => report.content_based = count,
            Err(err) => warn!(user, error = %err, "content-based step degraded to empty"),
        }
        match self.collaborative(user, &ratings, &watchlist).await {
            Ok(count) => report.collaborative = count,
            Err(err) => warn!(user, error = %err, "collaborative step degraded to empty"),
        }
        match self.daily_picks(user).await {
            Ok(count) => report.daily_picks = count,
            Err(err) => warn!(user, error = %err, "daily-picks step degraded to empty"),
        }
        match self.weekly_suggestions(user).await {
            Ok(count) => report.weekly_suggestions = count,
            Err(err) => warn!(user, error = %err, "weekly-suggestions step degraded to empty"),
        }
        match self.genre_recommendations(user, &ratings).await {
            Ok(count) => report.genre_affinities = count,
            Err(err) => warn!(user, error = %err, "genre-recommendation step degraded to empty"),
        }

        info!(
            user,
            daily = report.daily_picks,
            weekly = report.weekly_suggestions,
            content_based = report.content_based,
            collaborative = report.collaborative,
            genres = report.genre_affinities,
            "generation cycle complete"
        );
        Ok(report)
    }

    /// Content-based matches: discover popular titles in the user's top
    /// genres and keep those scoring strictly above the similarity floor.
    /// An item surfacing from two genre queries keeps its first-seen row.
    async fn content_based(&self, user: UserId, ratings: &[Rating]) -> Result<usize> {
        let profile = build_taste_profile(self.catalog.as_ref(), ratings, PROFILE_MIN_SCORE).await;
        if profile.genre_weights.is_empty() {
            debug!(user, "no qualifying ratings, skipping content-based step");
            return Ok(0);
        }

        let mut inserted = 0;
        for (genre_id, genre_weight) in profile.top_genres(TOP_GENRE_COUNT) {
            let page = self
                .catalog
                .discover(ContentType::Movie, &DiscoverFilters::popular_in_genre(genre_id))
                .await?;

            for item in &page.results {
                let similarity = content_similarity(genre_weight, item.popularity);
                if similarity <= SIMILARITY_FLOOR {
                    continue;
                }

                let created = self
                    .store
                    .insert_content_match(ContentBasedMatch {
                        user,
                        content_id: item.id.to_string(),
                        content_type: item.kind(),
                        similarity_score: similarity,
                        reason: CONTENT_MATCH_REASON.to_string(),
                        created_at: Utc::now(),
                    })
                    .await?;
                if created {
                    inserted += 1;
                }
            }
        }

        debug!(user, inserted, "content-based matches written");
        Ok(inserted)
    }

    /// Collaborative approximation: scan the combined top-trending
    /// listings, skip anything the user has rated or watchlisted, keep
    /// predictions at or above the floor, and stop at the cap.
    async fn collaborative(
        &self,
        user: UserId,
        ratings: &[Rating],
        watchlist: &[WatchlistEntry],
    ) -> Result<usize> {
        let exclusion: HashSet<(String, ContentType)> = ratings
            .iter()
            .map(|r| (r.content_id.clone(), r.content_type))
            .chain(
                watchlist
                    .iter()
                    .map(|e| (e.content_id.clone(), e.content_type)),
            )
            .collect();

        let candidates = self.combined_listing(Listing::Trending).await?;

        let mut inserted = 0;
        for item in candidates {
            if inserted >= COLLABORATIVE_CAP {
                break;
            }

            let key = (item.id.to_string(), item.kind());
            if exclusion.contains(&key) {
                continue;
            }

            let prediction = predicted_rating(item.vote_average);
            if prediction < PREDICTED_RATING_FLOOR {
                continue;
            }

            let created = self
                .store
                .insert_collaborative_match(CollaborativeMatch {
                    user,
                    content_id: key.0,
                    content_type: key.1,
                    predicted_rating: prediction,
                    created_at: Utc::now(),
                })
                .await?;
            if created {
                inserted += 1;
            }
        }

        debug!(user, inserted, "collaborative matches written");
        Ok(inserted)
    }

    /// Daily picks: shuffle the combined popular listings and keep five.
    async fn daily_picks(&self, user: UserId) -> Result<usize> {
        let mut pool = self.combined_listing(Listing::Popular).await?;
        pool.shuffle(&mut rand::rng());

        let mut inserted = 0;
        for item in pool.into_iter().take(DAILY_PICK_COUNT) {
            let created = self
                .store
                .insert_daily_pick(DailyPick {
                    user,
                    content_id: item.id.to_string(),
                    content_type: item.kind(),
                    score: daily_pick_score(item.vote_average),
                    created_at: Utc::now(),
                })
                .await?;
            if created {
                inserted += 1;
            }
        }

        debug!(user, inserted, "daily picks written");
        Ok(inserted)
    }

    /// Weekly suggestions: shuffle the combined trending listings and
    /// keep ten, scored by raw popularity.
    async fn weekly_suggestions(&self, user: UserId) -> Result<usize> {
        let mut pool = self.combined_listing(Listing::Trending).await?;
        pool.shuffle(&mut rand::rng());

        let mut inserted = 0;
        for item in pool.into_iter().take(WEEKLY_SUGGESTION_COUNT) {
            let created = self
                .store
                .insert_weekly_suggestion(WeeklySuggestion {
                    user,
                    content_id: item.id.to_string(),
                    content_type: item.kind(),
                    score: item.popularity,
                    created_at: Utc::now(),
                })
                .await?;
            if created {
                inserted += 1;
            }
        }

        debug!(user, inserted, "weekly suggestions written");
        Ok(inserted)
    }

    /// Genre recommendations: count qualifying ratings per genre through
    /// the configured signal, resolve names from the taxonomy (falling
    /// back to "Genre {id}"), and store the top five.
    async fn genre_recommendations(&self, user: UserId, ratings: &[Rating]) -> Result<usize> {
        let counts = self
            .genre_signal
            .genre_counts(self.catalog.as_ref(), ratings)
            .await;
        if counts.is_empty() {
            debug!(user, "no genre signal, skipping genre recommendations");
            return Ok(0);
        }

        let names = self.genre_names().await;

        let mut ranked: Vec<(GenreId, u32)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(5);

        let now = Utc::now();
        let rows: Vec<GenreAffinity> = ranked
            .into_iter()
            .map(|(genre_id, count)| GenreAffinity {
                user,
                genre_id,
                genre_name: names
                    .get(&genre_id)
                    .cloned()
                    .unwrap_or_else(|| format!("Genre {genre_id}")),
                score: genre_recommendation_score(count),
                created_at: now,
            })
            .collect();
        let written = rows.len();

        self.store.replace_genre_affinities(user, rows).await?;

        debug!(user, written, "genre affinities written");
        Ok(written)
    }

    /// Merge the movie and TV genre taxonomies into one id-to-name map.
    /// A failed taxonomy fetch just leaves those ids unresolved.
    async fn genre_names(&self) -> HashMap<GenreId, String> {
        let mut names = HashMap::new();
        for content_type in [ContentType::Movie, ContentType::Tv] {
            match self.catalog.genres(content_type).await {
                Ok(tags) => {
                    for tag in tags {
                        names.entry(tag.id).or_insert(tag.name);
                    }
                }
                Err(err) => {
                    warn!(
                        content_type = %content_type,
                        error = %err,
                        "genre taxonomy fetch failed, using placeholder names"
                    );
                }
            }
        }
        names
    }

    /// Top slice of a movie listing followed by the matching TV listing.
    async fn combined_listing(&self, listing: Listing) -> Result<Vec<ContentSummary>> {
        let (movies, shows) = match listing {
            Listing::Trending => (
                self.catalog
                    .trending(ContentType::Movie, TimeWindow::Week)
                    .await?,
                self.catalog
                    .trending(ContentType::Tv, TimeWindow::Week)
                    .await?,
            ),
            Listing::Popular => (
                self.catalog.popular(ContentType::Movie, 1).await?,
                self.catalog.popular(ContentType::Tv, 1).await?,
            ),
        };

        let mut combined: Vec<ContentSummary> = movies
            .results
            .into_iter()
            .take(SHUFFLE_POOL_PER_TYPE)
            .collect();
        combined.extend(shows.results.into_iter().take(SHUFFLE_POOL_PER_TYPE));
        Ok(combined)
    }
}

#[derive(Clone, Copy)]
enum Listing {
    Trending,
    Popular,
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalog::{CatalogError, ContentDetails, Credits, GenreTag, Page, SeasonDetails};
    use engagement::MemoryStore;

    struct NullCatalog;

    #[async_trait]
    impl Catalog for NullCatalog {
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
            Err(CatalogError::Status {
                endpoint: format!("movie/{content_id}"),
                status: 404,
            })
        }

        async fn credits(
            &self,
            content_id: u64,
            _content_type: ContentType,
        ) -> catalog::Result<Credits> {
            Err(CatalogError::Status {
                endpoint: format!("movie/{content_id}/credits"),
                status: 404,
            })
        }

        async fn trending(
            &self,
            _content_type: ContentType,
            _window: TimeWindow,
        ) -> catalog::Result<Page<ContentSummary>> {
            Ok(Page::default())
        }

        async fn popular(
            &self,
            _content_type: ContentType,
            _page: u32,
        ) -> catalog::Result<Page<ContentSummary>> {
            Ok(Page::default())
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

    fn null_engine() -> RecommendationEngine<MemoryStore> {
        RecommendationEngine::new(Arc::new(NullCatalog), Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn lock_entry_is_pruned_after_generation() {
        let engine = null_engine();

        engine.generate_for(1).await.unwrap();
        engine.generate_for(2).await.unwrap();

        assert!(engine.user_locks.lock().await.is_empty());
    }

    #[tokio::test]
    async fn held_lock_entry_survives_release() {
        let engine = null_engine();

        let held = engine.user_lock(1).await;
        engine.release_user_lock(1).await;
        assert!(engine.user_locks.lock().await.contains_key(&1));

        drop(held);
        engine.release_user_lock(1).await;
        assert!(engine.user_locks.lock().await.is_empty());
    }
}
