//! Genre signal sources for genre recommendations.
//!
//! A `GenreSignal` turns a user's ratings into per-genre counts. The
//! real source counts qualifying ratings against catalog genre data; the
//! demo source reproduces the legacy placeholder path (random genre per
//! qualifying rating) behind the same interface so it can be swapped
//! without touching the engine.

use crate::profile::genre_rating_counts;
use async_trait::async_trait;
use catalog::{Catalog, GenreId};
use engagement::Rating;
use rand::Rng;
use std::collections::HashMap;

/// Minimum rating for a title to count toward genre recommendations.
pub const GENRE_SIGNAL_MIN_SCORE: u8 = 6;

/// Minimum rating on the legacy demo path.
pub const DEMO_SIGNAL_MIN_SCORE: u8 = 4;

/// Produces per-genre counts from a user's rating history.
#[async_trait]
pub trait GenreSignal: Send + Sync {
    /// Signal name, for logging.
    fn name(&self) -> &str;

    /// Count qualifying ratings per genre id. Gateway failures for
    /// individual titles are skipped inside the implementation.
    async fn genre_counts(
        &self,
        catalog: &dyn Catalog,
        ratings: &[Rating],
    ) -> HashMap<GenreId, u32>;
}

/// Real signal: one count per rating >= 6 for each genre the rated title
/// carries, resolved through the catalog.
pub struct CatalogGenreSignal;

#[async_trait]
impl GenreSignal for CatalogGenreSignal {
    fn name(&self) -> &str {
        "catalog_genre_signal"
    }

    async fn genre_counts(
        &self,
        catalog: &dyn Catalog,
        ratings: &[Rating],
    ) -> HashMap<GenreId, u32> {
        genre_rating_counts(catalog, ratings, GENRE_SIGNAL_MIN_SCORE).await
    }
}

/// Demo stand-in reproducing the legacy path: every rating >= 4 counts
/// toward a uniformly random genre id in 1-20. Kept only so the swap
/// point stays exercised; not a real preference signal.
pub struct DemoGenreSignal;

#[async_trait]
impl GenreSignal for DemoGenreSignal {
    fn name(&self) -> &str {
        "demo_genre_signal"
    }

    async fn genre_counts(
        &self,
        _catalog: &dyn Catalog,
        ratings: &[Rating],
    ) -> HashMap<GenreId, u32> {
        let mut rng = rand::rng();
        let mut counts: HashMap<GenreId, u32> = HashMap::new();

        for _rating in ratings.iter().filter(|r| r.score >= DEMO_SIGNAL_MIN_SCORE) {
            let genre_id = rng.random_range(1..=20);
            *counts.entry(genre_id).or_insert(0) += 1;
        }

        counts
    }
}
