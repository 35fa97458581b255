//! Taste-profile extraction from rating history.
//!
//! For every rating at or above a threshold, fetch the title's details
//! and credits and accumulate the rating value as weight into genre,
//! director, and lead-actor maps. One title's gateway failure is logged
//! and skipped; the profile is built from whatever resolved.

use catalog::{Catalog, GenreId};
use engagement::Rating;
use std::collections::HashMap;
use tracing::{debug, warn};

/// How many top-billed cast members count as leads.
pub const LEAD_CAST_SIZE: usize = 5;

/// Minimum rating for a title to shape the content-based profile.
pub const PROFILE_MIN_SCORE: u8 = 7;

/// Accumulated preference weights derived from ratings.
///
/// Weights are the raw rating values summed per subject: a user who
/// rated two action titles 8 and 9 carries an action weight of 17.
#[derive(Debug, Clone, Default)]
pub struct TasteProfile {
    pub genre_weights: HashMap<GenreId, f64>,
    /// Keyed by person id of crew members with the "Director" job.
    pub director_weights: HashMap<u64, f64>,
    /// Keyed by person id of the top-billed cast.
    pub actor_weights: HashMap<u64, f64>,
}

impl TasteProfile {
    pub fn is_empty(&self) -> bool {
        self.genre_weights.is_empty()
            && self.director_weights.is_empty()
            && self.actor_weights.is_empty()
    }

    /// Top `n` genres by accumulated weight, heaviest first. Ties break
    /// on genre id so the cut is deterministic.
    pub fn top_genres(&self, n: usize) -> Vec<(GenreId, f64)> {
        let mut genres: Vec<(GenreId, f64)> = self
            .genre_weights
            .iter()
            .map(|(id, weight)| (*id, *weight))
            .collect();
        genres.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        genres.truncate(n);
        genres
    }
}

/// Build a taste profile from every rating scoring at least `min_score`.
pub async fn build_taste_profile<C>(
    catalog: &C,
    ratings: &[Rating],
    min_score: u8,
) -> TasteProfile
where
    C: Catalog + ?Sized,
{
    let mut profile = TasteProfile::default();

    for rating in ratings.iter().filter(|r| r.score >= min_score) {
        let Ok(content_id) = rating.content_id.parse::<u64>() else {
            warn!(
                content_id = %rating.content_id,
                "non-numeric content id, skipping for profile"
            );
            continue;
        };
        let weight = f64::from(rating.score);

        match catalog.details(content_id, rating.content_type).await {
            Ok(details) => {
                for genre in &details.genres {
                    *profile.genre_weights.entry(genre.id).or_insert(0.0) += weight;
                }
            }
            Err(err) => {
                warn!(
                    content_id,
                    content_type = %rating.content_type,
                    error = %err,
                    "details fetch failed, skipping title for profile"
                );
                continue;
            }
        }

        match catalog.credits(content_id, rating.content_type).await {
            Ok(credits) => {
                for director in credits.directors() {
                    *profile.director_weights.entry(director.id).or_insert(0.0) += weight;
                }
                for actor in credits.lead_cast(LEAD_CAST_SIZE) {
                    *profile.actor_weights.entry(actor.id).or_insert(0.0) += weight;
                }
            }
            Err(err) => {
                warn!(
                    content_id,
                    error = %err,
                    "credits fetch failed, genre weights kept without crew"
                );
            }
        }
    }

    debug!(
        genres = profile.genre_weights.len(),
        directors = profile.director_weights.len(),
        actors = profile.actor_weights.len(),
        "taste profile built"
    );
    profile
}

/// Unweighted count of qualifying ratings per genre (one count per rated
/// title that carries the genre), used for genre recommendations.
pub async fn genre_rating_counts<C>(
    catalog: &C,
    ratings: &[Rating],
    min_score: u8,
) -> HashMap<GenreId, u32>
where
    C: Catalog + ?Sized,
{
    let mut counts: HashMap<GenreId, u32> = HashMap::new();

    for rating in ratings.iter().filter(|r| r.score >= min_score) {
        let Ok(content_id) = rating.content_id.parse::<u64>() else {
            continue;
        };

        match catalog.details(content_id, rating.content_type).await {
            Ok(details) => {
                for genre in &details.genres {
                    *counts.entry(genre.id).or_insert(0) += 1;
                }
            }
            Err(err) => {
                warn!(
                    content_id,
                    error = %err,
                    "details fetch failed, skipping title for genre counts"
                );
            }
        }
    }

    counts
}
