//! Scoring formulas for the recommendation variants.
//!
//! Pure functions so thresholds are testable at their exact boundaries.
//! Note the unit asymmetry: daily-pick and collaborative scores are
//! vote-average scaled to 0-100, weekly-suggestion scores are the raw
//! popularity value.

/// Content-based matches below or at this score are dropped (exclusive).
pub const SIMILARITY_FLOOR: f64 = 20.0;

/// Collaborative candidates below this predicted rating are dropped
/// (inclusive: exactly 60 is kept).
pub const PREDICTED_RATING_FLOOR: f64 = 60.0;

/// Maximum collaborative rows inserted per generation cycle.
pub const COLLABORATIVE_CAP: usize = 10;

/// Similarity of a discovered item to a genre the user likes:
/// `(genre_weight / 10) x (popularity / 100) x 100`.
pub fn content_similarity(genre_weight: f64, popularity: f64) -> f64 {
    (genre_weight / 10.0) * (popularity / 100.0) * 100.0
}

/// Predicted rating for a trending item, on a 0-100 scale.
pub fn predicted_rating(vote_average: f64) -> f64 {
    vote_average * 10.0
}

/// Daily-pick score: vote average scaled to 0-100.
pub fn daily_pick_score(vote_average: f64) -> f64 {
    vote_average * 10.0
}

/// Genre-recommendation score: twice the qualifying-rating count.
pub fn genre_recommendation_score(count: u32) -> f64 {
    f64::from(count) * 2.0
}
