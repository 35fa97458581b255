//! # Recommender Crate
//!
//! The recommendation engine: turns a user's engagement history plus
//! catalog listings into five derived outputs per generation cycle:
//! daily picks, weekly suggestions, content-based matches, a
//! collaborative-filtering approximation, and genre affinities.
//!
//! ## Main Components
//!
//! - **engine**: `RecommendationEngine` and the generation cycle
//! - **profile**: taste-profile extraction (genre/director/actor weights)
//! - **scoring**: pure scoring formulas and thresholds
//! - **genre_signal**: real and demo genre-count sources
//!
//! ## Example Usage
//!
//! ```ignore
//! use recommender::RecommendationEngine;
//! use std::sync::Arc;
//!
//! let engine = RecommendationEngine::new(catalog.clone(), store.clone());
//! let report = engine.generate_for(user_id).await?;
//! println!("{} daily picks", report.daily_picks);
//! ```

pub mod engine;
pub mod genre_signal;
pub mod profile;
pub mod scoring;

// Re-export commonly used types
pub use engine::{GenerationReport, RecommendationEngine};
pub use genre_signal::{CatalogGenreSignal, DemoGenreSignal, GenreSignal};
pub use profile::{build_taste_profile, TasteProfile, LEAD_CAST_SIZE, PROFILE_MIN_SCORE};
pub use scoring::{
    content_similarity, daily_pick_score, genre_recommendation_score, predicted_rating,
    COLLABORATIVE_CAP, PREDICTED_RATING_FLOOR, SIMILARITY_FLOOR,
};
