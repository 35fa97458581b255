//! Genre-time breakdown models.
//!
//! The aggregator asks a `GenreTimeModel` how a user's total watch hours
//! distribute across genres. The shipped `DemoGenreSplit` is a demo
//! stand-in with a fixed proportional split over five genres; a model
//! that weights by actual per-title genre data can replace it without
//! touching the aggregator.

use catalog::GenreId;

/// Estimated hours attributed to one genre.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreHours {
    pub genre_id: GenreId,
    pub genre_name: String,
    pub hours: f64,
}

/// Distributes total watch hours across genres.
pub trait GenreTimeModel: Send + Sync {
    /// Model name, for logging.
    fn name(&self) -> &str;

    /// Split `total_hours` into per-genre estimates. The result replaces
    /// the user's genre-time rows wholesale.
    fn split(&self, total_hours: f64) -> Vec<GenreHours>;
}

/// Demo stand-in: a fixed proportional split over five genres
/// (25/20/10/15/10 percent of total hours). Not derived from any real
/// per-genre signal.
pub struct DemoGenreSplit;

const DEMO_SPLIT: [(GenreId, &str, f64); 5] = [
    (28, "Action", 0.25),
    (12, "Adventure", 0.20),
    (16, "Animation", 0.10),
    (35, "Comedy", 0.15),
    (80, "Crime", 0.10),
];

impl GenreTimeModel for DemoGenreSplit {
    fn name(&self) -> &str {
        "demo_genre_split"
    }

    fn split(&self, total_hours: f64) -> Vec<GenreHours> {
        DEMO_SPLIT
            .iter()
            .map(|(genre_id, genre_name, fraction)| GenreHours {
                genre_id: *genre_id,
                genre_name: genre_name.to_string(),
                hours: total_hours * fraction,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_split_covers_five_genres() {
        let rows = DemoGenreSplit.split(10.0);
        assert_eq!(rows.len(), 5);

        let action = rows.iter().find(|r| r.genre_name == "Action").unwrap();
        assert_eq!(action.hours, 2.5);
        assert_eq!(action.genre_id, 28);
    }

    #[test]
    fn demo_split_of_zero_hours_is_all_zero() {
        assert!(DemoGenreSplit.split(0.0).iter().all(|r| r.hours == 0.0));
    }
}
