//! Wire types for the external content catalog.
//!
//! These mirror the JSON the catalog service returns. Listing endpoints
//! carry `ContentSummary` items; detail lookups return the richer
//! `ContentDetails` with a resolved genre list. Most fields are
//! `#[serde(default)]` because the upstream API omits them freely.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Genre identifiers as assigned by the catalog service.
pub type GenreId = u32;

/// Whether a piece of content is a movie or a TV show.
///
/// The catalog keys most endpoints by this tag, and engagement records
/// carry it as part of their unique key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Tv,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Tv => "tv",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time window for trending listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

/// A genre id/name pair from the taxonomy listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreTag {
    pub id: GenreId,
    pub name: String,
}

/// One item from a listing endpoint (trending, popular, search, discover).
///
/// Movies carry `title`, shows carry `name`; the catalog never sets both.
/// `kind()` relies on that asymmetry to tag mixed listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentSummary {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub vote_average: f64,
}

impl ContentSummary {
    /// Movie title or show name, whichever is present.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("(untitled)")
    }

    /// Infer the content type: items with a `title` field are movies.
    pub fn kind(&self) -> ContentType {
        if self.title.is_some() {
            ContentType::Movie
        } else {
            ContentType::Tv
        }
    }
}

/// Full detail record for a single title.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentDetails {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<GenreTag>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Only present for TV shows.
    #[serde(default)]
    pub number_of_seasons: Option<u32>,
}

impl ContentDetails {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("(untitled)")
    }
}

/// A cast credit. `order` is the billing position (0 = lead).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub order: u32,
}

/// A crew credit with its role label (e.g. "Director").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub job: String,
}

/// Cast and crew for a title.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

impl Credits {
    /// Crew members whose job label is "Director".
    pub fn directors(&self) -> impl Iterator<Item = &CrewMember> {
        self.crew.iter().filter(|c| c.job == "Director")
    }

    /// Top-billed cast members, capped at `n`.
    pub fn lead_cast(&self, n: usize) -> impl Iterator<Item = &CastMember> {
        self.cast.iter().take(n)
    }
}

/// One page of a paginated listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }
}

/// One episode within a season listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub episode_number: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub runtime: Option<u32>,
}

/// Season structure for a TV show.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeasonDetails {
    #[serde(default)]
    pub season_number: u32,
    #[serde(default)]
    pub episodes: Vec<EpisodeSummary>,
}

/// Sort key for discovery listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    PopularityDesc,
    VoteAverageDesc,
    ReleaseDateDesc,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::PopularityDesc => "popularity.desc",
            SortBy::VoteAverageDesc => "vote_average.desc",
            SortBy::ReleaseDateDesc => "release_date.desc",
        }
    }
}

/// Filters for the generic discovery endpoint.
#[derive(Debug, Clone, Default)]
pub struct DiscoverFilters {
    pub with_genre: Option<GenreId>,
    pub sort_by: SortBy,
    pub page: u32,
}

impl DiscoverFilters {
    /// Discover the most popular titles in a single genre.
    pub fn popular_in_genre(genre: GenreId) -> Self {
        Self {
            with_genre: Some(genre),
            sort_by: SortBy::PopularityDesc,
            page: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_kind_follows_title_field() {
        let movie = ContentSummary {
            id: 1,
            title: Some("Inception".to_string()),
            ..Default::default()
        };
        let show = ContentSummary {
            id: 2,
            name: Some("Severance".to_string()),
            ..Default::default()
        };

        assert_eq!(movie.kind(), ContentType::Movie);
        assert_eq!(show.kind(), ContentType::Tv);
        assert_eq!(movie.display_title(), "Inception");
        assert_eq!(show.display_title(), "Severance");
    }

    #[test]
    fn credits_directors_and_lead_cast() {
        let credits = Credits {
            cast: (0..8)
                .map(|i| CastMember {
                    id: i,
                    name: format!("Actor {i}"),
                    order: i as u32,
                })
                .collect(),
            crew: vec![
                CrewMember {
                    id: 100,
                    name: "Jane Doe".to_string(),
                    job: "Director".to_string(),
                },
                CrewMember {
                    id: 101,
                    name: "John Roe".to_string(),
                    job: "Producer".to_string(),
                },
            ],
        };

        let directors: Vec<_> = credits.directors().collect();
        assert_eq!(directors.len(), 1);
        assert_eq!(directors[0].name, "Jane Doe");
        assert_eq!(credits.lead_cast(5).count(), 5);
    }

    #[test]
    fn page_deserializes_with_missing_fields() {
        let page: Page<ContentSummary> = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert_eq!(page.page, 1);
        assert!(page.results.is_empty());
    }
}
