//! OMDb API response types and search parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::error::ParseFilterError;

/// Category constraint applied to a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    /// Any kind of title.
    #[default]
    #[serde(rename = "all")]
    Unconstrained,
    /// Movies only.
    #[serde(alias = "movies")]
    Movie,
    /// Series only.
    Series,
}

impl CategoryFilter {
    /// Value of the `type` query parameter, or `None` when unconstrained.
    #[must_use]
    pub const fn query_value(self) -> Option<&'static str> {
        match self {
            Self::Unconstrained => None,
            Self::Movie => Some("movie"),
            Self::Series => Some("series"),
        }
    }

    /// Display label for the filter selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unconstrained => "All",
            Self::Movie => "Movies",
            Self::Series => "Series",
        }
    }

    /// The next filter in selector order (All, Movies, Series, then back).
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Unconstrained => Self::Movie,
            Self::Movie => Self::Series,
            Self::Series => Self::Unconstrained,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_value().unwrap_or("all"))
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::Unconstrained),
            "movie" | "movies" => Ok(Self::Movie),
            "series" => Ok(Self::Series),
            other => Err(ParseFilterError(String::from(other))),
        }
    }
}

/// Parameters for a title search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Free-text search term. May be empty.
    pub term: String,
    /// Category constraint.
    pub filter: CategoryFilter,
}

impl SearchParams {
    /// Creates unconstrained search params for the given term.
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            filter: CategoryFilter::Unconstrained,
        }
    }

    /// Sets the category filter.
    #[must_use]
    pub const fn filter(mut self, filter: CategoryFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// One entry of a search result set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MovieSummary {
    /// IMDb identifier (e.g. `tt0111161`).
    #[serde(rename = "imdbID")]
    pub id: String,
    /// Title.
    #[serde(rename = "Title")]
    pub title: String,
    /// Release year, or year range for series (`2006–2013`).
    #[serde(rename = "Year")]
    pub year: String,
    /// Poster image URL (absent when the service reports `N/A`).
    #[serde(rename = "Poster", default, deserialize_with = "na_as_none")]
    pub poster_url: Option<String>,
    /// Title kind (`movie`, `series`, `episode`).
    #[serde(rename = "Type", default, deserialize_with = "na_as_none")]
    pub kind: Option<String>,
}

/// Full record for one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MovieDetail {
    /// IMDb identifier.
    #[serde(rename = "imdbID")]
    pub id: String,
    /// Title.
    #[serde(rename = "Title")]
    pub title: String,
    /// Release year.
    #[serde(rename = "Year")]
    pub year: String,
    /// Plot summary.
    #[serde(rename = "Plot", default)]
    pub plot: String,
    /// Comma-separated lead actors.
    #[serde(rename = "Actors", default)]
    pub actors: String,
    /// Poster image URL.
    #[serde(rename = "Poster", default, deserialize_with = "na_as_none")]
    pub poster_url: Option<String>,
    /// Genres.
    #[serde(rename = "Genre", default, deserialize_with = "na_as_none")]
    pub genre: Option<String>,
    /// Director(s).
    #[serde(rename = "Director", default, deserialize_with = "na_as_none")]
    pub director: Option<String>,
    /// Runtime (e.g. `142 min`).
    #[serde(rename = "Runtime", default, deserialize_with = "na_as_none")]
    pub runtime: Option<String>,
    /// Title kind.
    #[serde(rename = "Type", default, deserialize_with = "na_as_none")]
    pub kind: Option<String>,
}

/// Status fields present on every OMDb response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OmdbStatus {
    /// `"True"` or `"False"`.
    #[serde(rename = "Response", default)]
    pub response: String,
    /// Failure description when `response` is `"False"`.
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl OmdbStatus {
    /// Whether the service reported success.
    pub(crate) fn is_success(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }

    /// The failure message, or a generic one if the service sent none.
    pub(crate) fn message(&self) -> String {
        self.error
            .clone()
            .unwrap_or_else(|| String::from("unknown service error"))
    }
}

/// Body of a successful search response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OmdbSearchResponse {
    /// Matches on the first result page.
    #[serde(rename = "Search", default)]
    pub search: Vec<MovieSummary>,
    /// Total matches across all pages (stringly typed by the service).
    #[serde(rename = "totalResults")]
    pub total_results: Option<String>,
}

/// Treats OMDb's `"N/A"` placeholder and empty strings as absent.
fn na_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_empty() && v != "N/A"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_filter_query_values() {
        // Arrange & Act & Assert
        assert_eq!(CategoryFilter::Unconstrained.query_value(), None);
        assert_eq!(CategoryFilter::Movie.query_value(), Some("movie"));
        assert_eq!(CategoryFilter::Series.query_value(), Some("series"));
    }

    #[test]
    fn test_filter_cycles_in_selector_order() {
        // Arrange
        let start = CategoryFilter::default();

        // Act
        let second = start.next();
        let third = second.next();

        // Assert
        assert_eq!(start, CategoryFilter::Unconstrained);
        assert_eq!(second, CategoryFilter::Movie);
        assert_eq!(third, CategoryFilter::Series);
        assert_eq!(third.next(), CategoryFilter::Unconstrained);
    }

    #[test]
    fn test_filter_from_str() {
        // Arrange & Act & Assert
        assert_eq!("".parse::<CategoryFilter>().unwrap(), CategoryFilter::Unconstrained);
        assert_eq!("All".parse::<CategoryFilter>().unwrap(), CategoryFilter::Unconstrained);
        assert_eq!("movies".parse::<CategoryFilter>().unwrap(), CategoryFilter::Movie);
        assert_eq!("series".parse::<CategoryFilter>().unwrap(), CategoryFilter::Series);
        assert!("episode".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_filter_deserialize_accepts_plural_movies() {
        // Arrange & Act
        let plural: CategoryFilter = serde_json::from_str("\"movies\"").unwrap();
        let singular: CategoryFilter = serde_json::from_str("\"movie\"").unwrap();

        // Assert
        assert_eq!(plural, CategoryFilter::Movie);
        assert_eq!(singular, CategoryFilter::Movie);
        assert_eq!(serde_json::to_string(&plural).unwrap(), "\"movie\"");
    }

    #[test]
    fn test_filter_display_matches_config_spelling() {
        // Arrange & Act & Assert
        assert_eq!(CategoryFilter::Unconstrained.to_string(), "all");
        assert_eq!(CategoryFilter::Series.to_string(), "series");
    }

    #[test]
    fn test_parse_search_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/omdb/search_batman_movie.json");

        // Act
        let status: OmdbStatus = serde_json::from_str(json).unwrap();
        let response: OmdbSearchResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert!(status.is_success());
        assert_eq!(response.search.len(), 3);
        assert_eq!(response.total_results.as_deref(), Some("3"));
        let first = &response.search[0];
        assert_eq!(first.id, "tt0372784");
        assert_eq!(first.title, "Batman Begins");
        assert_eq!(first.year, "2005");
        assert_eq!(first.kind.as_deref(), Some("movie"));
        assert!(first.poster_url.is_some());
    }

    #[test]
    fn test_na_poster_becomes_none() {
        // Arrange
        let json = include_str!("../../../../fixtures/omdb/search_batman_movie.json");

        // Act
        let response: OmdbSearchResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(response.search[2].poster_url, None);
    }

    #[test]
    fn test_parse_detail_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/omdb/detail_tt0111161.json");

        // Act
        let detail: MovieDetail = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(detail.id, "tt0111161");
        assert_eq!(detail.title, "The Shawshank Redemption");
        assert_eq!(detail.year, "1994");
        assert!(detail.actors.contains("Morgan Freeman"));
        assert!(detail.plot.starts_with("A banker"));
        assert_eq!(detail.director.as_deref(), Some("Frank Darabont"));
        assert_eq!(detail.runtime.as_deref(), Some("142 min"));
    }

    #[test]
    fn test_parse_failure_status() {
        // Arrange
        let json = include_str!("../../../../fixtures/omdb/search_not_found.json");

        // Act
        let status: OmdbStatus = serde_json::from_str(json).unwrap();

        // Assert
        assert!(!status.is_success());
        assert_eq!(status.message(), "Movie not found!");
    }
}
