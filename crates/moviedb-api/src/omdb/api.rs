//! `OmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::Result;
use super::types::{MovieDetail, MovieSummary, SearchParams};

/// OMDb API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(OmdbApi: Send)]
pub trait LocalOmdbApi {
    /// Searches titles by term and category.
    ///
    /// Returns an empty list when the service reports no matches.
    ///
    /// # Errors
    ///
    /// Returns [`super::OmdbError::Network`] if the request cannot complete and
    /// [`super::OmdbError::Service`] if the service reports a failure.
    async fn search(&self, params: &SearchParams) -> Result<Vec<MovieSummary>>;

    /// Fetches the full record for one IMDb identifier.
    ///
    /// # Errors
    ///
    /// Returns [`super::OmdbError::NotFound`] for an unknown identifier,
    /// [`super::OmdbError::Network`] on transport failure and
    /// [`super::OmdbError::Service`] for any other reported failure.
    async fn movie_detail(&self, id: &str) -> Result<MovieDetail>;
}
