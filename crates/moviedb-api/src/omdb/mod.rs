//! OMDb API client module.
//!
//! Handles HTTP requests to the OMDb endpoint and retrieves
//! search summaries and per-title details.

mod api;
mod client;
mod error;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalOmdbApi, OmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, OmdbClient, OmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::{OmdbError, ParseFilterError, Result};
pub use types::{CategoryFilter, MovieDetail, MovieSummary, SearchParams};
