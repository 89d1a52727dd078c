//! Requests issued by the browser and the outcomes fed back into its state.

use moviedb_api::omdb::{LocalOmdbApi, MovieDetail, MovieSummary, OmdbError};

use super::detail::DetailRequest;
use super::state::{BrowserState, SearchRequest};

/// A request the browser wants executed against the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    /// Title search.
    Search(SearchRequest),
    /// Detail lookup for one identifier.
    Detail(DetailRequest),
}

/// A resolved request, tagged with the generation it was issued under.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Search finished.
    Search {
        /// Search generation.
        generation: u64,
        /// Results or failure.
        result: Result<Vec<MovieSummary>, OmdbError>,
    },
    /// Detail lookup finished.
    Detail {
        /// Navigation generation.
        generation: u64,
        /// Record or failure.
        result: Result<MovieDetail, OmdbError>,
    },
}

impl From<SearchRequest> for FetchRequest {
    fn from(request: SearchRequest) -> Self {
        Self::Search(request)
    }
}

impl From<DetailRequest> for FetchRequest {
    fn from(request: DetailRequest) -> Self {
        Self::Detail(request)
    }
}

impl FetchRequest {
    /// Runs the request. Failures are carried in the outcome, never raised.
    #[allow(clippy::future_not_send)]
    pub async fn execute(self, api: &(impl LocalOmdbApi + Sync)) -> FetchOutcome {
        match self {
            Self::Search(request) => FetchOutcome::Search {
                generation: request.generation,
                result: api.search(&request.params).await,
            },
            Self::Detail(request) => FetchOutcome::Detail {
                generation: request.generation,
                result: api.movie_detail(&request.id).await,
            },
        }
    }
}

impl BrowserState {
    /// Feeds a resolved request back into the state. Returns `false` if it
    /// was stale and discarded.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) -> bool {
        match outcome {
            FetchOutcome::Search { generation, result } => self.apply_search(generation, result),
            FetchOutcome::Detail { generation, result } => self.detail.apply(generation, result),
        }
    }
}
