//! Detail view state: one outstanding lookup per navigation.

use moviedb_api::omdb::{MovieDetail, OmdbError};

/// Lookup status of the detail view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailStatus {
    /// No identifier requested yet.
    #[default]
    Idle,
    /// Waiting for the lookup to resolve.
    Loading,
    /// Lookup succeeded.
    Ready(Box<MovieDetail>),
    /// Lookup failed; stays until another identifier is requested.
    Failed(String),
}

/// A detail lookup to run, tagged with the navigation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    /// Navigation generation this lookup answers.
    pub generation: u64,
    /// IMDb identifier to look up.
    pub id: String,
}

/// State for the detail view.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct DetailState {
    /// Current lookup status.
    pub status: DetailStatus,
    /// Identifier currently shown or being loaded.
    pub id: Option<String>,
    /// Generation of the latest navigation.
    generation: u64,
}

impl DetailState {
    /// Starts a lookup for `id`, superseding any lookup still in flight.
    pub fn begin(&mut self, id: impl Into<String>) -> DetailRequest {
        let id = id.into();
        self.generation = self.generation.wrapping_add(1);
        self.status = DetailStatus::Loading;
        self.id = Some(id.clone());
        DetailRequest {
            generation: self.generation,
            id,
        }
    }

    /// Applies a lookup result. Returns `false` if it belongs to an older
    /// navigation and was discarded.
    pub fn apply(
        &mut self,
        generation: u64,
        result: Result<MovieDetail, OmdbError>,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "Discarding stale detail response"
            );
            return false;
        }
        self.status = match result {
            Ok(detail) => DetailStatus::Ready(Box::new(detail)),
            Err(err) => {
                tracing::warn!(id = ?self.id, error = %err, "Detail lookup failed");
                DetailStatus::Failed(err.to_string())
            }
        };
        true
    }

    /// Returns the loaded record, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&MovieDetail> {
        match &self.status {
            DetailStatus::Ready(detail) => Some(&**detail),
            _ => None,
        }
    }
}
