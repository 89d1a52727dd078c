//! Browser state: the single owner of all mutable UI state.
//!
//! Search results, load status, the active filter and the current page live
//! here; the visible slice and the pagination controls are derived on
//! demand and never stored. Requests leave this module as plain values
//! ([`SearchRequest`], [`DetailRequest`]) tagged with a generation, and
//! responses come back through [`BrowserState::apply_search`] and
//! [`DetailState::apply`], which drop anything from a superseded request.

use moviedb_api::omdb::{CategoryFilter, MovieSummary, OmdbError, SearchParams};

use super::detail::{DetailRequest, DetailState};
use super::route::Route;
use crate::pagination;

/// Load status of the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// A search is in flight; no results are shown.
    Loading,
    /// The latest search resolved (possibly with zero results).
    Ready,
    /// The latest search failed with the given message.
    Failed(String),
}

/// Input mode for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// Search term input mode.
    Search,
}

/// A search to run, tagged with the generation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Search generation this request answers.
    pub generation: u64,
    /// Term and category to search for.
    pub params: SearchParams,
}

/// State for the movie browser TUI.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowserState {
    /// Results of the most recent search.
    pub results: Vec<MovieSummary>,
    /// Load status of the result list.
    pub status: LoadStatus,
    /// Category applied to the next search.
    pub filter: CategoryFilter,
    /// Current 1-based page number (unvalidated).
    pub current_page: usize,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Search term being typed.
    pub search_input: String,
    /// Term of the most recent search.
    pub last_term: String,
    /// Cursor within the visible slice.
    pub cursor: usize,
    /// Active route.
    pub route: Route,
    /// Detail view state.
    pub detail: DetailState,
    /// Whether a new search jumps back to page 1.
    reset_page_on_search: bool,
    /// Generation of the latest search.
    search_generation: u64,
}

impl BrowserState {
    /// Creates the initial state: loading, page 1, list route.
    #[must_use]
    pub fn new(filter: CategoryFilter, reset_page_on_search: bool) -> Self {
        Self {
            results: Vec::new(),
            status: LoadStatus::Loading,
            filter,
            current_page: 1,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            last_term: String::new(),
            cursor: 0,
            route: Route::List,
            detail: DetailState::default(),
            reset_page_on_search,
            search_generation: 0,
        }
    }

    /// Starts a search for `term` with the active filter.
    ///
    /// Discards the current results and enters `Loading`; any search still
    /// in flight is superseded.
    pub fn begin_search(&mut self, term: impl Into<String>) -> SearchRequest {
        let term = term.into();
        self.search_generation = self.search_generation.wrapping_add(1);
        self.results.clear();
        self.status = LoadStatus::Loading;
        self.cursor = 0;
        if self.reset_page_on_search {
            self.current_page = 1;
        }
        self.last_term.clone_from(&term);
        tracing::info!(
            generation = self.search_generation,
            term = %term,
            filter = %self.filter,
            "Search started"
        );
        SearchRequest {
            generation: self.search_generation,
            params: SearchParams::new(term).filter(self.filter),
        }
    }

    /// Submits the typed search term and leaves input mode.
    pub fn submit_search_input(&mut self) -> SearchRequest {
        self.input_mode = InputMode::Normal;
        let term = std::mem::take(&mut self.search_input);
        self.begin_search(term)
    }

    /// Applies a search result. Returns `false` if it belongs to a
    /// superseded search and was discarded.
    pub fn apply_search(
        &mut self,
        generation: u64,
        result: Result<Vec<MovieSummary>, OmdbError>,
    ) -> bool {
        if generation != self.search_generation {
            tracing::debug!(
                generation,
                current = self.search_generation,
                "Discarding stale search response"
            );
            return false;
        }
        match result {
            Ok(results) => {
                tracing::info!(count = results.len(), "Search complete");
                self.results = results;
                self.status = LoadStatus::Ready;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Search failed");
                self.results.clear();
                self.status = LoadStatus::Failed(err.to_string());
            }
        }
        true
    }

    /// Sets the filter for the next search. Does not search.
    pub const fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// Advances the filter selector to the next category. Does not search.
    pub const fn cycle_filter(&mut self) {
        self.set_filter(self.filter.next());
    }

    /// Jumps to page `page` without checking it against the page count.
    pub const fn set_page(&mut self, page: usize) {
        self.current_page = page;
        self.cursor = 0;
    }

    /// Steps to the following page.
    pub const fn next_page(&mut self) {
        self.set_page(self.current_page.saturating_add(1));
    }

    /// Steps to the preceding page, stopping at page 1.
    pub fn previous_page(&mut self) {
        self.set_page(self.current_page.saturating_sub(1).max(1));
    }

    /// Results shown on the current page.
    #[must_use]
    pub fn visible_slice(&self) -> &[MovieSummary] {
        pagination::visible_slice(&self.results, self.current_page)
    }

    /// Number of result pages.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        pagination::total_pages(self.results.len())
    }

    /// Page numbers offered as buttons.
    #[must_use]
    pub fn page_buttons(&self) -> Vec<usize> {
        pagination::page_buttons(self.results.len())
    }

    /// Moves the cursor up within the visible slice.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Moves the cursor down within the visible slice.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.visible_slice().len() {
            self.cursor += 1;
        }
    }

    /// Returns the summary under the cursor, if any.
    #[must_use]
    pub fn selected_movie(&self) -> Option<&MovieSummary> {
        self.visible_slice().get(self.cursor)
    }

    /// Navigates to `route`, returning the lookup a detail route needs.
    pub fn navigate(&mut self, route: Route) -> Option<DetailRequest> {
        tracing::debug!(%route, "Navigate");
        self.route = route;
        match &self.route {
            Route::List => None,
            Route::Detail(id) => {
                let id = id.clone();
                Some(self.detail.begin(id))
            }
        }
    }

    /// Opens the detail page of the summary under the cursor.
    pub fn open_selected(&mut self) -> Option<DetailRequest> {
        let id = self.selected_movie()?.id.clone();
        self.navigate(Route::Detail(id))
    }

    /// Returns to the result list, keeping results and page.
    pub fn back_to_list(&mut self) {
        self.route = Route::List;
    }
}
