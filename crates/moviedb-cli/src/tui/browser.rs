//! Movie browser TUI main loop.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::future::LocalBoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use moviedb_api::omdb::{CategoryFilter, LocalOmdbApi};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::fetch::{FetchOutcome, FetchRequest};
use super::route::Route;
use super::state::{BrowserState, InputMode};
use super::ui;

/// How long one loop turn waits for a fetch before checking the keyboard.
const TICK: Duration = Duration::from_millis(50);

/// Base URL of IMDb title pages.
const IMDB_TITLE_URL: &str = "https://www.imdb.com/title";

/// Startup settings for the browser.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// Term of the initial search.
    pub term: String,
    /// Initial category filter.
    pub filter: CategoryFilter,
    /// Whether a new search jumps back to page 1.
    pub reset_page_on_search: bool,
    /// Route to open on start.
    pub route: Route,
}

/// What the loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyAction {
    Continue,
    Quit,
    Fetch(FetchRequest),
    Open(String),
}

/// Runs the movie browser TUI until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
#[allow(clippy::future_not_send)]
#[tracing::instrument(skip_all, fields(term = %options.term, route = %options.route))]
pub async fn run_browser(api: &(impl LocalOmdbApi + Sync), options: BrowserOptions) -> Result<()> {
    let mut state = BrowserState::new(options.filter, options.reset_page_on_search);
    let initial = initial_requests(&mut state, options);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut state, api, initial).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Issues the startup search and, for a detail start route, its lookup.
fn initial_requests(state: &mut BrowserState, options: BrowserOptions) -> Vec<FetchRequest> {
    let mut requests = vec![FetchRequest::from(state.begin_search(options.term))];
    if let Some(detail) = state.navigate(options.route) {
        requests.push(FetchRequest::from(detail));
    }
    requests
}

/// Main event loop.
#[allow(clippy::future_not_send)]
async fn run_event_loop<'a>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut BrowserState,
    api: &'a (impl LocalOmdbApi + Sync),
    initial: Vec<FetchRequest>,
) -> Result<()> {
    let mut pending: FuturesUnordered<LocalBoxFuture<'a, FetchOutcome>> = initial
        .into_iter()
        .map(|request| request.execute(api).boxed_local())
        .collect();

    loop {
        terminal
            .draw(|frame| ui::draw(frame, state))
            .context("failed to draw TUI")?;

        let outcome = tokio::select! {
            Some(outcome) = pending.next() => Some(outcome),
            () = tokio::time::sleep(TICK) => None,
        };
        if let Some(outcome) = outcome {
            state.apply_outcome(outcome);
        }

        while event::poll(Duration::ZERO).context("failed to poll events")? {
            let Event::Key(key) = event::read().context("failed to read event")? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match handle_key(state, key) {
                KeyAction::Continue => {}
                KeyAction::Quit => return Ok(()),
                KeyAction::Fetch(request) => pending.push(request.execute(api).boxed_local()),
                KeyAction::Open(url) => open_url(&url),
            }
        }
    }
}

/// Dispatches a key press by route and input mode.
fn handle_key(state: &mut BrowserState, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }
    if matches!(state.route, Route::Detail(_)) {
        return handle_detail_input(state, key.code);
    }
    match state.input_mode {
        InputMode::Search => handle_search_input(state, key.code),
        InputMode::Normal => handle_list_input(state, key.code),
    }
}

/// Handles key input while typing a search term.
fn handle_search_input(state: &mut BrowserState, key: KeyCode) -> KeyAction {
    match key {
        KeyCode::Esc => {
            state.search_input.clear();
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            return KeyAction::Fetch(FetchRequest::from(state.submit_search_input()));
        }
        KeyCode::Backspace => {
            state.search_input.pop();
        }
        KeyCode::Char(c) => {
            state.search_input.push(c);
        }
        _ => {}
    }
    KeyAction::Continue
}

/// Handles key input on the result list.
fn handle_list_input(state: &mut BrowserState, key: KeyCode) -> KeyAction {
    match key {
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Char('/' | 's') => {
            state.search_input.clone_from(&state.last_term);
            state.input_mode = InputMode::Search;
        }
        KeyCode::Char('f') => state.cycle_filter(),
        KeyCode::Up | KeyCode::Char('k') => state.move_up(),
        KeyCode::Down | KeyCode::Char('j') => state.move_down(),
        KeyCode::Left | KeyCode::Char('h') => state.previous_page(),
        KeyCode::Right | KeyCode::Char('l') => state.next_page(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(page) = c.to_digit(10).and_then(|d| usize::try_from(d).ok()) {
                state.set_page(page);
            }
        }
        KeyCode::Enter => {
            if let Some(request) = state.open_selected() {
                return KeyAction::Fetch(FetchRequest::from(request));
            }
        }
        KeyCode::Char('o') => {
            if let Some(url) = state.selected_movie().and_then(|m| m.poster_url.clone()) {
                return KeyAction::Open(url);
            }
        }
        _ => {}
    }
    KeyAction::Continue
}

/// Handles key input on the detail page.
fn handle_detail_input(state: &mut BrowserState, key: KeyCode) -> KeyAction {
    match key {
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => state.back_to_list(),
        KeyCode::Char('o') => {
            if let Route::Detail(id) = &state.route {
                return KeyAction::Open(format!("{IMDB_TITLE_URL}/{id}/"));
            }
        }
        _ => {}
    }
    KeyAction::Continue
}

/// Opens a URL in the system browser, logging failures.
fn open_url(url: &str) {
    if let Err(e) = open::that(url) {
        tracing::warn!(url, error = %e, "Failed to open URL");
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]
    #![allow(clippy::panic)]

    use moviedb_api::omdb::{MovieSummary, SearchParams};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ready_state(count: usize) -> BrowserState {
        let mut state = BrowserState::new(CategoryFilter::Unconstrained, true);
        let request = state.begin_search("movies");
        let results = (1..=count)
            .map(|n| MovieSummary {
                id: format!("tt{n:07}"),
                title: format!("Movie {n}"),
                year: String::from("2001"),
                poster_url: Some(format!("https://img.example/{n}.jpg")),
                kind: Some(String::from("movie")),
            })
            .collect();
        state.apply_search(request.generation, Ok(results));
        state
    }

    #[test]
    fn test_initial_requests_list_route() {
        // Arrange
        let mut state = BrowserState::new(CategoryFilter::Unconstrained, true);
        let options = BrowserOptions {
            term: String::from("movies"),
            filter: CategoryFilter::Unconstrained,
            reset_page_on_search: true,
            route: Route::List,
        };

        // Act
        let requests = initial_requests(&mut state, options);

        // Assert
        assert_eq!(requests.len(), 1);
        let FetchRequest::Search(search) = &requests[0] else {
            panic!("expected search request");
        };
        assert_eq!(search.params, SearchParams::new("movies"));
    }

    #[test]
    fn test_initial_requests_detail_route() {
        // Arrange
        let mut state = BrowserState::new(CategoryFilter::Unconstrained, true);
        let options = BrowserOptions {
            term: String::from("movies"),
            filter: CategoryFilter::Unconstrained,
            reset_page_on_search: true,
            route: Route::Detail(String::from("tt0111161")),
        };

        // Act
        let requests = initial_requests(&mut state, options);

        // Assert
        assert_eq!(requests.len(), 2);
        assert!(matches!(&requests[1], FetchRequest::Detail(d) if d.id == "tt0111161"));
        assert_eq!(state.route, Route::Detail(String::from("tt0111161")));
    }

    #[test]
    fn test_filter_key_does_not_fetch() {
        // Arrange
        let mut state = ready_state(4);

        // Act
        let action = handle_key(&mut state, press(KeyCode::Char('f')));

        // Assert
        assert_eq!(action, KeyAction::Continue);
        assert_eq!(state.filter, CategoryFilter::Movie);
    }

    #[test]
    fn test_typed_search_submits_with_filter() {
        // Arrange
        let mut state = ready_state(4);
        handle_key(&mut state, press(KeyCode::Char('f')));
        handle_key(&mut state, press(KeyCode::Char('f')));
        handle_key(&mut state, press(KeyCode::Char('/')));
        for _ in 0.."movies".len() {
            handle_key(&mut state, press(KeyCode::Backspace));
        }

        // Act
        for c in "dexter".chars() {
            handle_key(&mut state, press(KeyCode::Char(c)));
        }
        let action = handle_key(&mut state, press(KeyCode::Enter));

        // Assert
        let KeyAction::Fetch(FetchRequest::Search(request)) = action else {
            panic!("expected search fetch, got {action:?}");
        };
        assert_eq!(
            request.params,
            SearchParams::new("dexter").filter(CategoryFilter::Series)
        );
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_escape_cancels_search_input() {
        // Arrange
        let mut state = ready_state(4);
        handle_key(&mut state, press(KeyCode::Char('s')));
        handle_key(&mut state, press(KeyCode::Char('x')));

        // Act
        let action = handle_key(&mut state, press(KeyCode::Esc));

        // Assert
        assert_eq!(action, KeyAction::Continue);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.search_input.is_empty());
        assert_eq!(state.results.len(), 4);
    }

    #[test]
    fn test_quit_keys_while_typing() {
        // Arrange
        let mut state = ready_state(1);
        handle_key(&mut state, press(KeyCode::Char('/')));

        // Act
        let typed_q = handle_key(&mut state, press(KeyCode::Char('q')));
        let ctrl_c = handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );

        // Assert
        assert_eq!(typed_q, KeyAction::Continue);
        assert_eq!(ctrl_c, KeyAction::Quit);
    }

    #[test]
    fn test_page_keys() {
        // Arrange
        let mut state = ready_state(7);

        // Act & Assert
        handle_key(&mut state, press(KeyCode::Char('3')));
        assert_eq!(state.current_page, 3);
        handle_key(&mut state, press(KeyCode::Left));
        assert_eq!(state.current_page, 2);
        handle_key(&mut state, press(KeyCode::Char('l')));
        assert_eq!(state.current_page, 3);
        handle_key(&mut state, press(KeyCode::Char('9')));
        assert_eq!(state.current_page, 9);
        assert!(state.visible_slice().is_empty());
    }

    #[test]
    fn test_enter_opens_detail_and_back_returns() {
        // Arrange
        let mut state = ready_state(4);
        handle_key(&mut state, press(KeyCode::Char('j')));

        // Act
        let action = handle_key(&mut state, press(KeyCode::Enter));

        // Assert
        assert!(matches!(
            action,
            KeyAction::Fetch(FetchRequest::Detail(ref d)) if d.id == "tt0000002"
        ));
        assert_eq!(
            handle_key(&mut state, press(KeyCode::Char('o'))),
            KeyAction::Open(String::from("https://www.imdb.com/title/tt0000002/"))
        );

        handle_key(&mut state, press(KeyCode::Esc));
        assert_eq!(state.route, Route::List);
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn test_open_poster_on_list() {
        // Arrange
        let mut state = ready_state(2);

        // Act
        let action = handle_key(&mut state, press(KeyCode::Char('o')));

        // Assert
        assert_eq!(
            action,
            KeyAction::Open(String::from("https://img.example/1.jpg"))
        );
    }
}
