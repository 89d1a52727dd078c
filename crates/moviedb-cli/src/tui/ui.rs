//! TUI rendering logic for the movie browser.

use moviedb_api::omdb::{CategoryFilter, MovieDetail};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState, Wrap};

use super::detail::DetailStatus;
use super::route::Route;
use super::state::{BrowserState, InputMode, LoadStatus};

/// Application title shown in the header.
const APP_TITLE: &str = "The Movie Application";
/// Placeholder while the result list loads.
const LIST_LOADING: &str = "Data is loading please wait ......";
/// Placeholder while a detail record loads.
const DETAIL_LOADING: &str = "Data is loading please wait.......";
/// Shown when a detail lookup fails.
const DETAIL_FAILED: &str = "Error loading the details";

const FILTERS: [CategoryFilter; 3] = [
    CategoryFilter::Unconstrained,
    CategoryFilter::Movie,
    CategoryFilter::Series,
];

/// Draws the browser UI for the active route.
pub fn draw(frame: &mut Frame, state: &BrowserState) {
    match &state.route {
        Route::List => draw_list_route(frame, state),
        Route::Detail(_) => draw_detail_route(frame, state),
    }
}

/// Draws the result list route.
#[allow(clippy::indexing_slicing)]
fn draw_list_route(frame: &mut Frame, state: &BrowserState) {
    match &state.status {
        LoadStatus::Loading => {
            draw_status_page(frame, state, Paragraph::new(LIST_LOADING));
        }
        LoadStatus::Failed(message) => {
            let error = Paragraph::new(format!("Error: {message}"))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: false });
            draw_status_page(frame, state, error);
        }
        LoadStatus::Ready => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // header
                    Constraint::Min(5),    // results
                    Constraint::Length(3), // pagination
                    Constraint::Length(3), // footer
                ])
                .split(frame.area());

            draw_header(frame, chunks[0], state);
            draw_results(frame, chunks[1], state);
            draw_pagination(frame, chunks[2], state);
            draw_footer(frame, chunks[3], state);
        }
    }
}

/// Draws a full-page status message, with the search input below it while
/// a term is being typed.
#[allow(clippy::indexing_slicing)]
fn draw_status_page(frame: &mut Frame, state: &BrowserState, message: Paragraph<'_>) {
    if state.input_mode != InputMode::Search {
        frame.render_widget(message, frame.area());
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(frame.area());
    frame.render_widget(message, chunks[0]);
    frame.render_widget(search_input(state), chunks[1]);
}

/// Builds the search input box, highlighted while typing.
fn search_input(state: &BrowserState) -> Paragraph<'static> {
    let (search_text, search_style) = if state.input_mode == InputMode::Search {
        (
            format!("{}_", state.search_input),
            Style::default().fg(Color::Yellow),
        )
    } else {
        (state.last_term.clone(), Style::default())
    };

    Paragraph::new(search_text).style(search_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {APP_TITLE} | Search: / ")),
    )
}

/// Draws the header with search input and filter selector.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    frame.render_widget(search_input(state), header_chunks[0]);

    let spans: Vec<Span> = FILTERS
        .iter()
        .flat_map(|&filter| {
            let style = if filter == state.filter {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            [
                Span::styled(format!("[{}]", filter.label()), style),
                Span::raw(" "),
            ]
        })
        .collect();
    let filters = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Type: f "));
    frame.render_widget(filters, header_chunks[1]);
}

/// Draws the visible slice of results.
fn draw_results(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let block = Block::default().borders(Borders::ALL).title(" Results ");
    let visible = state.visible_slice();

    if visible.is_empty() {
        let empty = Paragraph::new("No movies found")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec!["Title", "Year", "Type", "IMDb"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = visible
        .iter()
        .map(|movie| {
            Row::new(vec![
                movie.title.clone(),
                movie.year.clone(),
                movie.kind.clone().unwrap_or_else(|| String::from("--")),
                movie.id.clone(),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(11),
        Constraint::Length(8),
        Constraint::Length(11),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("\u{25b8} ");

    let mut table_state = TableState::default().with_selected(Some(state.cursor));
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// Draws the page buttons and page position.
fn draw_pagination(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let mut spans: Vec<Span> = state
        .page_buttons()
        .into_iter()
        .flat_map(|page| {
            let style = if page == state.current_page {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            [Span::styled(format!(" {page} "), style), Span::raw(" ")]
        })
        .collect();
    let total_pages = state.total_pages();
    if total_pages > 0 {
        spans.push(Span::styled(
            format!(" Page {} of {total_pages} ", state.current_page),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let bar = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(bar, area);
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let help_text = if state.input_mode == InputMode::Search {
        "Type a search term | Enter: search | Esc: cancel"
    } else {
        "/: search  f: type  \u{2191}\u{2193}/j/k: move  \u{2190}\u{2192}/h/l: page  1-9: go to page  Enter: details  o: poster  q: quit"
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Draws the detail route.
#[allow(clippy::indexing_slicing)]
fn draw_detail_route(frame: &mut Frame, state: &BrowserState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // detail
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {APP_TITLE} "));

    let body = if let Some(detail) = state.detail.detail() {
        Paragraph::new(detail_lines(detail))
            .wrap(Wrap { trim: false })
            .block(block)
    } else if matches!(state.detail.status, DetailStatus::Failed(_)) {
        Paragraph::new(DETAIL_FAILED)
            .style(Style::default().fg(Color::Red))
            .block(block)
    } else {
        Paragraph::new(DETAIL_LOADING).block(block)
    };
    frame.render_widget(body, chunks[0]);

    let footer = Paragraph::new("Esc/b: back  o: open IMDb page  q: quit")
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[1]);
}

/// Builds the lines of a loaded detail record.
fn detail_lines(detail: &MovieDetail) -> Vec<Line<'static>> {
    let label = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let field = |name: &'static str, value: String| {
        Line::from(vec![Span::styled(format!("{name}: "), label), Span::raw(value)])
    };

    let mut lines = vec![
        Line::from(Span::styled(
            detail.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field("Year", detail.year.clone()),
    ];
    let optional = [
        ("Genre", &detail.genre),
        ("Director", &detail.director),
        ("Runtime", &detail.runtime),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            lines.push(field(name, value.clone()));
        }
    }
    lines.push(field("Actors", detail.actors.clone()));
    lines.push(Line::from(""));
    lines.push(field("Plot", detail.plot.clone()));
    lines.push(Line::from(""));
    lines.push(field(
        "Poster",
        detail
            .poster_url
            .clone()
            .unwrap_or_else(|| String::from("--")),
    ));
    lines
}
