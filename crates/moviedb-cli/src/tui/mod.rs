//! TUI module for the interactive movie browser.
//!
//! Uses `ratatui` + `crossterm` for rendering.

mod browser;
/// Detail view state.
pub mod detail;
/// API requests and their outcomes.
pub mod fetch;
/// Navigation routes.
pub mod route;
/// Browser state types.
pub mod state;
mod ui;

pub use browser::{BrowserOptions, run_browser};
