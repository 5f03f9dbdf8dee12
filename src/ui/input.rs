//! Input handling for the TUI.
//!
//! This module processes keyboard input and dispatches to the appropriate
//! handler based on current view and mode.

use crate::app::{App, AppEvent, Focus, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::helpers::spawn_load;
use super::Action;

/// Reader lines moved per page key.
const READER_PAGE_LINES: usize = 20;

/// Main input dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Ok(Action::Quit);
    }

    // Help overlay captures all keys when visible
    if app.show_help {
        if matches!(code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
            app.show_help = false;
        }
        return Ok(Action::Continue);
    }

    if app.search_mode {
        handle_search_input(app, code);
        return Ok(Action::Continue);
    }

    match app.view {
        View::Browse => handle_browse_input(app, code, event_tx),
        View::Reader => Ok(handle_reader_input(app, code, modifiers)),
    }
}

fn handle_search_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Enter => app.submit_search(),
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
}

fn handle_browse_input(
    app: &mut App,
    code: KeyCode,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    match code {
        KeyCode::Char('q') => return Ok(Action::Quit),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => {
            if app.menu.is_open() {
                app.toggle_menu();
            }
        }
        KeyCode::Tab => app.cycle_focus(),
        KeyCode::Char('j') | KeyCode::Down => app.nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.nav_up(),
        KeyCode::Enter => match app.focus {
            Focus::Menu => app.select_category_at_cursor(),
            Focus::Articles => {
                if !app.enter_reader() {
                    app.set_status("No articles match");
                }
            }
        },
        KeyCode::Char('m') => app.toggle_menu(),
        KeyCode::Char('/') => app.enter_search(),
        KeyCode::Char('c') => app.clear_filters(),
        KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => app.next_page(),
        KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => app.prev_page(),
        KeyCode::Char('g') | KeyCode::Home => app.first_page(),
        KeyCode::Char('G') | KeyCode::End => app.last_page(),
        KeyCode::Char('r') => spawn_load(app, event_tx),
        KeyCode::Char('o') => open_current_link(app),
        _ => {}
    }
    Ok(Action::Continue)
}

fn handle_reader_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    match code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Esc | KeyCode::Char('b') | KeyCode::Backspace => app.exit_reader(),
        KeyCode::Char('d') if ctrl => app.scroll_down(READER_PAGE_LINES),
        KeyCode::Char('u') if ctrl => app.scroll_up(READER_PAGE_LINES),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(1),
        KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_down(READER_PAGE_LINES),
        KeyCode::PageUp => app.scroll_up(READER_PAGE_LINES),
        KeyCode::Char('g') | KeyCode::Home => app.scroll_offset = 0,
        KeyCode::Char('o') => open_current_link(app),
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
    Action::Continue
}

/// Open the current article in the system browser.
fn open_current_link(app: &mut App) {
    match app.current_link() {
        Ok(url) => {
            if let Err(e) = open::that(url.as_str()) {
                tracing::warn!(url = %url, error = %e, "Failed to open browser");
                app.set_status(format!("Failed to open browser: {}", e));
            } else {
                app.set_status(format!("Opened {}", url));
            }
        }
        Err(e) => app.set_status(e.to_string()),
    }
}
