//! readlist TUI
//!
//! Terminal user interface for the reading list.
//!
//! ## Layout
//!
//! Three columns: Currently Reading, For Later, Done.
//!
//! ## Navigation
//!
//! - h/l or ←/→: Switch column
//! - j/k or ↑/↓: Move selection up/down
//! - J/K: Move the selected book down/up within its column
//! - q: Quit
//!
//! ## Commands
//!
//! - 1/2/3: Move to Currently Reading / For Later / Done
//! - x: Remove (asks y/n)
//! - u: Undo remove
//! - o: Open the catalog page
//! - a or /: Search the catalog

mod app;
mod ui;

use std::io::stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use readlist_core::{CatalogClient, Hydration, Status, Store};
use tracing::debug;

use app::{App, InputMode, SearchFocus};

/// Run the TUI application
pub async fn run(mut store: Store) -> Result<()> {
    let client = CatalogClient::new(&store.config().catalog_url)?;

    let mut app = App::new(&store);
    if let Hydration::Recovered { backup_key, .. } = store.hydration() {
        app.set_error(format!(
            "Your saved reading list could not be read and was reset.\n\
             The old data was kept under '{}'.",
            backup_key
        ));
    }

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_app(&mut terminal, &mut app, &mut store, &client).await;

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &mut Store,
    client: &CatalogClient,
) -> Result<()> {
    loop {
        app.check_status_timeout();

        terminal.draw(|frame| ui::draw(frame, app, store))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Only handle key press events (not release)
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // If error modal is showing, any key dismisses it
        if app.has_error() {
            app.clear_error();
            continue;
        }

        // If help is showing, any key dismisses it
        if app.show_help {
            app.show_help = false;
            continue;
        }

        match app.input_mode {
            InputMode::Normal => handle_normal_mode(app, store, key.code, key.modifiers),
            InputMode::Confirm => {
                let accepted = matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'));
                if let Err(e) = app.confirm_remove(store, accepted) {
                    app.set_error(format!("Failed to remove book: {}", e));
                }
            }
            InputMode::Search => {
                handle_search_mode(terminal, app, store, client, key.code, key.modifiers).await?
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle key events in normal mode
fn handle_normal_mode(app: &mut App, store: &mut Store, code: KeyCode, modifiers: KeyModifiers) {
    match code {
        // Quit
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        // Navigation
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(store),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => app.prev_column(),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => app.next_column(),

        // Reorder within the column
        KeyCode::Char('K') => {
            if let Err(e) = app.move_selected_within(store, -1) {
                app.set_error(format!("Failed to reorder: {}", e));
            }
        }
        KeyCode::Char('J') => {
            if let Err(e) = app.move_selected_within(store, 1) {
                app.set_error(format!("Failed to reorder: {}", e));
            }
        }

        // Status changes
        KeyCode::Char(c @ ('1' | '2' | '3')) => {
            let status = match c {
                '1' => Status::InProgress,
                '2' => Status::Backlog,
                _ => Status::Done,
            };
            if let Err(e) = app.set_current_status(store, status) {
                app.set_error(format!("Failed to update status: {}", e));
            }
        }

        KeyCode::Char('x') | KeyCode::Delete => app.request_remove(store),
        KeyCode::Char('u') => {
            if let Err(e) = app.undo_remove(store) {
                app.set_error(format!("Failed to undo remove: {}", e));
            }
        }
        KeyCode::Char('o') | KeyCode::Enter => app.open_current(store),

        KeyCode::Char('a') | KeyCode::Char('/') => app.enter_search_mode(),
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

/// Handle key events while the search overlay is open
async fn handle_search_mode<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &mut Store,
    client: &CatalogClient,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> Result<()> {
    if code == KeyCode::Esc
        || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
    {
        app.exit_search_mode();
        return Ok(());
    }

    match app.search.focus {
        SearchFocus::Input => match code {
            KeyCode::Enter => {
                if let Some(query) = app.search_query() {
                    run_search(terminal, app, store, client, query, 1).await?;
                }
            }
            KeyCode::Down | KeyCode::Tab => {
                if app.search.results.is_some() {
                    app.search.focus = SearchFocus::Results;
                }
            }
            KeyCode::Char(c) => app.search.insert_char(c),
            KeyCode::Backspace => app.search.delete_char(),
            KeyCode::Left => app.search.cursor_left(),
            KeyCode::Right => app.search.cursor_right(),
            _ => {}
        },
        SearchFocus::Results => match code {
            KeyCode::Char('k') | KeyCode::Up => app.search.move_up(),
            KeyCode::Char('j') | KeyCode::Down => app.search.move_down(),
            KeyCode::Enter => {
                if let Err(e) = app.add_selected_result(store) {
                    app.set_error(format!("Failed to add book: {}", e));
                }
            }
            KeyCode::Char('[') => {
                if let Some((query, page)) = page_request(app, app.search.prev_page()) {
                    run_search(terminal, app, store, client, query, page).await?;
                }
            }
            KeyCode::Char(']') => {
                if let Some((query, page)) = page_request(app, app.search.next_page()) {
                    run_search(terminal, app, store, client, query, page).await?;
                }
            }
            KeyCode::Char('/') | KeyCode::Char('i') | KeyCode::Tab => {
                app.search.focus = SearchFocus::Input;
            }
            _ => {}
        },
    }

    Ok(())
}

/// Query and page for paging through the current results
fn page_request(app: &App, page: Option<usize>) -> Option<(String, usize)> {
    let query = app.search.results.as_ref()?.query.clone();
    Some((query, page?))
}

/// Fetch a result page, redrawing with a loading indicator meanwhile
async fn run_search<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &Store,
    client: &CatalogClient,
    query: String,
    page: usize,
) -> Result<()> {
    debug!("Searching '{}' page {}", query, page);
    app.is_loading = true;
    terminal.draw(|frame| ui::draw(frame, app, store))?;

    let result = client.search(&query, page).await;
    app.is_loading = false;
    app.apply_search_result(result);
    Ok(())
}
