//! UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use readlist_core::{Book, Status, Store};

use super::app::{App, InputMode, SearchFocus};
use crate::output::{empty_column_text, or_dash, truncate};

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App, store: &Store) {
    // Create vertical layout for status bar at the bottom
    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let column_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(outer_chunks[0]);

    for (status, area) in Status::ALL.into_iter().zip(column_chunks.iter()) {
        draw_column(frame, app, store, status, *area);
    }

    match app.input_mode {
        InputMode::Confirm => draw_confirm_prompt(frame, app, outer_chunks[1]),
        InputMode::Normal | InputMode::Search => draw_status_bar(frame, app, outer_chunks[1]),
    }

    if app.input_mode == InputMode::Search {
        draw_search_popup(frame, app, store);
    }

    if app.show_help {
        draw_help_overlay(frame);
    }

    if let Some(error) = &app.error_message {
        draw_error_modal(frame, error);
    }
}

/// Draw one status column
fn draw_column(frame: &mut Frame, app: &App, store: &Store, status: Status, area: Rect) {
    let is_active = app.column == status && app.input_mode != InputMode::Search;
    let books = store.partition(status);

    let border_style = if is_active {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let block = Block::default()
        .title(format!(" {} ({}) ", status.label(), books.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    if books.is_empty() {
        let proverb = Paragraph::new(Line::from(Span::styled(
            empty_column_text(status),
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        )))
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(proverb, area);
        return;
    }

    let max_len = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = books
        .iter()
        .map(|book| book_item(book, max_len))
        .collect();

    let highlight_style = if is_active {
        Style::default()
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style);

    let mut state = ListState::default();
    state.select(Some(app.selected_in(status)));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Two-line list entry: title, then author, year and pages
fn book_item(book: &Book, max_len: usize) -> ListItem<'static> {
    let details = format!(
        "{} · {} · {} pages",
        book.authors(),
        or_dash(book.first_publish_year),
        or_dash(book.number_of_pages_median)
    );

    ListItem::new(vec![
        Line::from(truncate(&book.title, max_len)),
        Line::from(Span::styled(
            truncate(&details, max_len),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ])
}

/// Draw the status bar at the bottom
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let content = if app.is_loading {
        "Searching...".to_string()
    } else if let Some(msg) = &app.status_message {
        msg.clone()
    } else if app.input_mode == InputMode::Search {
        "Enter:search/add  j/k:select  [/]:page  Tab:switch  Esc:close".to_string()
    } else {
        "a:search  1/2/3:status  J/K:reorder  x:remove  u:undo  o:open  ?:help  q:quit"
            .to_string()
    };

    let paragraph = Paragraph::new(content).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Draw the y/n prompt for a pending removal
fn draw_confirm_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let title = app
        .pending_remove
        .as_ref()
        .map(|b| b.title.as_str())
        .unwrap_or_default();

    let line = Line::from(vec![
        Span::styled("Remove ", Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("'{}'", title),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("? [y/N]", Style::default().fg(Color::Yellow)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the catalog search overlay
fn draw_search_popup(frame: &mut Frame, app: &App, store: &Store) {
    let area = centered(frame.area(), 90, 80);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Search the catalog ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

    // Query line
    let prefix = "> ";
    let input_style = if app.search.focus == SearchFocus::Input {
        Style::default()
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    let query = Line::from(vec![
        Span::styled(prefix, Style::default().fg(Color::Cyan)),
        Span::styled(app.search.input.as_str(), input_style),
    ]);
    frame.render_widget(Paragraph::new(query), chunks[0]);
    if app.search.focus == SearchFocus::Input {
        let cursor_x = chunks[0].x + prefix.len() as u16 + app.search.cursor as u16;
        frame.set_cursor_position((cursor_x, chunks[0].y));
    }

    let Some(results) = &app.search.results else {
        let hint = Paragraph::new(Span::styled(
            "Type a title or author and press Enter",
            Style::default().add_modifier(Modifier::DIM),
        ));
        frame.render_widget(hint, chunks[2]);
        return;
    };

    if results.docs.is_empty() {
        let none = Paragraph::new(Span::styled(
            format!("No books found for '{}'", results.query),
            Style::default().add_modifier(Modifier::DIM),
        ));
        frame.render_widget(none, chunks[2]);
        return;
    }

    let width = chunks[2].width as usize;
    let title_width = (width / 2).max(10);
    let author_width = (width / 4).max(8);
    let items: Vec<ListItem> = results
        .docs
        .iter()
        .map(|doc| {
            let tracked = store.contains(&doc.key);
            let marker = if tracked { "✓ " } else { "  " };
            let text = format!(
                "{}{:<tw$} {:<aw$} {:>4} {:>5}",
                marker,
                truncate(doc.title.as_deref().unwrap_or("Untitled"), title_width),
                truncate(&doc.author_name.join(", "), author_width),
                or_dash(doc.first_publish_year),
                or_dash(doc.number_of_pages_median),
                tw = title_width,
                aw = author_width,
            );
            let style = if tracked {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(text, style))
        })
        .collect();

    let highlight_style = if app.search.focus == SearchFocus::Results {
        Style::default()
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };

    let list = List::new(items).highlight_style(highlight_style);
    let mut state = ListState::default();
    state.select(Some(app.search.selected));
    frame.render_stateful_widget(list, chunks[2], &mut state);

    let (start, end) = results.shown_range();
    let mut footer = vec![Span::styled(
        format!(
            "Showing {} - {} out of {}  (page {} of {})",
            start,
            end,
            results.num_found,
            results.page,
            results.total_pages()
        ),
        Style::default().add_modifier(Modifier::DIM),
    )];
    if results.has_prev() {
        footer.push(Span::raw("  [ prev"));
    }
    if results.has_next() {
        footer.push(Span::raw("  ] next"));
    }
    frame.render_widget(Paragraph::new(Line::from(footer)), chunks[3]);
}

/// Draw help overlay
fn draw_help_overlay(frame: &mut Frame) {
    let popup_area = centered_fixed(frame.area(), 52, 22);
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("Navigation:"),
        Line::from("  j/k, ↑/↓    Move up/down"),
        Line::from("  h/l, ←/→    Switch columns"),
        Line::from("  J/K         Move book down/up in its column"),
        Line::from(""),
        Line::from("Books:"),
        Line::from("  1           Move to Currently Reading"),
        Line::from("  2           Move to For Later"),
        Line::from("  3           Move to Done"),
        Line::from("  x           Remove book"),
        Line::from("  u           Undo remove"),
        Line::from("  o           Open catalog page"),
        Line::from(""),
        Line::from("  a, /        Search the catalog"),
        Line::from("  [ / ]       Previous / next result page"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, popup_area);
}

/// Draw an error modal
fn draw_error_modal(frame: &mut Frame, message: &str) {
    let popup_area = centered_fixed(frame.area(), 60, 8);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to dismiss",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}

/// Rectangle covering a percentage of `area`, centered
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    centered_fixed(area, width, height)
}

/// Rectangle of a fixed size (clamped to `area`), centered
fn centered_fixed(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
