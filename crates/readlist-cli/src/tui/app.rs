//! Application state and logic

use std::time::{Duration, Instant};

use readlist_core::{Book, CatalogError, SearchDoc, SearchPage, Status, Store};

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation across the three columns
    Normal,
    /// Search overlay is open
    Search,
    /// Waiting for y/n on a pending removal
    Confirm,
}

/// Which part of the search overlay has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    Input,
    Results,
}

/// State of the search overlay
#[derive(Debug, Clone)]
pub struct SearchState {
    /// Query being typed
    pub input: String,
    /// Cursor position in `input`, in characters
    pub cursor: usize,
    /// Last successful result page
    pub results: Option<SearchPage>,
    /// Selected result index
    pub selected: usize,
    pub focus: SearchFocus,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            input: String::new(),
            cursor: 0,
            results: None,
            selected: 0,
            focus: SearchFocus::Input,
        }
    }
}

impl SearchState {
    /// Insert character at cursor position
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index();
        self.input.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.input.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.input.chars().count() {
            self.cursor += 1;
        }
    }

    /// Currently selected result
    pub fn selected_doc(&self) -> Option<&SearchDoc> {
        self.results.as_ref()?.docs.get(self.selected)
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let len = self.results.as_ref().map_or(0, |r| r.docs.len());
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    /// Page to request for the previous page, if there is one
    pub fn prev_page(&self) -> Option<usize> {
        let results = self.results.as_ref()?;
        results.has_prev().then(|| results.page - 1)
    }

    /// Page to request for the next page, if there is one
    pub fn next_page(&self) -> Option<usize> {
        let results = self.results.as_ref()?;
        results.has_next().then(|| results.page + 1)
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map_or(self.input.len(), |(i, _)| i)
    }
}

/// Application state
pub struct App {
    /// Whether the app should exit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Column with focus
    pub column: Status,
    /// Selected row in each column, indexed like `Status::ALL`
    pub selected: [usize; 3],
    /// Status message to display temporarily
    pub status_message: Option<String>,
    /// When the status message was set (for auto-dismiss)
    pub status_message_time: Option<Instant>,
    /// Error shown in a modal until a key is pressed
    pub error_message: Option<String>,
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Whether a catalog request is in flight
    pub is_loading: bool,
    /// Book waiting for removal confirmation
    pub pending_remove: Option<Book>,
    /// Last removed book (for undo)
    pub deleted_book: Option<Book>,
    /// Search overlay state
    pub search: SearchState,
    /// Base URL of the catalog, for opening book pages
    pub catalog_url: String,
}

impl App {
    /// Create a new app for the given store
    pub fn new(store: &Store) -> Self {
        // Start on the first column that has books
        let column = Status::ALL
            .into_iter()
            .find(|s| !store.partition(*s).is_empty())
            .unwrap_or(Status::InProgress);

        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            column,
            selected: [0; 3],
            status_message: None,
            status_message_time: None,
            error_message: None,
            show_help: false,
            is_loading: false,
            pending_remove: None,
            deleted_book: None,
            search: SearchState::default(),
            catalog_url: store.config().catalog_url.clone(),
        }
    }

    /// Set a status message (will auto-dismiss after 3 seconds)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Check and clear expired status message
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() > Duration::from_secs(3) {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    // ==================== Navigation ====================

    /// Selected row of the focused column
    pub fn selected_row(&self) -> usize {
        self.selected[column_index(self.column)]
    }

    /// Selected row for any column
    pub fn selected_in(&self, status: Status) -> usize {
        self.selected[column_index(status)]
    }

    fn set_selected_row(&mut self, row: usize) {
        self.selected[column_index(self.column)] = row;
    }

    /// Get the currently selected book
    pub fn current_book<'a>(&self, store: &'a Store) -> Option<&'a Book> {
        store.partition(self.column).get(self.selected_row()).copied()
    }

    pub fn move_up(&mut self) {
        let row = self.selected_row().saturating_sub(1);
        self.set_selected_row(row);
    }

    pub fn move_down(&mut self, store: &Store) {
        let len = store.partition(self.column).len();
        let row = self.selected_row();
        if row + 1 < len {
            self.set_selected_row(row + 1);
        }
    }

    pub fn prev_column(&mut self) {
        let i = column_index(self.column);
        self.column = Status::ALL[(i + Status::ALL.len() - 1) % Status::ALL.len()];
    }

    pub fn next_column(&mut self) {
        let i = column_index(self.column);
        self.column = Status::ALL[(i + 1) % Status::ALL.len()];
    }

    /// Keep every selection inside its column after the list changed
    pub fn clamp_selection(&mut self, store: &Store) {
        for status in Status::ALL {
            let len = store.partition(status).len();
            let row = &mut self.selected[column_index(status)];
            *row = (*row).min(len.saturating_sub(1));
        }
    }

    // ==================== Book actions ====================

    /// Move the selected book up (`delta < 0`) or down within its column
    pub fn move_selected_within(&mut self, store: &mut Store, delta: isize) -> anyhow::Result<()> {
        if self.column == Status::Done {
            self.set_status("Finished books keep their order");
            return Ok(());
        }

        let len = store.partition(self.column).len();
        let from = self.selected_row();
        let Some(to) = from.checked_add_signed(delta).filter(|to| *to < len) else {
            return Ok(());
        };
        if from >= len {
            return Ok(());
        }

        store.reorder(self.column, from, to)?;
        self.set_selected_row(to);
        Ok(())
    }

    /// Move the selected book to another status
    pub fn set_current_status(&mut self, store: &mut Store, status: Status) -> anyhow::Result<()> {
        let Some(book) = self.current_book(store).cloned() else {
            return Ok(());
        };

        if book.status == status {
            self.set_status(format!("'{}' is already in {}", book.title, status.label()));
            return Ok(());
        }

        store.set_status(&book.key, status)?;
        self.clamp_selection(store);
        self.set_status(format!("Moved '{}' to {}", book.title, status.label()));
        Ok(())
    }

    /// Ask for confirmation before removing the selected book
    pub fn request_remove(&mut self, store: &Store) {
        if let Some(book) = self.current_book(store).cloned() {
            self.pending_remove = Some(book);
            self.input_mode = InputMode::Confirm;
        }
    }

    /// Resolve the pending removal
    pub fn confirm_remove(&mut self, store: &mut Store, accepted: bool) -> anyhow::Result<()> {
        self.input_mode = InputMode::Normal;
        let Some(book) = self.pending_remove.take() else {
            return Ok(());
        };

        if !accepted {
            self.set_status("Cancelled");
            return Ok(());
        }

        if let Some(removed) = store.remove(&book.key)? {
            self.set_status(format!("Removed '{}'. Press u to undo", removed.title));
            self.deleted_book = Some(removed);
        }
        self.clamp_selection(store);
        Ok(())
    }

    /// Undo last removal
    ///
    /// The book goes back to the end of its column.
    pub fn undo_remove(&mut self, store: &mut Store) -> anyhow::Result<()> {
        let Some(book) = self.deleted_book.take() else {
            self.set_status("Nothing to undo");
            return Ok(());
        };

        if store.contains(&book.key) {
            self.set_status(format!("'{}' is already on your list", book.title));
            return Ok(());
        }

        let title = book.title.clone();
        store.add(book)?;
        self.set_status(format!("Restored '{}'", title));
        Ok(())
    }

    /// Catalog page of the selected book
    pub fn current_book_url(&self, store: &Store) -> Option<String> {
        self.current_book(store)
            .map(|b| format!("{}{}", self.catalog_url.trim_end_matches('/'), b.key))
    }

    /// Open the selected book's catalog page in the browser
    pub fn open_current(&mut self, store: &Store) {
        let Some(url) = self.current_book_url(store) else {
            return;
        };
        match open::that_detached(&url) {
            Ok(()) => self.set_status(format!("Opened {}", url)),
            Err(e) => self.set_status(format!("Failed to open: {}", e)),
        }
    }

    // ==================== Search ====================

    /// Open the search overlay, keeping the last query and results
    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Search;
        self.search.focus = SearchFocus::Input;
    }

    pub fn exit_search_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Query to send, or None when the input is blank
    pub fn search_query(&self) -> Option<String> {
        let query = self.search.input.trim();
        (!query.is_empty()).then(|| query.to_string())
    }

    /// Store the outcome of a search
    ///
    /// On failure the previous results stay visible.
    pub fn apply_search_result(&mut self, result: Result<SearchPage, CatalogError>) {
        match result {
            Ok(page) => {
                if page.docs.is_empty() {
                    self.set_status(format!("No books found for '{}'", page.query));
                    self.search.focus = SearchFocus::Input;
                } else {
                    let (start, end) = page.shown_range();
                    self.set_status(format!(
                        "Showing {} - {} out of {}",
                        start, end, page.num_found
                    ));
                    self.search.focus = SearchFocus::Results;
                }
                self.search.selected = 0;
                self.search.results = Some(page);
            }
            Err(e) => {
                self.set_status(format!("Search failed: {}", e));
            }
        }
    }

    /// Add the selected search result to the list as For Later
    pub fn add_selected_result(&mut self, store: &mut Store) -> anyhow::Result<()> {
        let Some(doc) = self.search.selected_doc().cloned() else {
            return Ok(());
        };

        if store.contains(&doc.key) {
            self.set_status("Already on your list");
            return Ok(());
        }

        let book = doc.into_book();
        let title = book.title.clone();
        store.add(book)?;
        self.set_status(format!("Added '{}' to {}", title, Status::Backlog.label()));
        Ok(())
    }
}

/// Position of a status in `Status::ALL`
pub fn column_index(status: Status) -> usize {
    match status {
        Status::InProgress => 0,
        Status::Backlog => 1,
        Status::Done => 2,
    }
}
