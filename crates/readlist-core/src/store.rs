//! List store
//!
//! The `Store` is the single source of truth for the tracked books. It owns
//! the in-memory list and a key-value backend, and rewrites the whole list
//! to the backend after every mutation, so the persisted state always
//! matches the last completed operation.
//!
//! ## Lifecycle
//!
//! The store starts empty and is hydrated once during start-up:
//!
//! ```ignore
//! let mut store = Store::open()?; // loads config, opens the data dir, hydrates
//!
//! store.add(book)?;
//! store.set_status("/works/OL45804W", Status::InProgress)?;
//! store.reorder(Status::Backlog, 0, 2)?;
//! ```
//!
//! Removal is unconditional here. Asking the user for confirmation is the
//! caller's job and happens before `remove` is called.

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::list;
use crate::models::{Book, Status};
use crate::storage::{FileKeyValueStore, KeyValueStore, StorageStats};

/// Key under which the whole list is persisted
pub const STORAGE_KEY: &str = "readingList";

/// Key receiving a copy of an unreadable persisted list
pub const BACKUP_KEY: &str = "readingList.corrupt";

/// Outcome of [`Store::hydrate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hydration {
    /// Nothing was persisted; the in-memory list was left as is
    Empty,
    /// The persisted list was loaded
    Loaded(usize),
    /// The persisted list could not be decoded. It was copied to
    /// `backup_key` and the in-memory list was reset to empty.
    Recovered { details: String, backup_key: String },
}

/// Reading list store
pub struct Store {
    /// Tracked books, in global order
    books: Vec<Book>,
    /// Persistence backend
    backend: Box<dyn KeyValueStore + Send>,
    /// Configuration
    config: Config,
    /// Result of the last hydrate
    hydration: Hydration,
}

impl Store {
    /// Open the store using the default configuration
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(config)
    }

    /// Open the file-backed store in the configured data directory and hydrate it
    pub fn open_with_config(config: Config) -> Result<Self> {
        let backend = FileKeyValueStore::new(&config.data_dir);
        let mut store = Self::with_backend(backend, config);
        store.hydrate().context("Failed to load reading list")?;
        Ok(store)
    }

    /// Create an empty, unhydrated store over an arbitrary backend
    pub fn with_backend(backend: impl KeyValueStore + Send + 'static, config: Config) -> Self {
        Self {
            books: Vec::new(),
            backend: Box::new(backend),
            config,
            hydration: Hydration::Empty,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the persistence backend
    pub fn backend(&self) -> &dyn KeyValueStore {
        self.backend.as_ref()
    }

    /// Result of the last hydrate
    pub fn hydration(&self) -> &Hydration {
        &self.hydration
    }

    /// Size information for the persisted list in the configured data directory
    pub fn storage_stats(&self) -> Result<StorageStats> {
        FileKeyValueStore::new(&self.config.data_dir)
            .stats(STORAGE_KEY)
            .context("Failed to read storage stats")
    }

    // ==================== Hydration ====================

    /// Replace the in-memory list with the persisted one
    ///
    /// Safe to call repeatedly. When nothing is persisted the in-memory list
    /// is left untouched. An undecodable blob is backed up under
    /// [`BACKUP_KEY`] and the list is reset to empty.
    pub fn hydrate(&mut self) -> Result<&Hydration> {
        let raw = self
            .backend
            .read_bytes(STORAGE_KEY)
            .context("Failed to read persisted reading list")?;

        self.hydration = match raw {
            None => {
                debug!("No persisted reading list");
                Hydration::Empty
            }
            Some(raw) => match serde_json::from_slice::<Vec<Book>>(&raw) {
                Ok(books) => {
                    info!("Loaded {} book(s)", books.len());
                    self.books = books;
                    Hydration::Loaded(self.books.len())
                }
                Err(e) => {
                    warn!("Persisted reading list is unreadable: {}", e);
                    self.backend
                        .write_bytes(BACKUP_KEY, &raw)
                        .context("Failed to back up unreadable reading list")?;
                    self.books.clear();
                    Hydration::Recovered {
                        details: e.to_string(),
                        backup_key: BACKUP_KEY.to_string(),
                    }
                }
            },
        };

        Ok(&self.hydration)
    }

    // ==================== Mutations ====================

    /// Append a book to the list
    ///
    /// Callers must not add a key that is already tracked (see [`Store::contains`]).
    /// A zero page count is stored as unknown.
    pub fn add(&mut self, mut book: Book) -> Result<&[Book]> {
        book.number_of_pages_median = book.number_of_pages_median.filter(|&n| n > 0);
        debug!("Adding '{}' as {}", book.key, book.status);
        self.books.push(book);
        self.persist()?;
        Ok(&self.books)
    }

    /// Remove the book with the given key
    ///
    /// Returns the removed book, or `None` if the key is not tracked. The
    /// list is persisted either way.
    pub fn remove(&mut self, key: &str) -> Result<Option<Book>> {
        let removed = self
            .books
            .iter()
            .position(|b| b.key == key)
            .map(|pos| self.books.remove(pos));

        debug!("Removing '{}' (found: {})", key, removed.is_some());
        self.persist()?;
        Ok(removed)
    }

    /// Change the status of a book, keeping its place in the list
    ///
    /// Returns whether the key was found.
    pub fn set_status(&mut self, key: &str, status: Status) -> Result<bool> {
        let found = match self.books.iter_mut().find(|b| b.key == key) {
            Some(book) => {
                book.status = status;
                true
            }
            None => false,
        };

        debug!("Setting '{}' to {} (found: {})", key, status, found);
        self.persist()?;
        Ok(found)
    }

    /// Move a book within its status partition
    ///
    /// `from` and `to` are positions within the partition. Out-of-range
    /// indices fail with [`list::ListError`] and nothing is persisted.
    pub fn reorder(&mut self, status: Status, from: usize, to: usize) -> Result<()> {
        list::reorder_partition(&mut self.books, status, from, to)?;
        debug!("Reordered {}: {} -> {}", status, from, to);
        self.persist()
    }

    // ==================== Queries ====================

    /// All tracked books, in global order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Books with the given status, in display order
    pub fn partition(&self, status: Status) -> Vec<&Book> {
        list::partition(&self.books, status)
    }

    /// Get a book by exact key
    pub fn get(&self, key: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.key == key)
    }

    /// Check whether a key is tracked
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Resolve a user-typed key
    ///
    /// An exact key match wins. Otherwise books whose key ends with the
    /// fragment as a path segment match, so `OL45804W` finds
    /// `/works/OL45804W`.
    pub fn find(&self, fragment: &str) -> Vec<&Book> {
        if let Some(book) = self.get(fragment) {
            return vec![book];
        }

        let suffix = format!("/{}", fragment.trim_start_matches('/'));
        self.books
            .iter()
            .filter(|b| b.key.ends_with(&suffix))
            .collect()
    }

    /// Number of books per status, in display order
    pub fn counts(&self) -> Vec<(Status, usize)> {
        Status::ALL
            .iter()
            .map(|&s| (s, self.books.iter().filter(|b| b.status == s).count()))
            .collect()
    }

    /// Number of tracked books
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Write the whole list to the backend
    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.books).context("Failed to serialize reading list")?;
        self.backend
            .write(STORAGE_KEY, &json)
            .context("Failed to save reading list")
    }
}
