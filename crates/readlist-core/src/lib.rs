//! readlist Core Library
//!
//! This crate provides the core functionality for readlist, a personal
//! reading-list tracker backed by the Open Library catalog.
//!
//! # Architecture
//!
//! - **Store**: single source of truth for the tracked list. Every mutation
//!   rewrites the whole list through a [`KeyValueStore`] before returning.
//! - **Catalog**: async search client for the remote book catalog.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open()?;
//!
//! // Add a book found in the catalog
//! let page = CatalogClient::new(&store.config().catalog_url)?.search("dune", 1).await?;
//! store.add(page.docs[0].clone().into_book())?;
//!
//! // Query a partition
//! let later = store.partition(Status::Backlog);
//! ```
//!
//! # Modules
//!
//! - `store`: List store (main entry point)
//! - `models`: Book and Status
//! - `list`: Pure partition and reorder algorithms
//! - `catalog`: Catalog search client
//! - `storage`: Key-value persistence
//! - `config`: Application configuration

pub mod catalog;
pub mod config;
pub mod list;
pub mod models;
pub mod storage;
pub mod store;

pub use catalog::{CatalogClient, CatalogError, SearchDoc, SearchPage, PAGE_SIZE};
pub use config::Config;
pub use list::ListError;
pub use models::{Book, Status};
pub use storage::{
    FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, StorageError, StorageStats,
};
pub use store::{Hydration, Store, BACKUP_KEY, STORAGE_KEY};
