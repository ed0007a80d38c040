//! Storage layer
//!
//! Key-value persistence for the reading list.
//!
//! ## Architecture
//!
//! - **KeyValueStore**: synchronous string store, one value per key
//! - **FileKeyValueStore**: one JSON file per key under the data directory
//! - **MemoryKeyValueStore**: in-memory map for tests and dry runs
//!
//! The list store writes the whole serialized list under a single key after
//! every mutation, so values are small and rewritten wholesale.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::{FileKeyValueStore, MemoryKeyValueStore, StorageStats};

/// Synchronous key-value string store
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value stored under `key`
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Read the raw bytes stored under `key`, without requiring UTF-8
    fn read_bytes(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.read(key)?.map(String::into_bytes))
    }

    /// Replace the value stored under `key` with raw bytes
    ///
    /// Backends that only hold text store invalid UTF-8 lossily.
    fn write_bytes(&mut self, key: &str, value: &[u8]) -> StorageResult<()> {
        self.write(key, &String::from_utf8_lossy(value))
    }
}
