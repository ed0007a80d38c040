//! Reading list command handlers

use anyhow::{bail, Context, Result};

use readlist_core::{Status, Store};

use crate::output::Output;
use crate::prompt::confirm;

/// List the reading list, optionally a single status
pub fn list(store: &Store, status: Option<Status>, output: &Output) -> Result<()> {
    output.print_list(store, status);
    Ok(())
}

/// Show a single book
pub fn show(store: &Store, key: String, output: &Output) -> Result<()> {
    let key = resolve_key(&key, store)?;
    let book = store
        .get(&key)
        .ok_or_else(|| anyhow::anyhow!("Book not found: {}", key))?;

    output.print_book(book);
    Ok(())
}

/// Move a book to another status
pub fn move_to(store: &mut Store, key: String, status: Status, output: &Output) -> Result<()> {
    let key = resolve_key(&key, store)?;

    let current = store.get(&key).map(|b| (b.status, b.title.clone()));
    if let Some((from, title)) = current {
        if from == status {
            output.message(&format!("'{}' is already in {}", title, status.label()));
            return Ok(());
        }
    }

    store
        .set_status(&key, status)
        .context("Failed to update status")?;

    if let Some(book) = store.get(&key) {
        output.success(&format!("Moved '{}' to {}", book.title, status.label()));
    }
    Ok(())
}

/// Reorder a book within its status column
pub fn reorder(
    store: &mut Store,
    status: Status,
    from: usize,
    to: usize,
    output: &Output,
) -> Result<()> {
    store
        .reorder(status, from, to)
        .context("Failed to reorder books")?;

    output.success(&format!("Moved {} #{} to #{}", status.label(), from, to));
    if !output.is_json() {
        output.print_list(store, Some(status));
    }
    Ok(())
}

/// Remove a book after confirmation
pub fn remove(store: &mut Store, key: String, yes: bool, output: &Output) -> Result<()> {
    let key = resolve_key(&key, store)?;

    if !yes {
        if !output.should_prompt() {
            output.message("Cancelled. Pass --yes to remove without prompting.");
            return Ok(());
        }

        if let Some(book) = store.get(&key) {
            println!("Remove: {} - {}", book.title, book.authors());
        }
        if !confirm("Are you sure you want to remove this book?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    match store.remove(&key).context("Failed to remove book")? {
        Some(book) => output.success(&format!("Removed '{}'", book.title)),
        None => output.message(&format!("Book not found: {}", key)),
    }
    Ok(())
}

/// Resolve a user-typed key (full key or trailing segment)
pub fn resolve_key(fragment: &str, store: &Store) -> Result<String> {
    let matches = store.find(fragment);

    match matches.len() {
        0 => bail!("No book on your list matches: {}", fragment),
        1 => Ok(matches[0].key.clone()),
        _ => {
            eprintln!("Multiple books match '{}':", fragment);
            for book in &matches {
                eprintln!("  {} - {}", book.key, book.title);
            }
            bail!("Ambiguous key. Please provide the full key.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use readlist_core::{Book, Config, MemoryKeyValueStore, STORAGE_KEY};

    fn store_with(keys: &[&str]) -> Store {
        let mut store = Store::with_backend(MemoryKeyValueStore::new(), Config::default());
        for key in keys {
            store.add(Book::new(*key, "t")).unwrap();
        }
        store
    }

    #[test]
    fn test_resolve_key_exact_and_suffix() {
        let store = store_with(&["/works/OL1W", "/works/OL2W"]);
        assert_eq!(resolve_key("/works/OL1W", &store).unwrap(), "/works/OL1W");
        assert_eq!(resolve_key("OL2W", &store).unwrap(), "/works/OL2W");
    }

    #[test]
    fn test_resolve_key_missing() {
        let store = store_with(&["/works/OL1W"]);
        assert!(resolve_key("OL9W", &store).is_err());
    }

    #[test]
    fn test_remove_without_confirmation_changes_nothing() {
        let mut store = store_with(&["/works/OL1W", "/works/OL2W"]);
        let books_before = store.books().to_vec();
        let bytes_before = store.backend().read(STORAGE_KEY).unwrap();

        let output = Output::new(OutputFormat::Json);
        remove(&mut store, "OL1W".to_string(), false, &output).unwrap();

        assert_eq!(store.books(), books_before.as_slice());
        assert_eq!(store.backend().read(STORAGE_KEY).unwrap(), bytes_before);
    }

    #[test]
    fn test_remove_with_yes() {
        let mut store = store_with(&["/works/OL1W", "/works/OL2W"]);

        let output = Output::new(OutputFormat::Quiet);
        remove(&mut store, "OL1W".to_string(), true, &output).unwrap();

        assert!(!store.contains("/works/OL1W"));
        assert!(store
            .backend()
            .read(STORAGE_KEY)
            .unwrap()
            .unwrap()
            .contains("/works/OL2W"));
    }

    #[test]
    fn test_resolve_key_ambiguous() {
        let store = store_with(&["/works/OL1W", "/books/OL1W"]);
        let err = resolve_key("OL1W", &store).unwrap_err();
        assert!(err.to_string().contains("Ambiguous"));
    }
}
