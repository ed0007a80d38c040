//! Catalog command handlers

use anyhow::{bail, Context, Result};

use readlist_core::{CatalogClient, Status, Store};

use crate::output::Output;

/// Search the catalog and print one page of results
pub async fn search(
    store: &Store,
    client: &CatalogClient,
    query: String,
    page: usize,
    output: &Output,
) -> Result<()> {
    let results = client
        .search(&query, page)
        .await
        .context("Search failed")?;

    output.print_search_page(&results, store);
    Ok(())
}

/// Search the catalog and add the result with the given key
pub async fn add(
    store: &mut Store,
    client: &CatalogClient,
    query: String,
    key: String,
    page: usize,
    status: Option<Status>,
    output: &Output,
) -> Result<()> {
    let results = client
        .search(&query, page)
        .await
        .context("Search failed")?;

    let wanted = key.trim_start_matches('/');
    let suffix = format!("/{}", wanted);
    let Some(doc) = results
        .docs
        .into_iter()
        .find(|d| d.key.trim_start_matches('/') == wanted || d.key.ends_with(&suffix))
    else {
        bail!(
            "No result with key '{}' on page {} for '{}'. Run `readlist search` to see the keys.",
            key,
            page.max(1),
            query
        );
    };

    if store.contains(&doc.key) {
        bail!("Already on your list: {}", doc.key);
    }

    let status = status.unwrap_or_default();
    let book = doc.into_book_with_status(status);
    let title = book.title.clone();
    let key = book.key.clone();
    store.add(book).context("Failed to add book")?;

    output.success(&format!("Added '{}' to {}", title, status.label()));
    if let Some(book) = store.get(&key) {
        output.print_book(book);
    }
    Ok(())
}
