//! Catalog search client
//!
//! Queries the Open Library `search.json` endpoint, one page at a time.
//! There is no retry: a failed search is reported to the caller, which
//! keeps whatever results it was already showing.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Book, Status};

/// Results per page
pub const PAGE_SIZE: usize = 100;

/// Request timeout in seconds
const FETCH_TIMEOUT: u64 = 10;

/// Errors from catalog searches
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Could not build the HTTP client
    #[error("Failed to initialize HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport failure (connection refused, timeout, ...)
    #[error("Catalog request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog answered with a non-success status
    #[error("Catalog returned HTTP {0}")]
    Status(u16),

    /// The response body was not a search result
    #[error("Could not decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A search result record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchDoc {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Vec<String>,
    #[serde(default)]
    pub first_publish_year: Option<i32>,
    #[serde(default)]
    pub number_of_pages_median: Option<u32>,
}

impl SearchDoc {
    /// Adapt into a book saved for later
    pub fn into_book(self) -> Book {
        self.into_book_with_status(Status::Backlog)
    }

    /// Adapt into a book with the given status
    pub fn into_book_with_status(self, status: Status) -> Book {
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| "Untitled".to_string());

        Book::new(self.key, title)
            .with_authors(self.author_name)
            .with_year(self.first_publish_year)
            .with_pages(self.number_of_pages_median.filter(|&n| n > 0))
            .with_status(status)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<SearchDoc>,
    #[serde(default, rename = "numFound", alias = "num_found")]
    num_found: u64,
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    /// The query that produced this page
    pub query: String,
    /// 1-based page number
    pub page: usize,
    /// Records on this page
    pub docs: Vec<SearchDoc>,
    /// Total matches across all pages
    pub num_found: u64,
}

impl SearchPage {
    /// A page with no results
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            docs: Vec::new(),
            num_found: 0,
        }
    }

    /// Number of pages for this query
    pub fn total_pages(&self) -> usize {
        (self.num_found as usize).div_ceil(PAGE_SIZE)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// 1-based positions of the first and last result shown on this page
    pub fn shown_range(&self) -> (u64, u64) {
        if self.num_found == 0 {
            return (0, 0);
        }
        let offset = self.page.saturating_sub(1) as u64 * PAGE_SIZE as u64;
        let start = (offset + 1).min(self.num_found);
        let end = (start + PAGE_SIZE as u64 - 1).min(self.num_found);
        (start, end)
    }
}

/// HTTP client for the catalog
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a client for the catalog at `base_url` (e.g. `https://openlibrary.org`)
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT))
            .user_agent(concat!("readlist/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CatalogError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Endpoint URL
    pub fn search_url(&self) -> String {
        format!("{}/search.json", self.base_url)
    }

    /// Fetch one page of results
    ///
    /// A blank query returns an empty page without contacting the catalog.
    /// Pages start at 1; 0 is treated as 1.
    pub async fn search(&self, query: &str, page: usize) -> Result<SearchPage, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchPage::empty(query));
        }
        let page = page.max(1);

        debug!("Searching catalog for '{}' (page {})", query, page);
        let result = self.fetch(query, page).await;
        if let Err(ref e) = result {
            warn!("Catalog search for '{}' failed: {}", query, e);
        }
        result
    }

    async fn fetch(&self, query: &str, page: usize) -> Result<SearchPage, CatalogError> {
        let response = self
            .client
            .get(self.search_url())
            .query(&[
                ("q", query.to_string()),
                ("page", page.to_string()),
                ("limit", PAGE_SIZE.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        debug!(
            "Catalog returned {} doc(s) of {}",
            parsed.docs.len(),
            parsed.num_found
        );

        Ok(SearchPage {
            query: query.to_string(),
            page,
            docs: parsed.docs,
            num_found: parsed.num_found,
        })
    }
}
