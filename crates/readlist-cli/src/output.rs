//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde::Serialize;

use readlist_core::{Book, SearchPage, Status, Store};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if output is JSON
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a single book
    pub fn print_book(&self, book: &Book) {
        match self.format {
            OutputFormat::Human => {
                println!("Key:     {}", book.key);
                println!("Title:   {}", book.title);
                println!("Author:  {}", book.authors());
                println!("Year:    {}", or_dash(book.first_publish_year));
                println!("Pages:   {}", or_dash(book.number_of_pages_median));
                println!("Status:  {}", book.status.label());
            }
            OutputFormat::Json => print_json(book),
            OutputFormat::Quiet => println!("{}", book.key),
        }
    }

    /// Print the reading list grouped by status, or a single partition
    pub fn print_list(&self, store: &Store, only: Option<Status>) {
        let statuses: Vec<Status> = match only {
            Some(s) => vec![s],
            None => Status::ALL.to_vec(),
        };

        match self.format {
            OutputFormat::Human => {
                for (n, status) in statuses.iter().enumerate() {
                    if n > 0 {
                        println!();
                    }
                    let books = store.partition(*status);
                    println!("── {} ({}) ──", status.label(), books.len());
                    if books.is_empty() {
                        println!("  {}", empty_column_text(*status));
                    }
                    for (i, book) in books.iter().enumerate() {
                        println!(
                            "{:>3}. {} | {} | {}",
                            i,
                            truncate(&book.title, 40),
                            truncate(&book.authors(), 25),
                            book.short_key()
                        );
                    }
                }
            }
            OutputFormat::Json => match only {
                Some(s) => print_json(&store.partition(s)),
                None => print_json(&store.books()),
            },
            OutputFormat::Quiet => {
                for status in statuses {
                    for book in store.partition(status) {
                        println!("{}", book.key);
                    }
                }
            }
        }
    }

    /// Print a page of search results, marking books already tracked
    pub fn print_search_page(&self, page: &SearchPage, store: &Store) {
        match self.format {
            OutputFormat::Human => {
                if page.docs.is_empty() {
                    println!("No books found for '{}'.", page.query);
                    return;
                }
                for doc in &page.docs {
                    let marker = if store.contains(&doc.key) { "✓" } else { " " };
                    println!(
                        "{} {:<14} | {} | {} | {} | {}",
                        marker,
                        doc.key.rsplit('/').next().unwrap_or(&doc.key),
                        truncate(doc.title.as_deref().unwrap_or("Untitled"), 40),
                        truncate(&doc.author_name.join(", "), 25),
                        or_dash(doc.first_publish_year),
                        or_dash(doc.number_of_pages_median)
                    );
                }
                let (start, end) = page.shown_range();
                println!(
                    "\nShowing {} - {} out of {} (page {} of {})",
                    start,
                    end,
                    page.num_found,
                    page.page,
                    page.total_pages()
                );
            }
            OutputFormat::Json => {
                let docs: Vec<_> = page
                    .docs
                    .iter()
                    .map(|doc| {
                        serde_json::json!({
                            "key": doc.key,
                            "title": doc.title,
                            "author_name": doc.author_name,
                            "first_publish_year": doc.first_publish_year,
                            "number_of_pages_median": doc.number_of_pages_median,
                            "tracked": store.contains(&doc.key),
                        })
                    })
                    .collect();
                print_json(&serde_json::json!({
                    "query": page.query,
                    "page": page.page,
                    "total_pages": page.total_pages(),
                    "num_found": page.num_found,
                    "docs": docs,
                }));
            }
            OutputFormat::Quiet => {
                for doc in &page.docs {
                    println!("{}", doc.key);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a warning to stderr (suppressed in quiet mode)
    pub fn warn(&self, message: &str) {
        if !self.is_quiet() {
            eprintln!("⚠ {}", message);
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Placeholder shown for an empty status column
pub fn empty_column_text(status: Status) -> &'static str {
    match status {
        Status::InProgress => "A rolling stone gathers no moss.",
        Status::Backlog => "Look before, or you'll find yourself behind.",
        Status::Done => "Well done is better than well said.",
    }
}

/// Pretty-print a value as JSON
fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode JSON output: {}", e),
    }
}

/// Display an optional number, or "-"
pub fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Truncate a string to max characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
