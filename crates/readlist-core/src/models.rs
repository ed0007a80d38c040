//! Data models for readlist
//!
//! Defines the tracked [`Book`] record and its reading [`Status`].
//! Field names match the persisted JSON layout, which in turn matches the
//! catalog's document fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Reading status of a tracked book
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    /// Already read
    Done,
    /// Currently reading
    InProgress,
    /// Saved for later
    #[default]
    Backlog,
}

impl Status {
    /// Statuses in display order
    pub const ALL: [Status; 3] = [Status::InProgress, Status::Backlog, Status::Done];

    /// Wire name, as stored in the persisted list
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Done => "done",
            Status::InProgress => "inProgress",
            Status::Backlog => "backlog",
        }
    }

    /// Human-readable column label
    pub fn label(self) -> &'static str {
        match self {
            Status::Done => "Done",
            Status::InProgress => "Currently Reading",
            Status::Backlog => "For Later",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown status '{0}'. Valid statuses: inProgress (reading), backlog (later), done")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "done" => Ok(Status::Done),
            "inprogress" | "in-progress" | "reading" => Ok(Status::InProgress),
            "backlog" | "later" | "for-later" => Ok(Status::Backlog),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// A book on the reading list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    /// Catalog identifier (e.g. `/works/OL45804W`), unique within the list
    pub key: String,
    /// Book title
    pub title: String,
    /// Author names, in catalog order
    #[serde(default)]
    pub author_name: Vec<String>,
    /// Year of first publication, if known
    #[serde(default)]
    pub first_publish_year: Option<i32>,
    /// Median page count across editions, if known
    #[serde(default)]
    pub number_of_pages_median: Option<u32>,
    /// Reading status
    #[serde(default)]
    pub status: Status,
}

impl Book {
    /// Create a new book with the given key and title, saved for later
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            author_name: Vec::new(),
            first_publish_year: None,
            number_of_pages_median: None,
            status: Status::Backlog,
        }
    }

    /// Set the authors
    pub fn with_authors(mut self, authors: Vec<String>) -> Self {
        self.author_name = authors;
        self
    }

    /// Set the first publication year
    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.first_publish_year = year;
        self
    }

    /// Set the median page count
    pub fn with_pages(mut self, pages: Option<u32>) -> Self {
        self.number_of_pages_median = pages;
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Authors joined for display, or "Unknown author"
    pub fn authors(&self) -> String {
        if self.author_name.is_empty() {
            "Unknown author".to_string()
        } else {
            self.author_name.join(", ")
        }
    }

    /// Short form of the key (`OL45804W` for `/works/OL45804W`)
    pub fn short_key(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }
}
