//! Domain types for the news feed.
//!
//! # Design
//! `Article` is the only record the pipeline produces. It is a plain value:
//! no identity beyond its fields, never mutated after the parser builds it.
//! `QueryConfig` is the per-fetch input from the preferences collaborator and
//! is never stored by the core.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Author used when an entry carries no contributor tag.
pub const NO_AUTHOR: &str = "No Info";

/// A single article returned by the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub author: String,
    pub section: String,
    /// ISO-8601 date+time exactly as the API sent it.
    pub published_at: String,
    pub url: String,
}

impl Article {
    /// Date half of `published_at`, e.g. `2018-03-01`.
    pub fn display_date(&self) -> Option<&str> {
        self.published_at.split_once('T').map(|(date, _)| date)
    }

    /// Time half of `published_at` without seconds, e.g. `12:34 UTC` for
    /// `2018-03-01T12:34:56Z`.
    ///
    /// Returns `None` when the timestamp is too short to carry `:ssZ`.
    pub fn display_time(&self) -> Option<String> {
        let (_, time) = self.published_at.split_once('T')?;
        let cut = time.len().checked_sub(4)?;
        let hours_minutes = time.get(..cut)?;
        Some(format!("{hours_minutes} UTC"))
    }

    pub fn author_label(&self) -> String {
        format!("Author: {}", self.author)
    }

    pub fn section_label(&self) -> String {
        format!("Section: {}", self.section)
    }
}

/// Sort mode for a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderBy {
    /// Whatever the API sorts by when no order is requested.
    #[default]
    Default,
    Newest,
    /// Expressed upstream as `show-most-viewed=true` plus `order-by=relevance`.
    MostViewed,
}

impl OrderBy {
    /// The value this mode is stored under in the app's preferences.
    pub fn preference_value(self) -> &'static str {
        match self {
            OrderBy::Default => "",
            OrderBy::Newest => "newest",
            OrderBy::MostViewed => "true",
        }
    }
}

/// Returned when a preference string names no known sort mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order-by value {0:?} (expected \"\", \"newest\" or \"true\")")]
pub struct UnknownOrderBy(pub String);

impl FromStr for OrderBy {
    type Err = UnknownOrderBy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "default" => Ok(OrderBy::Default),
            "newest" => Ok(OrderBy::Newest),
            "true" | "most-viewed" => Ok(OrderBy::MostViewed),
            other => Err(UnknownOrderBy(other.to_string())),
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderBy::Default => "default",
            OrderBy::Newest => "newest",
            OrderBy::MostViewed => "most-viewed",
        };
        f.write_str(name)
    }
}

/// Filters and sort order for one fetch. Empty strings mean "unfiltered".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub order_by: OrderBy,
}

impl QueryConfig {
    pub fn new(section: impl Into<String>, author: impl Into<String>, order_by: OrderBy) -> Self {
        Self {
            section: section.into(),
            author: author.into(),
            order_by,
        }
    }
}
