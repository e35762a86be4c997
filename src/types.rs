//! Data model for SearXNG responses and tool arguments.

use serde::{Deserialize, Serialize};

/// A single search result from SearXNG.
///
/// Deserialization requires `title`, `url`, and `content`; elements missing
/// any of these never become a `SearchResult`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Title of the search result.
    pub title: String,
    /// URL of the search result.
    pub url: String,
    /// Description/snippet of the search result.
    pub content: String,
    /// Publication date, when the upstream engine reports one.
    #[serde(rename = "publishedDate", default)]
    pub published_date: Option<String>,
    /// Search engines that returned this result.
    #[serde(default)]
    pub engines: Vec<String>,
}

/// Collection of search results for one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    /// The query as echoed back by SearXNG.
    pub query: String,
    /// Accepted results, in backend order.
    pub results: Vec<SearchResult>,
    /// Always equal to `results.len()`, counted after truncation.
    pub number_of_results: usize,
}

/// Time range filter accepted by the SearXNG search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Day,
    Week,
    Month,
    Year,
}

impl TimeRange {
    /// Wire value for the `time_range` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeRange::Day => "day",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Year => "year",
        }
    }
}

/// Arguments for the `web_search` tool.
///
/// Every field is optional at the serde layer; the service validates them
/// field by field so callers get targeted error messages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebSearchParams {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub max_results: Option<i64>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub time_range: Option<TimeRange>,
}
