//! MCP server for web search via a self-hosted SearXNG instance.
//!
//! The server exposes a single `web_search` tool over the Model Context
//! Protocol. Tool calls are validated against configured limits, forwarded
//! to the SearXNG search endpoint, and the JSON results are parsed into a
//! typed result set and rendered as readable text.

pub mod config;
pub mod searx_client;
pub mod service;
pub mod types;

pub use config::{ConfigError, ServerConfig};
pub use searx_client::{SearxClient, SearxError};
pub use service::{format_search_results, SearxngMcpService};
pub use types::{SearchResult, SearchResults, TimeRange};
