//! HTTP client for the SearXNG search API.

use super::error::{Result, SearxError};
use crate::config::ServerConfig;
use crate::types::{SearchResult, SearchResults, TimeRange};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Client identifier sent with every request.
const USER_AGENT: &str = concat!("searxng-mcp-server/", env!("CARGO_PKG_VERSION"));

/// HTTP client for querying a SearXNG instance.
///
/// Owns one connection pool shared by all requests; safe for concurrent
/// use. No retries happen at this layer.
#[derive(Clone)]
pub struct SearxClient {
    client: Client,
    base_url: String,
    timeout_secs: u64,
    max_results_limit: u32,
}

impl SearxClient {
    /// Create a new client from server configuration.
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
            max_results_limit: config.max_results_limit,
        })
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check whether the SearXNG instance is reachable.
    ///
    /// Issues a minimal search and treats any 2xx response as healthy.
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", "test"), ("format", "json")])
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        response
            .error_for_status()
            .map_err(|e| self.map_transport_error(e))?;

        debug!("SearXNG health check succeeded");
        Ok(true)
    }

    /// Perform a search query against SearXNG.
    ///
    /// `max_results` is validated against the configured limit before any
    /// network call. Result elements missing `title`, `url`, or `content`
    /// are skipped rather than failing the whole response, since result
    /// shape varies by upstream engine plugin.
    pub async fn search(
        &self,
        query: &str,
        max_results: Option<u32>,
        categories: &[String],
        language: Option<&str>,
        time_range: Option<TimeRange>,
    ) -> Result<SearchResults> {
        if let Some(requested) = max_results {
            if requested > self.max_results_limit {
                return Err(SearxError::InvalidArgument(format!(
                    "max_results ({requested}) exceeds the configured limit of {}",
                    self.max_results_limit
                )));
            }
        }

        let mut params: Vec<(&str, String)> =
            vec![("q", query.to_string()), ("format", "json".to_string())];

        if !categories.is_empty() {
            params.push(("categories", categories.join(",")));
        }

        if let Some(language) = language {
            params.push(("language", language.to_string()));
        }

        if let Some(range) = time_range {
            params.push(("time_range", range.as_str().to_string()));
        }

        debug!("Searching SearXNG with query '{}', params: {:?}", query, params);

        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let response = response
            .error_for_status()
            .map_err(|e| self.map_transport_error(e))?;

        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let data: Value = serde_json::from_str(&body).map_err(|e| SearxError::MalformedResponse {
            message: "SearXNG returned malformed JSON".to_string(),
            source: Some(e),
        })?;

        let echoed_query = match data.get("query") {
            None => return Err(SearxError::malformed("missing 'query' field")),
            Some(value) => value
                .as_str()
                .ok_or_else(|| SearxError::malformed("'query' field is not a string"))?
                .to_string(),
        };

        let raw_results = match data.get("results") {
            None => return Err(SearxError::malformed("missing 'results' field")),
            Some(value) => value
                .as_array()
                .ok_or_else(|| SearxError::malformed("'results' field is not an array"))?,
        };

        let mut results: Vec<SearchResult> = Vec::with_capacity(raw_results.len());
        for entry in raw_results {
            match serde_json::from_value::<SearchResult>(entry.clone()) {
                Ok(result) => results.push(result),
                Err(err) => {
                    warn!("Skipping result with missing or invalid fields ({err}): {entry}");
                }
            }
        }

        if let Some(limit) = max_results {
            if limit > 0 {
                results.truncate(limit as usize);
            }
        }

        let number_of_results = results.len();
        info!("Retrieved {number_of_results} results for query '{query}'");

        Ok(SearchResults {
            query: echoed_query,
            results,
            number_of_results,
        })
    }

    /// Map a reqwest failure onto the client error taxonomy.
    fn map_transport_error(&self, err: reqwest::Error) -> SearxError {
        if err.is_timeout() {
            SearxError::Timeout {
                timeout_secs: self.timeout_secs,
                source: err,
            }
        } else if err.is_connect() {
            SearxError::Connection {
                base_url: self.base_url.clone(),
                source: err,
            }
        } else {
            SearxError::Transport(err)
        }
    }
}
