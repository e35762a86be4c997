//! rmcp service layer exposing the `web_search` tool.
//!
//! The tool list and dispatch are implemented by hand rather than with the
//! `#[tool_router]` macro so the advertised `max_results` bound reflects the
//! configured limit instead of a compile-time constant.

use crate::config::ServerConfig;
use crate::searx_client::{SearxClient, SearxError};
use crate::types::{SearchResults, WebSearchParams};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, Tool, ToolsCapability,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use serde_json::{json, Map, Value};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Maximum rendered length of a result snippet, in characters.
const CONTENT_PREVIEW_CHARS: usize = 300;

/// MCP service for SearXNG web search.
///
/// Owns the shared HTTP client for its whole lifetime; dropping the service
/// releases the connection pool.
#[derive(Clone)]
pub struct SearxngMcpService {
    config: ServerConfig,
    client: Arc<SearxClient>,
}

impl SearxngMcpService {
    /// Create a new service instance from configuration.
    pub fn new(config: ServerConfig) -> Result<Self, SearxError> {
        let client = Arc::new(SearxClient::new(&config)?);
        Ok(Self { config, client })
    }

    /// Tool declarations advertised to the host runtime.
    ///
    /// Built per call so the `max_results` upper bound tracks configuration.
    pub fn tools(&self) -> Vec<Tool> {
        let schema = json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query to execute"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of results to return (default: 10)",
                    "default": 10,
                    "minimum": 1,
                    "maximum": self.config.max_results_limit
                },
                "categories": {
                    "type": "array",
                    "description": "SearXNG categories to search (e.g., general, news, images, videos, files, science)",
                    "items": {"type": "string"}
                },
                "language": {
                    "type": "string",
                    "description": "ISO 639-1 language code (e.g., 'en', 'de', 'fr')"
                },
                "time_range": {
                    "type": "string",
                    "description": "Filter results by time range",
                    "enum": ["day", "week", "month", "year"]
                }
            },
            "required": ["query"]
        });

        vec![Tool {
            name: Cow::Borrowed("web_search"),
            title: None,
            description: Some(Cow::Borrowed(
                "Search the web using SearXNG, a privacy-focused metasearch engine. \
                 Returns relevant search results including titles, URLs, and content snippets. \
                 Supports filtering by language, categories, and time range.",
            )),
            input_schema: schema_object(schema),
            output_schema: None,
            annotations: None,
            icons: None,
            meta: None,
        }]
    }

    /// Handle a `web_search` tool call.
    ///
    /// Arguments are validated field by field before delegating to the
    /// client, so callers get a targeted message without a network
    /// round-trip for bad input.
    pub async fn handle_web_search(
        &self,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = arguments.unwrap_or_default();
        let params: WebSearchParams = serde_json::from_value(Value::Object(arguments))
            .map_err(|e| {
                McpError::invalid_params(format!("Invalid arguments for web_search: {e}"), None)
            })?;

        let query = params.query.unwrap_or_default();
        if query.is_empty() {
            return Err(McpError::invalid_params(
                "'query' parameter is required",
                None,
            ));
        }

        let max_results = params.max_results.unwrap_or(10);
        if max_results < 1 {
            return Err(McpError::invalid_params(
                "'max_results' must be a positive integer",
                None,
            ));
        }
        if max_results > i64::from(self.config.max_results_limit) {
            return Err(McpError::invalid_params(
                format!(
                    "'max_results' exceeds limit of {}",
                    self.config.max_results_limit
                ),
                None,
            ));
        }

        info!("Processing web search: query='{query}', max_results={max_results}");

        let results = self
            .client
            .search(
                &query,
                Some(max_results as u32),
                params.categories.as_deref().unwrap_or(&[]),
                params.language.as_deref(),
                params.time_range,
            )
            .await
            .map_err(|e| self.search_error_to_mcp(e))?;

        Ok(CallToolResult::success(vec![Content::text(
            format_search_results(&results),
        )]))
    }

    /// Map a client failure onto a single caller-visible invalid-params
    /// error with an actionable message.
    fn search_error_to_mcp(&self, err: SearxError) -> McpError {
        let message = match &err {
            SearxError::InvalidArgument(msg) => msg.clone(),
            SearxError::Connection { .. } => format!(
                "Failed to connect to SearXNG: {err}\n\nPlease ensure SearXNG is running at {}",
                self.config.base_url
            ),
            SearxError::Timeout { .. } => format!("Search request timed out: {err}"),
            SearxError::MalformedResponse { .. } => format!("Invalid response from SearXNG: {err}"),
            SearxError::Transport(_) => format!("SearXNG client error: {err}"),
        };

        error!("{message}");
        McpError::invalid_params(message, None)
    }
}

impl ServerHandler for SearxngMcpService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: None }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "searxng-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: Some("SearXNG MCP Server".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "SearXNG web search server. Use the web_search tool to query a \
                 privacy-focused metasearch engine for current information."
                    .into(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = self.tools();
        debug!("Listing {} tools", tools.len());
        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Calling tool: {}", request.name);

        match request.name.as_ref() {
            "web_search" => self.handle_web_search(request.arguments).await,
            other => Err(McpError::invalid_params(
                format!("Unknown tool: {other}"),
                None,
            )),
        }
    }
}

/// Render a result set as readable text.
///
/// Pure function of its input; identical result sets always render the
/// same text.
pub fn format_search_results(results: &SearchResults) -> String {
    if results.results.is_empty() {
        return format!("No results found for query: {}", results.query);
    }

    let mut lines = vec![
        format!("Search results for: {}", results.query),
        format!("Found {} results\n", results.number_of_results),
    ];

    for (i, result) in results.results.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, result.title));
        lines.push(format!("   URL: {}", result.url));

        if !result.content.is_empty() {
            let mut content: String = result.content.chars().take(CONTENT_PREVIEW_CHARS).collect();
            if result.content.chars().count() > CONTENT_PREVIEW_CHARS {
                content.push_str("...");
            }
            lines.push(format!("   {content}"));
        }

        if let Some(date) = &result.published_date {
            lines.push(format!("   Published: {date}"));
        }

        if !result.engines.is_empty() {
            lines.push(format!("   Sources: {}", result.engines.join(", ")));
        }

        lines.push(String::new());
    }

    lines.join("\n")
}

fn schema_object(value: Value) -> Arc<Map<String, Value>> {
    match value {
        Value::Object(map) => Arc::new(map),
        _ => Arc::new(Map::new()),
    }
}
