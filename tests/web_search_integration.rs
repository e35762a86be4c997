//! Service-level tests driving the web_search tool against a mocked
//! SearXNG backend.

use rmcp::model::JsonObject;
use searxng_mcp::{SearxngMcpService, ServerConfig};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(base_url: String, max_results_limit: u32) -> SearxngMcpService {
    SearxngMcpService::new(ServerConfig {
        base_url,
        timeout_secs: 5,
        log_level: "info".to_string(),
        max_results_limit,
    })
    .expect("service creation should succeed")
}

fn args(value: Value) -> Option<JsonObject> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn text_content(result: &rmcp::model::CallToolResult) -> String {
    result
        .content
        .first()
        .and_then(|item| item.as_text())
        .map(|text| text.text.clone())
        .expect("tool result should contain one text block")
}

#[tokio::test]
async fn test_web_search_renders_results() {
    let mock_server = MockServer::start().await;

    let response_json = r#"{
        "query": "rust programming",
        "results": [
            {"title": "Rust", "url": "https://rust-lang.org", "content": "A systems language", "engines": ["duckduckgo"]}
        ]
    }"#;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "rust programming"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(response_json))
        .mount(&mock_server)
        .await;

    let service = service_for(mock_server.uri(), 50);
    let result = service
        .handle_web_search(args(json!({"query": "rust programming"})))
        .await
        .unwrap();

    let text = text_content(&result);
    assert!(text.contains("Search results for: rust programming"));
    assert!(text.contains("Found 1 results"));
    assert!(text.contains("1. Rust"));
    assert!(text.contains("URL: https://rust-lang.org"));
    assert!(text.contains("A systems language"));
    assert!(text.contains("Sources: duckduckgo"));
}

#[tokio::test]
async fn test_web_search_empty_results_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"query": "nothing here", "results": []}"#),
        )
        .mount(&mock_server)
        .await;

    let service = service_for(mock_server.uri(), 50);
    let result = service
        .handle_web_search(args(json!({"query": "nothing here"})))
        .await
        .unwrap();

    assert_eq!(
        text_content(&result),
        "No results found for query: nothing here"
    );
}

#[tokio::test]
async fn test_web_search_forwards_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("categories", "news,science"))
        .and(query_param("language", "de"))
        .and(query_param("time_range", "month"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"query": "q", "results": []}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(mock_server.uri(), 50);
    service
        .handle_web_search(args(json!({
            "query": "q",
            "categories": ["news", "science"],
            "language": "de",
            "time_range": "month"
        })))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_web_search_truncates_to_max_results() {
    let mock_server = MockServer::start().await;

    let response_json = r#"{
        "query": "q",
        "results": [
            {"title": "First", "url": "https://example.com/1", "content": "a"},
            {"title": "Second", "url": "https://example.com/2", "content": "b"},
            {"title": "Third", "url": "https://example.com/3", "content": "c"}
        ]
    }"#;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(response_json))
        .mount(&mock_server)
        .await;

    let service = service_for(mock_server.uri(), 50);
    let result = service
        .handle_web_search(args(json!({"query": "q", "max_results": 2})))
        .await
        .unwrap();

    let text = text_content(&result);
    assert!(text.contains("Found 2 results"));
    assert!(text.contains("1. First"));
    assert!(text.contains("2. Second"));
    assert!(!text.contains("Third"));
}

#[tokio::test]
async fn test_ceiling_enforced_without_backend_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = service_for(mock_server.uri(), 10);
    let err = service
        .handle_web_search(args(json!({"query": "q", "max_results": 11})))
        .await
        .unwrap_err();

    assert!(err.message.contains("exceeds limit of 10"));
}

#[tokio::test]
async fn test_schema_ceiling_tracks_configuration() {
    let service = service_for("http://localhost:8080".to_string(), 25);
    let tools = service.tools();

    let schema = Value::Object((*tools[0].input_schema).clone());
    assert_eq!(schema["properties"]["max_results"]["maximum"], json!(25));
}

#[tokio::test]
async fn test_backend_unreachable_surfaces_configured_url() {
    let service = service_for("http://127.0.0.1:1".to_string(), 50);
    let err = service
        .handle_web_search(args(json!({"query": "q"})))
        .await
        .unwrap_err();

    assert!(err.message.contains("Failed to connect to SearXNG"));
    assert!(err.message.contains("http://127.0.0.1:1"));
}

#[tokio::test]
async fn test_malformed_backend_payload_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"results": []}"#))
        .mount(&mock_server)
        .await;

    let service = service_for(mock_server.uri(), 50);
    let err = service
        .handle_web_search(args(json!({"query": "q"})))
        .await
        .unwrap_err();

    assert!(err.message.contains("Invalid response from SearXNG"));
    assert!(err.message.contains("'query'"));
}
