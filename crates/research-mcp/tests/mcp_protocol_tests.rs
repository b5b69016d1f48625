//! Tests for MCP protocol JSON-RPC handling.
//!
//! These drive the shared dispatcher directly, the same way both transports do.

use std::sync::Arc;

use serde_json::{Value, json};
use tempfile::TempDir;

use research_mcp::client::ResearchClient;
use research_mcp::config::Config;
use research_mcp::models::RawSearchResult;
use research_mcp::server::{JsonRpcRequest, ServerState};
use research_mcp::store::TopicStore;
use research_mcp::tools::{self, ToolContext};

/// Dispatcher whose remote services point at an unroutable address.
fn setup_server(papers: &TempDir) -> ServerState {
    let config = Config::for_testing("http://127.0.0.1:9", papers.path().join("papers"));
    let client = ResearchClient::new(&config).unwrap();
    let store = TopicStore::new(&config.papers_dir);
    ServerState::new(tools::register_all_tools(), ToolContext::new(Arc::new(client), Arc::new(store)))
}

fn request(value: Value) -> JsonRpcRequest {
    serde_json::from_value(value).unwrap()
}

async fn call(server: &ServerState, value: Value) -> Value {
    let response = server.handle_request(&request(value)).await.unwrap();
    serde_json::to_value(response).unwrap()
}

async fn seed(papers: &TempDir, topic: &str, id: &str, title: &str) {
    let store = TopicStore::new(papers.path().join("papers"));
    let raw = RawSearchResult {
        id: Some(id.to_string()),
        title: Some(title.to_string()),
        authors: Some(vec!["Test Author".to_string()]),
        summary: Some("A summary.".to_string()),
        pdf_url: Some(format!("http://arxiv.org/pdf/{id}")),
        published: Some("2022-06-01".to_string()),
    };
    store.upsert(topic, vec![raw]).await.unwrap();
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn test_initialize() {
    let papers = TempDir::new().unwrap();
    let server = setup_server(&papers);

    let response = call(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {"protocolVersion": "2025-03-26", "capabilities": {}}
        }),
    )
    .await;

    assert_eq!(response["jsonrpc"], "2.0");
    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["protocolVersion"], "2025-03-26");
    assert_eq!(response["result"]["serverInfo"]["name"], "research");
    assert!(response["result"]["capabilities"]["tools"].is_object());
    assert!(response["result"]["capabilities"]["resources"].is_object());
    assert!(response["result"]["capabilities"]["prompts"].is_object());
    assert!(response.get("error").is_none());
}

#[tokio::test]
async fn test_initialize_default_protocol_version() {
    let papers = TempDir::new().unwrap();
    let server = setup_server(&papers);

    let response = call(&server, json!({"jsonrpc": "2.0", "id": "a", "method": "initialize"})).await;

    assert_eq!(response["id"], "a");
    assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
}

#[tokio::test]
async fn test_notification_gets_no_response() {
    let papers = TempDir::new().unwrap();
    let server = setup_server(&papers);

    let notification = request(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}));
    assert!(server.handle_request(&notification).await.is_none());
}

#[tokio::test]
async fn test_ping() {
    let papers = TempDir::new().unwrap();
    let server = setup_server(&papers);

    let response = call(&server, json!({"jsonrpc": "2.0", "id": 7, "method": "ping"})).await;
    assert_eq!(response["result"], json!({}));
}

#[tokio::test]
async fn test_unknown_method() {
    let papers = TempDir::new().unwrap();
    let server = setup_server(&papers);

    let response = call(&server, json!({"jsonrpc": "2.0", "id": 2, "method": "sampling/create"})).await;

    assert_eq!(response["error"]["code"], -32601);
    assert!(response["error"]["message"].as_str().unwrap().contains("sampling/create"));
    assert!(response.get("result").is_none());
}

// =============================================================================
// Tools
// =============================================================================

#[tokio::test]
async fn test_tools_list() {
    let papers = TempDir::new().unwrap();
    let server = setup_server(&papers);

    let response = call(&server, json!({"jsonrpc": "2.0", "id": 3, "method": "tools/list"})).await;
    let tools = response["result"]["tools"].as_array().unwrap();

    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec![
            "search_papers",
            "extract_info",
            "hybrid_search",
            "semantic_search",
            "lexical_search",
            "jstor_basic_search",
            "jstor_group_search",
            "get_item_metadata",
            "search_from_document",
        ]
    );

    for tool in tools {
        assert_eq!(tool["inputSchema"]["type"], "object");
        assert!(!tool["description"].as_str().unwrap().is_empty());
    }

    assert_eq!(server.get_tool("search_papers").map(|t| t.name()), Some("search_papers"));
    assert!(server.get_tool("does_not_exist").is_none());
}

#[tokio::test]
async fn test_tools_call_extract_info() {
    let papers = TempDir::new().unwrap();
    seed(&papers, "optics", "2206.00001v1", "Lenses").await;
    let server = setup_server(&papers);

    let response = call(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools/call",
            "params": {"name": "extract_info", "arguments": {"paper_id": "2206.00001v1"}}
        }),
    )
    .await;

    let content = &response["result"]["content"][0];
    assert_eq!(content["type"], "text");
    let record: Value = serde_json::from_str(content["text"].as_str().unwrap()).unwrap();
    assert_eq!(record["title"], "Lenses");
}

#[tokio::test]
async fn test_tools_call_unknown_tool() {
    let papers = TempDir::new().unwrap();
    let server = setup_server(&papers);

    let response = call(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 5,
            "method": "tools/call",
            "params": {"name": "does_not_exist", "arguments": {}}
        }),
    )
    .await;

    assert_eq!(response["error"]["code"], -32602);
}

#[tokio::test]
async fn test_tools_call_invalid_arguments() {
    let papers = TempDir::new().unwrap();
    let server = setup_server(&papers);

    let response = call(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 6,
            "method": "tools/call",
            "params": {"name": "search_papers", "arguments": {"topic": ""}}
        }),
    )
    .await;

    assert_eq!(response["error"]["code"], -32602);
    assert!(response["error"]["message"].as_str().unwrap().contains("topic"));
}

// =============================================================================
// Resources
// =============================================================================

#[tokio::test]
async fn test_resources_list_and_templates() {
    let papers = TempDir::new().unwrap();
    let server = setup_server(&papers);

    let response = call(&server, json!({"jsonrpc": "2.0", "id": 8, "method": "resources/list"})).await;
    assert_eq!(response["result"]["resources"][0]["uri"], "papers://folders");

    let response =
        call(&server, json!({"jsonrpc": "2.0", "id": 9, "method": "resources/templates/list"})).await;
    assert_eq!(response["result"]["resourceTemplates"][0]["uriTemplate"], "papers://{topic}");
}

#[tokio::test]
async fn test_resources_read_folders_and_topic() {
    let papers = TempDir::new().unwrap();
    seed(&papers, "optics", "2206.00001v1", "Lenses").await;
    let server = setup_server(&papers);

    let response = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 10, "method": "resources/read", "params": {"uri": "papers://folders"}}),
    )
    .await;
    let contents = &response["result"]["contents"][0];
    assert_eq!(contents["uri"], "papers://folders");
    assert_eq!(contents["mimeType"], "text/markdown");
    assert!(contents["text"].as_str().unwrap().contains("- optics\n"));

    let response = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 11, "method": "resources/read", "params": {"uri": "papers://optics"}}),
    )
    .await;
    let text = response["result"]["contents"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("# Papers on Optics\n"));
    assert!(text.contains("## Lenses\n"));
}

#[tokio::test]
async fn test_resources_read_unknown_uri() {
    let papers = TempDir::new().unwrap();
    let server = setup_server(&papers);

    let response = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 12, "method": "resources/read", "params": {"uri": "ftp://nowhere"}}),
    )
    .await;

    assert_eq!(response["error"]["code"], -32602);
}

#[tokio::test]
async fn test_resources_read_rejects_path_like_topic() {
    let papers = TempDir::new().unwrap();
    let outside = papers.path().join("secret");
    std::fs::create_dir_all(&outside).unwrap();
    std::fs::write(outside.join("papers_info.json"), "{}").unwrap();
    let server = setup_server(&papers);

    let response = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 16, "method": "resources/read", "params": {"uri": "papers://../secret"}}),
    )
    .await;

    assert_eq!(response["error"]["code"], -32602);
    assert!(response["error"]["message"].as_str().unwrap().contains("topic"));
}

// =============================================================================
// Prompts
// =============================================================================

#[tokio::test]
async fn test_prompts_list_and_get() {
    let papers = TempDir::new().unwrap();
    let server = setup_server(&papers);

    let response = call(&server, json!({"jsonrpc": "2.0", "id": 13, "method": "prompts/list"})).await;
    assert_eq!(response["result"]["prompts"][0]["name"], "generate_search_prompt");

    let response = call(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 14,
            "method": "prompts/get",
            "params": {"name": "generate_search_prompt", "arguments": {"topic": "dark matter", "num_papers": 3}}
        }),
    )
    .await;

    let message = &response["result"]["messages"][0];
    assert_eq!(message["role"], "user");
    let text = message["content"]["text"].as_str().unwrap();
    assert!(text.starts_with("Search for 3 academic papers about 'dark matter'"));
}

#[tokio::test]
async fn test_prompts_get_unknown() {
    let papers = TempDir::new().unwrap();
    let server = setup_server(&papers);

    let response = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 15, "method": "prompts/get", "params": {"name": "nope"}}),
    )
    .await;

    assert_eq!(response["error"]["code"], -32602);
}
