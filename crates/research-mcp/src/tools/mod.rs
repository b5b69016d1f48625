//! MCP tool implementations.
//!
//! Each tool module provides tools that:
//! 1. Parse and validate input parameters
//! 2. Call the remote client and/or the topic store
//! 3. Format results as text (JSON or plain sentences)

mod document;
mod jstor;
mod papers;

pub use document::*;
pub use jstor::*;
pub use papers::*;

use std::sync::Arc;

use crate::client::ResearchClient;
use crate::error::ToolResult;
use crate::store::TopicStore;

/// Tool execution context.
pub struct ToolContext {
    /// Remote search client.
    pub client: Arc<ResearchClient>,

    /// Local paper store.
    pub store: Arc<TopicStore>,
}

impl ToolContext {
    /// Create a new tool context.
    #[must_use]
    pub fn new(client: Arc<ResearchClient>, store: Arc<TopicStore>) -> Self {
        Self { client, store }
    }
}

/// Trait for MCP tools.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name (e.g., "search_papers").
    fn name(&self) -> &'static str;

    /// Tool description for LLM.
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters.
    fn input_schema(&self) -> serde_json::Value;

    /// Execute the tool with given input.
    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String>;
}

/// Register all tools.
#[must_use]
pub fn register_all_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        // Local paper cache (2)
        Box::new(papers::SearchPapersTool),
        Box::new(papers::ExtractInfoTool),

        // JSTOR passthroughs (6)
        Box::new(jstor::JstorSearchTool::hybrid()),
        Box::new(jstor::JstorSearchTool::semantic()),
        Box::new(jstor::JstorSearchTool::lexical()),
        Box::new(jstor::JstorSearchTool::basic()),
        Box::new(jstor::JstorSearchTool::grouped()),
        Box::new(jstor::ItemMetadataTool),

        // Document search (1)
        Box::new(document::SearchFromDocumentTool),
    ]
}
