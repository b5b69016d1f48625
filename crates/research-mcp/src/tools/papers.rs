//! Paper cache tools: search_papers, extract_info.

use serde_json::json;

use super::{McpTool, ToolContext};
use crate::error::{ToolError, ToolResult};
use crate::formatters;
use crate::models::{ExtractInfoInput, SearchPapersInput};

/// Search arXiv for a topic and store the results under that topic.
pub struct SearchPapersTool;

#[async_trait::async_trait]
impl McpTool for SearchPapersTool {
    fn name(&self) -> &'static str {
        "search_papers"
    }

    fn description(&self) -> &'static str {
        "Search for papers on arXiv based on a topic and store their information. \
         Returns the list of paper IDs found in the search."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "topic": {
                    "type": "string",
                    "description": "The topic to search for"
                },
                "max_results": {
                    "type": "integer",
                    "default": 5,
                    "minimum": 1,
                    "description": "Maximum number of results to retrieve"
                }
            },
            "required": ["topic"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: SearchPapersInput = serde_json::from_value(input)?;

        if params.topic.trim().is_empty() {
            return Err(ToolError::validation("topic", "must not be empty"));
        }

        let results = ctx.client.search_arxiv(&params.topic, params.max_results).await?;
        let ids = ctx.store.upsert(&params.topic, results).await?;

        Ok(serde_json::to_string_pretty(&ids)?)
    }
}

/// Look a paper up by id across every stored topic.
pub struct ExtractInfoTool;

#[async_trait::async_trait]
impl McpTool for ExtractInfoTool {
    fn name(&self) -> &'static str {
        "extract_info"
    }

    fn description(&self) -> &'static str {
        "Search for information about a specific paper across all topic directories. \
         Returns the stored paper as JSON, or a message if it is not found."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "paper_id": {
                    "type": "string",
                    "description": "The ID of the paper to look for"
                }
            },
            "required": ["paper_id"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: ExtractInfoInput = serde_json::from_value(input)?;

        let lookup = ctx.store.find_by_id(&params.paper_id).await?;
        formatters::format_lookup(&lookup)
    }
}
