//! JSTOR passthrough tools: hybrid_search, semantic_search, lexical_search,
//! jstor_basic_search, jstor_group_search, get_item_metadata.

use serde_json::json;

use super::{McpTool, ToolContext};
use crate::error::{ToolError, ToolResult};
use crate::formatters;
use crate::models::{ItemMetadataInput, JstorQueryInput, JstorSearch};

/// One JSTOR search flavour exposed as a tool.
pub struct JstorSearchTool {
    kind: JstorSearch,
    name: &'static str,
    description: &'static str,
}

impl JstorSearchTool {
    /// `hybrid_search`.
    #[must_use]
    pub const fn hybrid() -> Self {
        Self {
            kind: JstorSearch::Hybrid,
            name: "hybrid_search",
            description: "Perform a hybrid search (semantic and lexical) for JSTOR content.",
        }
    }

    /// `semantic_search`.
    #[must_use]
    pub const fn semantic() -> Self {
        Self {
            kind: JstorSearch::Semantic,
            name: "semantic_search",
            description: "Perform a semantic search for JSTOR content.",
        }
    }

    /// `lexical_search`.
    #[must_use]
    pub const fn lexical() -> Self {
        Self {
            kind: JstorSearch::Lexical,
            name: "lexical_search",
            description: "Perform a lexical (keyword) search for JSTOR content.",
        }
    }

    /// `jstor_basic_search`.
    #[must_use]
    pub const fn basic() -> Self {
        Self {
            kind: JstorSearch::Basic,
            name: "jstor_basic_search",
            description: "Perform a basic search for JSTOR content.",
        }
    }

    /// `jstor_group_search`.
    #[must_use]
    pub const fn grouped() -> Self {
        Self {
            kind: JstorSearch::Grouped,
            name: "jstor_group_search",
            description: "Perform a group search for JSTOR content. \
                          Groups the basic search results by content type.",
        }
    }
}

#[async_trait::async_trait]
impl McpTool for JstorSearchTool {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                },
                "top_k": {
                    "type": "integer",
                    "default": 5,
                    "minimum": 1,
                    "description": "Number of results to return"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: JstorQueryInput = serde_json::from_value(input)?;

        if params.query.trim().is_empty() {
            return Err(ToolError::validation("query", "must not be empty"));
        }

        let result = ctx.client.jstor_search(self.kind, &params.query, params.top_k).await?;
        formatters::passthrough_json(&result)
    }
}

/// Fetch item metadata from the Cedar delivery service.
pub struct ItemMetadataTool;

#[async_trait::async_trait]
impl McpTool for ItemMetadataTool {
    fn name(&self) -> &'static str {
        "get_item_metadata"
    }

    fn description(&self) -> &'static str {
        "Fetch metadata about an item from the Cedar delivery service."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "item_id": {
                    "type": "string",
                    "description": "Item ID"
                }
            },
            "required": ["item_id"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: ItemMetadataInput = serde_json::from_value(input)?;

        if params.item_id.trim().is_empty() {
            return Err(ToolError::validation("item_id", "must not be empty"));
        }

        let metadata = ctx.client.item_metadata(&params.item_id).await?;
        formatters::passthrough_json(&metadata)
    }
}
