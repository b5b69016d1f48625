//! Document search tool: search_from_document.

use serde_json::json;

use super::{McpTool, ToolContext};
use crate::document;
use crate::error::{ToolError, ToolResult};
use crate::formatters;
use crate::models::{DocumentType, JstorSearch, SearchFromDocumentInput};

/// Number of hybrid search results returned for a document query.
const DOCUMENT_TOP_K: u32 = 5;

/// Extract text from an uploaded document and use it as a hybrid search query.
pub struct SearchFromDocumentTool;

#[async_trait::async_trait]
impl McpTool for SearchFromDocumentTool {
    fn name(&self) -> &'static str {
        "search_from_document"
    }

    fn description(&self) -> &'static str {
        "Extract text from a PDF or text file (base64-encoded) and perform a hybrid search \
         for JSTOR content using that text as the query."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "file_bytes": {
                    "type": "string",
                    "contentEncoding": "base64",
                    "description": "The content of the uploaded file, base64-encoded"
                },
                "file_type": {
                    "type": "string",
                    "enum": ["pdf", "txt"],
                    "description": "Type of file"
                }
            },
            "required": ["file_bytes", "file_type"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: SearchFromDocumentInput = serde_json::from_value(input)?;

        let kind: DocumentType = params.file_type.parse()?;
        let bytes = document::decode_upload(&params.file_bytes)?;

        // PDF parsing is CPU-bound; keep it off the runtime workers.
        let text = tokio::task::spawn_blocking(move || document::extract_text(&bytes, kind))
            .await
            .map_err(|e| ToolError::document(format!("extraction task failed: {e}")))??;

        if text.trim().is_empty() {
            return Err(ToolError::document("no text could be extracted from the document"));
        }

        tracing::debug!(?kind, chars = text.len(), "Searching with document text");

        let result = ctx.client.jstor_search(JstorSearch::Hybrid, &text, DOCUMENT_TOP_K).await?;
        formatters::passthrough_json(&result)
    }
}
