//! Input models for MCP tool and prompt parameters.

use serde::{Deserialize, Serialize};

/// Input for `search_papers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPapersInput {
    /// Topic to search arXiv for; also names the storage namespace.
    pub topic: String,

    /// Maximum number of results to retrieve.
    #[serde(default = "default_max_results", alias = "maxResults")]
    pub max_results: u32,
}

fn default_max_results() -> u32 {
    5
}

/// Input for `extract_info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractInfoInput {
    /// Paper id to look up across all topics.
    #[serde(alias = "paperId")]
    pub paper_id: String,
}

/// Input for the JSTOR search passthroughs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JstorQueryInput {
    /// Search query.
    pub query: String,

    /// Number of results to return.
    #[serde(default = "default_top_k", alias = "topK")]
    pub top_k: u32,
}

fn default_top_k() -> u32 {
    5
}

/// Input for `get_item_metadata`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemMetadataInput {
    /// Cedar item id.
    #[serde(alias = "itemId")]
    pub item_id: String,
}

/// Input for `search_from_document`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchFromDocumentInput {
    /// Base64-encoded file content.
    #[serde(alias = "fileBytes")]
    pub file_bytes: String,

    /// `pdf` or `txt`; validated when the tool runs.
    #[serde(alias = "fileType")]
    pub file_type: String,
}

/// Arguments for the `generate_search_prompt` prompt.
///
/// Prompt arguments arrive as strings, so `num_papers` is parsed leniently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPromptArgs {
    /// Topic to research.
    pub topic: String,

    /// Number of papers to find.
    #[serde(default)]
    pub num_papers: Option<serde_json::Value>,
}

impl SearchPromptArgs {
    /// Requested paper count, defaulting to 5.
    #[must_use]
    pub fn paper_count(&self) -> u32 {
        match &self.num_papers {
            Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()).unwrap_or(5),
            Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(5),
            _ => 5,
        }
    }
}
