//! MCP prompts.

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::ToolResult;
use crate::models::SearchPromptArgs;

/// Name of the literature search prompt.
pub const SEARCH_PROMPT: &str = "generate_search_prompt";

/// Entry in a `prompts/list` response.
#[derive(Debug, Clone, Serialize)]
pub struct PromptInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: Vec<PromptArgument>,
}

/// A named prompt argument.
#[derive(Debug, Clone, Serialize)]
pub struct PromptArgument {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// All prompts offered by the server.
#[must_use]
pub fn list_prompts() -> Vec<PromptInfo> {
    vec![PromptInfo {
        name: SEARCH_PROMPT,
        description: "Generate a prompt to find and discuss academic papers on a specific topic.",
        arguments: vec![
            PromptArgument { name: "topic", description: "Research topic", required: true },
            PromptArgument {
                name: "num_papers",
                description: "Number of papers to search for (default: 5)",
                required: false,
            },
        ],
    }]
}

/// Build a `prompts/get` result. Returns `None` for unknown prompt names.
pub fn get_prompt(name: &str, arguments: Value) -> ToolResult<Option<Value>> {
    if name != SEARCH_PROMPT {
        return Ok(None);
    }

    let args: SearchPromptArgs = serde_json::from_value(arguments)?;
    let text = search_prompt(&args.topic, args.paper_count());

    Ok(Some(json!({
        "description": format!("Search and discuss papers about '{}'", args.topic),
        "messages": [{
            "role": "user",
            "content": {"type": "text", "text": text}
        }]
    })))
}

/// Instructions for finding and synthesizing papers on `topic`.
#[must_use]
pub fn search_prompt(topic: &str, num_papers: u32) -> String {
    format!(
        "Search for {num_papers} academic papers about '{topic}' using the search_papers tool.

Follow these instructions:
1. First, search for papers using search_papers(topic='{topic}', max_results={num_papers})
2. For each paper found, extract and organize the following information:
   - Paper title
   - Authors
   - Publication date
   - Brief summary of the key findings
   - Main contributions or innovations
   - Methodologies used
   - Relevance to the topic '{topic}'

3. Provide a comprehensive summary that includes:
   - Overview of the current state of research in '{topic}'
   - Common themes and trends across the papers
   - Key research gaps or areas for future investigation
   - Most impactful or influential papers in this area

4. Organize your findings in a clear, structured format with headings and bullet points for easy readability.

Please present both detailed information about each paper and a high-level synthesis of the research landscape in {topic}."
    )
}
