//! JSON output for tool responses.

use crate::error::ToolResult;
use crate::models::PaperRecord;
use crate::store::Lookup;

/// Pretty-printed record, in the same shape it has on disk.
pub fn record_json(record: &PaperRecord) -> ToolResult<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Plain sentence returned when a paper id is unknown.
#[must_use]
pub fn paper_not_found(paper_id: &str) -> String {
    format!("There's no saved information related to paper {paper_id}.")
}

/// Tool text for a lookup: the record's JSON or the not-found sentence.
pub fn format_lookup(lookup: &Lookup) -> ToolResult<String> {
    match lookup {
        Lookup::Found(record) => record_json(record),
        Lookup::NotFound(paper_id) => Ok(paper_not_found(paper_id)),
    }
}

/// Pretty-printed passthrough of a remote JSON response.
pub fn passthrough_json(value: &serde_json::Value) -> ToolResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
