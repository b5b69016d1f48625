//! Paper records as persisted in a topic namespace.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ToolError, ToolResult};

/// One topic's persisted contents: paper id to record.
pub type PaperMap = BTreeMap<String, PaperRecord>;

/// A stored description of one paper.
///
/// The `id` is the mapping key in `papers_info.json` and is not repeated in
/// the record body; [`PaperRecord::with_id`] restores it after loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Stable external identifier (e.g. arXiv short id `2301.00001v1`).
    #[serde(skip)]
    pub id: String,

    /// Paper title.
    pub title: String,

    /// Author names in publication order.
    pub authors: Vec<String>,

    /// Abstract, stored untruncated.
    pub summary: String,

    /// Link to the PDF.
    pub pdf_url: String,

    /// Publication date, serialized as `YYYY-MM-DD`.
    pub published: NaiveDate,
}

impl PaperRecord {
    /// Attach the mapping key to a record loaded from disk.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Author names joined for display.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.authors.join(", ")
    }
}

/// A loosely structured search hit, as handed over by a search collaborator.
///
/// Every field is optional here; [`PaperRecord::try_from`] is the single
/// place where required fields are enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSearchResult {
    /// Short identifier.
    #[serde(default)]
    pub id: Option<String>,

    /// Title.
    #[serde(default)]
    pub title: Option<String>,

    /// Author names.
    #[serde(default)]
    pub authors: Option<Vec<String>>,

    /// Abstract text.
    #[serde(default)]
    pub summary: Option<String>,

    /// PDF link.
    #[serde(default)]
    pub pdf_url: Option<String>,

    /// Publication date or RFC 3339 timestamp.
    #[serde(default)]
    pub published: Option<String>,
}

impl TryFrom<RawSearchResult> for PaperRecord {
    type Error = ToolError;

    fn try_from(raw: RawSearchResult) -> ToolResult<Self> {
        let id = required(raw.id, "id")?;
        let title = required(raw.title, "title")?;
        let authors =
            raw.authors.ok_or_else(|| ToolError::validation("authors", "missing from search result"))?;
        let summary = raw.summary.ok_or_else(|| ToolError::validation("summary", "missing from search result"))?;
        let pdf_url = required(raw.pdf_url, "pdf_url")?;
        let published = parse_published(&required(raw.published, "published")?)?;

        Ok(Self { id, title, authors, summary, pdf_url, published })
    }
}

fn required(value: Option<String>, field: &str) -> ToolResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(ToolError::validation(field, "must not be empty")),
        None => Err(ToolError::validation(field, "missing from search result")),
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp, keeping only the date.
fn parse_published(value: &str) -> ToolResult<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|e| ToolError::validation("published", format!("invalid date '{value}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawSearchResult {
        RawSearchResult {
            id: Some("2301.00001v1".to_string()),
            title: Some("Attention Revisited".to_string()),
            authors: Some(vec!["Ada Lovelace".to_string(), "Alan Turing".to_string()]),
            summary: Some("We revisit attention.".to_string()),
            pdf_url: Some("http://arxiv.org/pdf/2301.00001v1".to_string()),
            published: Some("2023-01-02T18:59:59Z".to_string()),
        }
    }

    #[test]
    fn test_projection_keeps_date_only() {
        let record = PaperRecord::try_from(raw()).unwrap();
        assert_eq!(record.id, "2301.00001v1");
        assert_eq!(record.published, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        assert_eq!(record.author_names(), "Ada Lovelace, Alan Turing");
    }

    #[test]
    fn test_projection_accepts_plain_date() {
        let mut input = raw();
        input.published = Some("2020-05-17".to_string());
        let record = PaperRecord::try_from(input).unwrap();
        assert_eq!(record.published.to_string(), "2020-05-17");
    }

    #[test]
    fn test_projection_rejects_missing_fields() {
        let mut input = raw();
        input.pdf_url = None;
        let err = PaperRecord::try_from(input).unwrap_err();
        assert!(matches!(err, ToolError::Validation { ref field, .. } if field == "pdf_url"));

        let mut input = raw();
        input.id = Some("  ".to_string());
        assert!(PaperRecord::try_from(input).is_err());

        let mut input = raw();
        input.published = Some("last tuesday".to_string());
        assert!(PaperRecord::try_from(input).is_err());
    }

    #[test]
    fn test_serialized_shape_omits_id() {
        let record = PaperRecord::try_from(raw()).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["published"], "2023-01-02");
        assert_eq!(value["authors"][1], "Alan Turing");
    }
}
