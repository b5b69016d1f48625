//! Enumeration types for tool parameters.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ToolError;

/// Type tag of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// PDF; text is extracted page by page.
    Pdf,
    /// Plain UTF-8 text.
    Txt,
}

impl FromStr for DocumentType {
    type Err = ToolError;

    /// Case-insensitive; anything but `pdf` or `txt` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "txt" => Ok(Self::Txt),
            other => Err(ToolError::validation(
                "file_type",
                format!("unsupported file type '{other}', expected 'pdf' or 'txt'"),
            )),
        }
    }
}

/// JSTOR search flavours exposed as passthrough tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JstorSearch {
    /// Combined semantic and lexical ranking.
    Hybrid,
    /// Embedding-based search.
    Semantic,
    /// Keyword search.
    Lexical,
    /// Search v3 basic results.
    Basic,
    /// Search v3 results grouped by content type.
    Grouped,
}

impl JstorSearch {
    /// Path below the service base URL.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Hybrid => "hybridsearch",
            Self::Semantic => "semanticsearch",
            Self::Lexical => "lexicalsearch",
            Self::Basic => "basic",
            Self::Grouped => "grouped",
        }
    }

    /// Whether the flavour lives on the vector service (vs. search v3).
    #[must_use]
    pub const fn is_vector_service(self) -> bool {
        matches!(self, Self::Hybrid | Self::Semantic | Self::Lexical)
    }
}
