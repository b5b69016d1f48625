//! Text extraction from uploaded documents.
//!
//! The extracted text is only used as a search query, so PDF extraction is
//! best effort: pages without extractable text are skipped.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{ToolError, ToolResult};
use crate::models::DocumentType;

/// Decode a base64 file upload.
pub fn decode_upload(encoded: &str) -> ToolResult<Vec<u8>> {
    STANDARD
        .decode(encoded.trim())
        .map_err(|e| ToolError::validation("file_bytes", format!("invalid base64: {e}")))
}

/// Extract the text of a document.
///
/// PDF pages are concatenated, each followed by a space. Text files must be
/// valid UTF-8.
pub fn extract_text(bytes: &[u8], kind: DocumentType) -> ToolResult<String> {
    match kind {
        DocumentType::Pdf => extract_pdf_text(bytes),
        DocumentType::Txt => String::from_utf8(bytes.to_vec())
            .map_err(|e| ToolError::validation("file_bytes", format!("text file is not UTF-8: {e}"))),
    }
}

fn extract_pdf_text(bytes: &[u8]) -> ToolResult<String> {
    let doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| ToolError::document(format!("failed to parse PDF: {e}")))?;

    let mut text = String::new();
    for page_number in doc.get_pages().keys() {
        match doc.extract_text(&[*page_number]) {
            Ok(page_text) if !page_text.is_empty() => {
                text.push_str(&page_text);
                text.push(' ');
            }
            Ok(_) => {}
            Err(e) => tracing::debug!(page = page_number, error = %e, "No text on page"),
        }
    }

    tracing::debug!(pages = doc.get_pages().len(), chars = text.len(), "Extracted PDF text");
    Ok(text)
}
