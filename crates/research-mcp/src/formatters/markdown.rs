//! Markdown rendering for the paper resources.

use crate::models::{PaperMap, PaperRecord, TopicName, display_title};

/// Summaries are cut to this many characters for display.
pub const SUMMARY_PREVIEW_CHARS: usize = 500;

/// Render the topic listing.
#[must_use]
pub fn format_topic_listing(topics: &[TopicName]) -> String {
    let mut output = String::from("# Available Topics\n\n");

    let Some(last) = topics.last() else {
        output.push_str("No topics found.\n");
        return output;
    };

    for topic in topics {
        output.push_str(&format!("- {topic}\n"));
    }
    output.push_str(&format!("\nUse @{last} to access papers in that topic.\n"));

    output
}

/// Render every record of one topic.
///
/// `topic` is the name as requested; the heading title-cases it.
#[must_use]
pub fn format_topic_papers(topic: &str, papers: &PaperMap) -> String {
    let mut output = format!("# Papers on {}\n\n", display_title(topic));
    output.push_str(&format!("Total papers: {}\n\n", papers.len()));

    for record in papers.values() {
        output.push_str(&format_record_markdown(record));
        output.push_str("---\n\n");
    }

    output
}

/// Render a single record.
#[must_use]
pub fn format_record_markdown(record: &PaperRecord) -> String {
    let mut output = format!("## {}\n", record.title);
    output.push_str(&format!("- **Paper ID**: {}\n", record.id));
    output.push_str(&format!("- **Authors**: {}\n", record.author_names()));
    output.push_str(&format!("- **Published**: {}\n", record.published));
    output.push_str(&format!("- **PDF URL**: [{url}]({url})\n\n", url = record.pdf_url));
    output.push_str(&format!("### Summary\n{}...\n\n", summary_preview(&record.summary)));
    output
}

/// Message for a topic with no papers file.
#[must_use]
pub fn format_missing_topic(topic: &str) -> String {
    format!("# No papers found for topic: {topic}\n\nTry searching for papers on this topic first.")
}

/// Message for a topic whose papers file cannot be parsed.
#[must_use]
pub fn format_corrupt_topic(topic: &str) -> String {
    format!("# Error reading papers data for {topic}\n\nThe papers data file is corrupted.")
}

/// First [`SUMMARY_PREVIEW_CHARS`] characters, cut on a char boundary.
fn summary_preview(summary: &str) -> &str {
    match summary.char_indices().nth(SUMMARY_PREVIEW_CHARS) {
        Some((end, _)) => &summary[..end],
        None => summary,
    }
}
