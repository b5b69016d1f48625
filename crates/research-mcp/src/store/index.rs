//! Read-only queries across every namespace.

use std::io::ErrorKind;

use super::TopicStore;
use crate::error::{StoreError, StoreResult, ToolError, ToolResult};
use crate::models::{PaperRecord, TopicName};

/// Result of looking a paper up by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// First record found with that id.
    Found(PaperRecord),
    /// No namespace holds the id; carries the queried id.
    NotFound(String),
}

impl TopicStore {
    /// Directory names under the papers root, in lexical order.
    ///
    /// A missing root yields no topics. Entries that are not directories, or
    /// whose names are not valid UTF-8, are ignored.
    pub async fn topics(&self) -> StoreResult<Vec<TopicName>> {
        let mut entries = match tokio::fs::read_dir(self.root()).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(self.root(), e)),
        };

        let mut topics = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| StoreError::io(self.root(), e))? {
            let is_dir = tokio::fs::metadata(entry.path()).await.map(|m| m.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => topics.push(TopicName::from_dir_name(name)),
                Err(name) => tracing::debug!(?name, "Skipping non UTF-8 topic directory"),
            }
        }

        topics.sort();
        Ok(topics)
    }

    /// Topics whose papers file exists and parses (an empty mapping counts).
    ///
    /// Unreadable namespaces are skipped, never fatal for the enumeration.
    pub async fn readable_topics(&self) -> StoreResult<Vec<TopicName>> {
        let mut readable = Vec::new();
        for topic in self.topics().await? {
            match self.load(&topic).await {
                Ok(_) => readable.push(topic),
                Err(StoreError::Missing { .. }) => {}
                Err(e) => tracing::warn!(topic = %topic, error = %e, "Skipping unreadable topic"),
            }
        }
        Ok(readable)
    }

    /// Find a paper by id, scanning namespaces in lexical order.
    ///
    /// The first namespace holding the id wins. Missing, empty or corrupt
    /// namespaces are logged and skipped.
    pub async fn find_by_id(&self, paper_id: &str) -> ToolResult<Lookup> {
        if paper_id.trim().is_empty() {
            return Err(ToolError::validation("paper_id", "must not be empty"));
        }

        for topic in self.topics().await? {
            let mut papers = match self.load(&topic).await {
                Ok(papers) => papers,
                Err(StoreError::Missing { .. }) => continue,
                Err(e) => {
                    tracing::warn!(topic = %topic, error = %e, "Error reading papers file, skipping");
                    continue;
                }
            };

            if let Some(record) = papers.remove(paper_id) {
                tracing::debug!(paper_id, topic = %topic, "Paper found");
                return Ok(Lookup::Found(record));
            }
        }

        Ok(Lookup::NotFound(paper_id.to_string()))
    }
}
