//! Read-only MCP resources over the topic store.
//!
//! - `papers://folders` lists the readable topics.
//! - `papers://{topic}` renders one topic's papers.
//!
//! Both return Markdown and never modify storage. Unreadable namespaces are
//! turned into messages rather than errors.

use serde::Serialize;

use crate::error::{StoreError, ToolResult};
use crate::formatters;
use crate::models::TopicName;
use crate::store::TopicStore;

/// URI scheme shared by all paper resources.
pub const SCHEME: &str = "papers://";

/// URI of the topic listing.
pub const FOLDERS_URI: &str = "papers://folders";

/// URI template of a topic's detail view.
pub const TOPIC_URI_TEMPLATE: &str = "papers://{topic}";

const MARKDOWN: &str = "text/markdown";

/// Entry in a `resources/list` response.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceInfo {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "mimeType")]
    pub mime_type: &'static str,
}

/// Entry in a `resources/templates/list` response.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceTemplateInfo {
    #[serde(rename = "uriTemplate")]
    pub uri_template: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "mimeType")]
    pub mime_type: &'static str,
}

/// Static resources.
#[must_use]
pub fn list_resources() -> Vec<ResourceInfo> {
    vec![ResourceInfo {
        uri: FOLDERS_URI,
        name: "get_available_folders",
        description: "List all available topic folders in the papers directory.",
        mime_type: MARKDOWN,
    }]
}

/// Parameterized resources.
#[must_use]
pub fn list_templates() -> Vec<ResourceTemplateInfo> {
    vec![ResourceTemplateInfo {
        uri_template: TOPIC_URI_TEMPLATE,
        name: "get_topic_papers",
        description: "Get detailed information about papers on a specific topic.",
        mime_type: MARKDOWN,
    }]
}

/// Markdown list of topics with a readable papers file.
pub async fn list_topics(store: &TopicStore) -> ToolResult<String> {
    let topics = store.readable_topics().await?;
    Ok(formatters::format_topic_listing(&topics))
}

/// Markdown rendering of one topic's papers.
pub async fn render_topic(store: &TopicStore, topic: &str) -> ToolResult<String> {
    let name = TopicName::new(topic)?;

    match store.load(&name).await {
        Ok(papers) => Ok(formatters::format_topic_papers(topic, &papers)),
        Err(StoreError::Missing { .. }) => Ok(formatters::format_missing_topic(topic)),
        Err(StoreError::Corrupt { path, source }) => {
            tracing::warn!(topic, path = %path.display(), error = %source, "Corrupt papers file");
            Ok(formatters::format_corrupt_topic(topic))
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolve a resource URI. Returns `None` for URIs outside `papers://`.
pub async fn read_resource(store: &TopicStore, uri: &str) -> ToolResult<Option<String>> {
    if uri == FOLDERS_URI {
        return list_topics(store).await.map(Some);
    }

    match uri.strip_prefix(SCHEME) {
        Some(topic) if !topic.is_empty() => render_topic(store, topic).await.map(Some),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_descriptors_serialize() {
        let resources = serde_json::to_value(list_resources()).unwrap();
        assert_eq!(resources[0]["uri"], "papers://folders");
        assert_eq!(resources[0]["mimeType"], "text/markdown");

        let templates = serde_json::to_value(list_templates()).unwrap();
        assert_eq!(templates[0]["uriTemplate"], "papers://{topic}");
    }

    #[tokio::test]
    async fn test_unknown_scheme_is_none() {
        let store = TopicStore::new("/nonexistent/papers-root");
        assert!(read_resource(&store, "file:///etc/hosts").await.unwrap().is_none());
        assert!(read_resource(&store, "papers://").await.unwrap().is_none());
    }
}
