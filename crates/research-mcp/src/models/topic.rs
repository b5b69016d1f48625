//! Topic names and their on-disk namespace form.

use std::fmt;
use std::path::{Component, Path};

use crate::error::{ToolError, ToolResult};

/// Normalized topic name: lower-cased, spaces replaced by underscores.
///
/// `"Quantum Computing"` and `"quantum computing"` both map to
/// `quantum_computing`, which is the directory name under the papers root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TopicName(String);

impl TopicName {
    /// Normalize a human-entered topic.
    ///
    /// The normalized form must be a single directory name: path separators,
    /// `.`, `..` and absolute paths are rejected.
    pub fn new(topic: &str) -> ToolResult<Self> {
        if topic.trim().is_empty() {
            return Err(ToolError::validation("topic", "must not be empty"));
        }

        let normalized = normalize(topic);
        if !is_single_dir_name(&normalized) {
            return Err(ToolError::validation(
                "topic",
                format!("'{topic}' is not usable as a directory name"),
            ));
        }
        Ok(Self(normalized))
    }

    /// Wrap a directory name found under the papers root as-is.
    #[must_use]
    pub fn from_dir_name(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The namespace (directory) name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TopicName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn normalize(topic: &str) -> String {
    topic.to_lowercase().replace(' ', "_")
}

fn is_single_dir_name(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!((components.next(), components.next()), (Some(Component::Normal(_)), None))
}

/// Title-case a topic for headings.
///
/// A letter is upper-cased when it follows a non-letter (or starts the
/// string) and lower-cased otherwise, so `"rust_2024 async"` becomes
/// `"Rust 2024 Async"`.
#[must_use]
pub fn display_title(topic: &str) -> String {
    let mut out = String::with_capacity(topic.len());
    let mut prev_is_letter = false;
    for c in topic.replace('_', " ").chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_space_variants_share_namespace() {
        let a = TopicName::new("Quantum Computing").unwrap();
        let b = TopicName::new("quantum computing").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "quantum_computing");
    }

    #[test]
    fn test_empty_topic_rejected() {
        assert!(TopicName::new("").is_err());
        assert!(TopicName::new("   ").is_err());
    }

    #[test]
    fn test_display_title() {
        assert_eq!(display_title("quantum_computing"), "Quantum Computing");
        assert_eq!(display_title("LLM agents"), "Llm Agents");
        assert_eq!(display_title("rust_2024 async"), "Rust 2024 Async");
    }

    #[test]
    fn test_path_like_topics_rejected() {
        for topic in ["../escaped", "a/b", "a\\b", "/etc", ".", ".."] {
            let err = TopicName::new(topic).unwrap_err();
            assert!(err.is_invalid_argument(), "{topic} should be rejected");
        }

        assert_eq!(TopicName::new("v1.2 results").unwrap().as_str(), "v1.2_results");
        assert_eq!(TopicName::new("...").unwrap().as_str(), "...");
    }
}
