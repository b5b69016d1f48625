//! Error types for the research MCP server.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::path::PathBuf;
use std::time::Duration;

/// Errors from the remote search services (arXiv, JSTOR, Cedar).
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Rate limited by the remote service (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from the service
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },

    /// The arXiv Atom feed is not well-formed XML
    #[error("Malformed feed: {0}")]
    Feed(#[from] quick_xml::Error),
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

}

/// Errors from the on-disk topic store.
///
/// `Missing` and `Corrupt` never escape the store's public operations as
/// hard failures: the write path treats them as an empty namespace and the
/// renderers turn them into messages. Only `Io` and `Serialize` propagate.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// The namespace has no `papers_info.json`.
    #[error("No papers file at {}", path.display())]
    Missing {
        /// Expected file location
        path: PathBuf,
    },

    /// The namespace file exists but is not a valid paper mapping.
    #[error("Corrupt papers file at {}: {source}", path.display())]
    Corrupt {
        /// File location
        path: PathBuf,
        /// Parse failure
        #[source]
        source: serde_json::Error,
    },

    /// A mapping could not be serialized for writing.
    #[error("Failed to serialize papers for {}: {source}", path.display())]
    Serialize {
        /// Destination file
        path: PathBuf,
        /// Serializer failure
        #[source]
        source: serde_json::Error,
    },

    /// Filesystem failure while reading or writing a namespace.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Wrap an I/O error with the path it occurred on.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

/// Errors from MCP tool execution.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// Error from a remote search service
    #[error("API error: {0}")]
    Client(#[from] ClientError),

    /// Error from the topic store
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Input validation failed
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Text could not be extracted from an uploaded document
    #[error("Document error: {0}")]
    Document(String),
}

impl ToolError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Create a document extraction error.
    #[must_use]
    pub fn document(message: impl Into<String>) -> Self {
        Self::Document(message.into())
    }

    /// Returns true if the failure was caused by bad caller input.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::Serialization(_))
    }

    /// Convert to a user-friendly error message for MCP response.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Client(ClientError::RateLimited { retry_after }) => {
                format!(
                    "Rate limited by the search service. Please wait {:?} before retrying.",
                    retry_after
                )
            }
            Self::Client(ClientError::NotFound { resource }) => {
                format!("Not found: {resource}. Please check the ID is correct.")
            }
            Self::Validation { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            _ => self.to_string(),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_messages() {
        assert!(ClientError::rate_limited(60).to_string().contains("60s"));
        assert_eq!(ClientError::server(503, "unavailable").to_string(), "Server error (503): unavailable");
        assert_eq!(ClientError::bad_request("invalid query").to_string(), "Bad request: invalid query");
    }

    #[test]
    fn test_store_error_messages_carry_path() {
        let corrupt = StoreError::Corrupt {
            path: PathBuf::from("papers/x/papers_info.json"),
            source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        };
        assert!(corrupt.to_string().starts_with("Corrupt papers file at papers/x/papers_info.json"));

        let io = StoreError::io("papers", std::io::Error::other("disk full"));
        assert!(io.to_string().contains("disk full"));

        let serialize = StoreError::Serialize {
            path: PathBuf::from("papers/x/papers_info.json"),
            source: serde_json::from_str::<serde_json::Value>("[").unwrap_err(),
        };
        assert!(serialize.to_string().starts_with("Failed to serialize papers for papers/x/papers_info.json"));
        let tool: ToolError = serialize.into();
        assert!(!tool.is_invalid_argument());
    }

    #[test]
    fn test_tool_error_user_message() {
        let err = ToolError::validation("file_type", "expected 'pdf' or 'txt'");
        assert!(err.is_invalid_argument());
        assert!(err.to_user_message().contains("file_type"));
        assert!(err.to_user_message().contains("expected 'pdf' or 'txt'"));
    }

    #[test]
    fn test_tool_error_from_client() {
        let err: ToolError = ClientError::not_found("iid=abc").into();
        assert!(!err.is_invalid_argument());
        assert!(err.to_user_message().starts_with("Not found"));
    }
}
