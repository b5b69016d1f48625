//! Configuration for the research MCP server.

use std::path::PathBuf;
use std::time::Duration;

/// Service endpoints and client tuning constants.
pub mod api {
    use std::time::Duration;

    /// arXiv export API base URL.
    pub const ARXIV_API: &str = "https://export.arxiv.org/api";

    /// JSTOR vector search service (hybrid, semantic and lexical search).
    pub const JSTOR_VECTOR_API: &str = "https://search-vector-service.apps.prod.cirrostratus.org";

    /// JSTOR search v3 API (basic and grouped search).
    pub const JSTOR_SEARCH_API: &str = "https://search3.apps.prod.cirrostratus.org/v3.0/jstor";

    /// Cedar delivery service for item metadata.
    pub const CEDAR_API: &str = "http://cedar-delivery-service";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Cache TTL for GET responses (5 minutes).
    pub const CACHE_TTL: Duration = Duration::from_secs(300);

    /// Maximum cache size.
    pub const CACHE_MAX_SIZE: u64 = 1000;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Local paper cache layout.
pub mod storage {
    /// Default papers root, relative to the working directory.
    pub const DEFAULT_PAPERS_DIR: &str = "papers";

    /// File holding one topic's `id -> record` mapping.
    pub const PAPERS_FILE: &str = "papers_info.json";
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory holding one sub-directory per topic.
    pub papers_dir: PathBuf,

    /// Base URL for the arXiv API (for testing with mock servers).
    pub arxiv_api_url: String,

    /// Base URL for the JSTOR vector search service.
    pub jstor_vector_url: String,

    /// Base URL for the JSTOR basic/grouped search API.
    pub jstor_search_url: String,

    /// Base URL for the Cedar item metadata service.
    pub cedar_url: String,

    /// Value of the `UUID` cookie forwarded to JSTOR services (optional).
    pub search_uuid: Option<String>,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Cache TTL.
    pub cache_ttl: Duration,

    /// Maximum cache size.
    pub cache_max_size: u64,
}

impl Config {
    /// Create a new configuration for the given papers root.
    #[must_use]
    pub fn new(papers_dir: impl Into<PathBuf>, search_uuid: Option<String>) -> Self {
        Self {
            papers_dir: papers_dir.into(),
            arxiv_api_url: api::ARXIV_API.to_string(),
            jstor_vector_url: api::JSTOR_VECTOR_API.to_string(),
            jstor_search_url: api::JSTOR_SEARCH_API.to_string(),
            cedar_url: api::CEDAR_API.to_string(),
            search_uuid,
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            cache_ttl: api::CACHE_TTL,
            cache_max_size: api::CACHE_MAX_SIZE,
        }
    }

    /// Create a test configuration pointing every service at one mock server.
    #[must_use]
    pub fn for_testing(base_url: &str, papers_dir: impl Into<PathBuf>) -> Self {
        Self {
            papers_dir: papers_dir.into(),
            arxiv_api_url: format!("{}/arxiv", base_url),
            jstor_vector_url: format!("{}/vector", base_url),
            jstor_search_url: format!("{}/jstor", base_url),
            cedar_url: format!("{}/cedar", base_url),
            search_uuid: None,
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            cache_ttl: Duration::from_secs(0), // No caching in tests
            cache_max_size: 0,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `RESEARCH_PAPERS_DIR` (default `papers`) and `JSTOR_SEARCH_UUID`.
    pub fn from_env() -> anyhow::Result<Self> {
        let papers_dir = std::env::var("RESEARCH_PAPERS_DIR")
            .unwrap_or_else(|_| storage::DEFAULT_PAPERS_DIR.to_string());
        anyhow::ensure!(!papers_dir.trim().is_empty(), "RESEARCH_PAPERS_DIR must not be empty");

        let search_uuid = std::env::var("JSTOR_SEARCH_UUID").ok().filter(|v| !v.is_empty());
        Ok(Self::new(papers_dir, search_uuid))
    }

    /// Check if a JSTOR session cookie is configured.
    #[must_use]
    pub const fn has_search_uuid(&self) -> bool {
        self.search_uuid.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(storage::DEFAULT_PAPERS_DIR, None)
    }
}
