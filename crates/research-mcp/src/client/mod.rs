//! Remote search service client.
//!
//! Provides an async HTTP client for arXiv, the JSTOR search services and
//! the Cedar metadata service with:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff
//! - GET response caching with a 5-minute TTL

mod arxiv;

pub use arxiv::parse_feed;

use std::time::Duration;

use moka::future::Cache;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{JstorSearch, RawSearchResult};

/// Client for the remote search collaborators.
#[derive(Clone)]
pub struct ResearchClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// GET response bodies keyed by request digest.
    cache: Cache<String, String>,

    /// arXiv API base URL.
    arxiv_api_url: String,

    /// JSTOR vector search base URL.
    jstor_vector_url: String,

    /// JSTOR search v3 base URL.
    jstor_search_url: String,

    /// Cedar delivery service URL.
    cedar_url: String,

    /// `UUID` cookie for JSTOR services.
    search_uuid: Option<String>,
}

impl ResearchClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("research-mcp/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
            .build_with_max_retries(3);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        let cache = Cache::builder()
            .max_capacity(config.cache_max_size)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            client,
            cache,
            arxiv_api_url: config.arxiv_api_url.clone(),
            jstor_vector_url: config.jstor_vector_url.clone(),
            jstor_search_url: config.jstor_search_url.clone(),
            cedar_url: config.cedar_url.clone(),
            search_uuid: config.search_uuid.clone(),
        })
    }

    /// Check if a JSTOR session cookie is configured.
    #[must_use]
    pub fn has_search_uuid(&self) -> bool {
        self.search_uuid.is_some()
    }

    /// Search arXiv by relevance.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn search_arxiv(&self, query: &str, max_results: u32) -> ClientResult<Vec<RawSearchResult>> {
        let url = format!("{}/query", self.arxiv_api_url);

        let params = vec![
            ("search_query".to_string(), query.to_string()),
            ("start".to_string(), "0".to_string()),
            ("max_results".to_string(), max_results.to_string()),
            ("sortBy".to_string(), "relevance".to_string()),
            ("sortOrder".to_string(), "descending".to_string()),
        ];

        let feed = self.get_text(&url, &params).await?;
        let results = arxiv::parse_feed(&feed)?;
        tracing::debug!(query, found = results.len(), "arXiv search finished");

        Ok(results)
    }

    /// Run one of the JSTOR searches and return its JSON unchanged.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn jstor_search(
        &self,
        kind: JstorSearch,
        query: &str,
        top_k: u32,
    ) -> ClientResult<serde_json::Value> {
        let base = if kind.is_vector_service() { &self.jstor_vector_url } else { &self.jstor_search_url };
        let url = format!("{}/{}", base, kind.endpoint());

        let body = serde_json::json!({
            "query": query,
            "limit": top_k
        });

        self.post(&url, &body).await
    }

    /// Fetch item metadata from the Cedar delivery service.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn item_metadata(&self, item_id: &str) -> ClientResult<serde_json::Value> {
        let params = vec![("iid".to_string(), item_id.to_string())];
        let body = self.get_text(&self.cedar_url, &params).await?;

        serde_json::from_str(&body).map_err(ClientError::from)
    }

    /// Make a cached GET request, returning the body text.
    async fn get_text(&self, url: &str, params: &[(String, String)]) -> ClientResult<String> {
        let cache_key = self.cache_key("GET", url, params);
        if let Some(cached) = self.cache.get(&cache_key).await {
            return Ok(cached);
        }

        let response = self.client.get(url).query(params).send().await?;
        let response = self.handle_response(response).await?;
        let body = response.text().await?;

        self.cache.insert(cache_key, body.clone()).await;

        Ok(body)
    }

    /// Make a JSON POST request, forwarding the JSTOR cookie if configured.
    async fn post<T>(&self, url: &str, body: &serde_json::Value) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let body_str = serde_json::to_string(body)?;

        let mut request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body_str);

        if let Some(uuid) = &self.search_uuid {
            request = request.header(reqwest::header::COOKIE, format!("UUID={uuid}"));
        }

        let response = request.send().await?;
        let response = self.handle_response(response).await?;
        let value: serde_json::Value = response.json().await?;

        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// Handle API response status codes.
    async fn handle_response(&self, response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        tracing::warn!(status = status.as_u16(), url = %response.url(), "Remote service returned an error");

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }

    /// Generate cache key.
    fn cache_key(&self, method: &str, url: &str, params: &[(String, String)]) -> String {
        use md5::{Digest, Md5};

        let mut hasher = Md5::new();
        hasher.update(method.as_bytes());
        hasher.update(b"|");
        hasher.update(url.as_bytes());
        hasher.update(b"|");

        for (k, v) in params {
            hasher.update(k.as_bytes());
            hasher.update(b"=");
            hasher.update(v.as_bytes());
            hasher.update(b"&");
        }

        format!("{:x}", hasher.finalize())
    }
}

impl std::fmt::Debug for ResearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResearchClient")
            .field("arxiv_api_url", &self.arxiv_api_url)
            .field("has_search_uuid", &self.has_search_uuid())
            .finish()
    }
}
