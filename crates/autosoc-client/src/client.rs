//! HTTP client for the AutoSOC read API.

use crate::config::RetryConfig;
use autosoc_core::{DashboardSnapshot, Result, SocError};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Default tenant identifier
pub const DEFAULT_CLIENT_ID: &str = "demo-client-001";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Liveness answer of the API server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// "healthy" when the server is up
    pub status: String,
}

impl HealthStatus {
    /// Returns true if the server reports itself healthy
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// Client for one tenant of the read API
#[derive(Clone)]
pub struct SocClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    base_url: Url,
    client_id: String,
    timeout: Duration,
    retry_config: RetryConfig,
}

impl std::fmt::Debug for SocClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("client_id", &self.inner.client_id)
            .finish_non_exhaustive()
    }
}

impl SocClient {
    /// Create a client for the given base URL using default settings
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        SocClientBuilder::new(base_url).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> SocClientBuilder {
        SocClientBuilder::new(base_url)
    }

    /// Base URL requests are made against
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// Tenant this client reads
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.inner.client_id
    }

    /// Fetch the current snapshot (`GET /overview`), retrying transient failures
    pub async fn overview(&self) -> Result<DashboardSnapshot> {
        let url = self.endpoint("overview")?;
        let mut attempt = 0;

        loop {
            match self.get(url.clone()).await {
                Ok(snapshot) => return Ok(snapshot),
                Err(e) if e.is_retryable() && attempt < self.inner.retry_config.max_retries => {
                    let backoff = self.inner.retry_config.backoff_for(attempt);
                    warn!(error = %e, attempt, ?backoff, "overview fetch failed, retrying");
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Ask the server whether it is up (`GET /health` at the server root)
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = self
            .inner
            .base_url
            .join("/health")
            .map_err(|e| SocError::InvalidUrl(e.to_string()))?;
        self.get(url).await
    }

    /// Build `<base>/<path>?client_id=<id>`
    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SocError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .push(path);
        url.query_pairs_mut()
            .append_pair("client_id", &self.inner.client_id);
        Ok(url)
    }

    /// Perform a GET request
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        self.handle_response(response).await
    }

    fn map_transport_error(&self, e: &reqwest::Error) -> SocError {
        if e.is_timeout() {
            SocError::Timeout(self.inner.timeout.as_secs())
        } else if e.is_connect() {
            SocError::Connection(e.to_string())
        } else {
            SocError::Http(e.to_string())
        }
    }

    /// Handle an API response that returns JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| self.map_transport_error(&e))?;
            serde_json::from_str(&body).map_err(SocError::Json)
        } else {
            Err(Self::error_from(status.as_u16(), response).await)
        }
    }

    /// Convert an error response to a SocError
    async fn error_from(status: u16, response: reqwest::Response) -> SocError {
        let body = response.text().await.unwrap_or_default();

        // Try to parse error message from JSON
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .or_else(|| v.get("detail"))
                    .and_then(|e| e.as_str())
                    .map(String::from)
            })
            .unwrap_or(body);

        match status {
            401 | 403 => SocError::Unauthorized,
            404 => SocError::NotFound { resource: message },
            _ => SocError::Api {
                code: status,
                message,
            },
        }
    }
}

/// Builder for configuring a [`SocClient`]
pub struct SocClientBuilder {
    base_url: String,
    client_id: String,
    timeout: Duration,
    user_agent: String,
    retry_config: RetryConfig,
}

impl SocClientBuilder {
    /// Create a new builder for the given base URL
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("autosoc/{}", env!("CARGO_PKG_VERSION")),
            retry_config: RetryConfig::default(),
        }
    }

    /// Set the tenant identifier
    #[must_use]
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = id.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set retry configuration
    #[must_use]
    pub const fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<SocClient> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| SocError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(SocError::InvalidUrl(self.base_url));
        }
        if self.client_id.trim().is_empty() {
            return Err(SocError::Config("client id must not be empty".to_string()));
        }

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| SocError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(SocClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                client_id: self.client_id,
                timeout: self.timeout,
                retry_config: self.retry_config,
            }),
        })
    }
}
