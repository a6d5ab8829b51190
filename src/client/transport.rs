//! HTTP transport
//!
//! GET-only JSON transport for the dashboard API. One request per call: no
//! caching, retry, or deduplication happens here.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use uuid::Uuid;

use super::error::{ClientError, ClientResult};

/// Issues GET requests against the dashboard API and returns the JSON body
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `path` (relative to the API base) with the given query pairs
    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> ClientResult<Value>;
}

/// Configuration for the HTTP transport
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Base URL for the dashboard API (e.g., "http://localhost:5000/api")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            request_timeout_ms: 10_000,
            user_agent: format!("dinedash/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// `reqwest`-backed transport
pub struct HttpTransport {
    client: Client,
    config: HttpTransportConfig,
}

impl HttpTransport {
    /// Create a new transport with the given configuration
    pub fn new(config: HttpTransportConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> ClientResult<Value> {
        let url = self.url(path);
        let request_id = Uuid::new_v4().to_string();

        tracing::debug!(request_id = %request_id, url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .header("X-Request-Id", &request_id)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::debug!(request_id = %request_id, status = status.as_u16(), "request failed");
            return Err(ClientError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        Ok(body)
    }
}
