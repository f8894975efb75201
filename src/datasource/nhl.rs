//! League web API client implementation.

use super::{DataSource, DataSourceError, Endpoint};
use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = "hockey-odds/0.1";

/// Data source backed by the public league web API.
#[derive(Debug, Clone)]
pub struct NhlDataSource {
    client: Client,
    base_url: String,
}

impl NhlDataSource {
    /// Create a data source with a fixed per-request timeout.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, DataSourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DataSourceError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create with the default league API URL.
    pub fn default_url(timeout: Duration) -> Result<Self, DataSourceError> {
        Self::new(crate::config::DEFAULT_NHL_API_BASE.to_string(), timeout)
    }

    pub fn url_for(&self, endpoint: &Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }
}

#[async_trait]
impl DataSource for NhlDataSource {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<serde_json::Value, DataSourceError> {
        let url = self.url_for(endpoint);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| DataSourceError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(DataSourceError::RateLimited);
        }
        if !status.is_success() {
            return Err(DataSourceError::HttpError {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unexpected status")
                    .to_string(),
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| DataSourceError::ParseError(e.to_string()))
    }
}
