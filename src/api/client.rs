use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use url::Url;

use super::error::ApiError;
use super::source::DetailSource;
use crate::config::{Config, ConfigError};
use crate::content::ContentDetail;

const MAX_BODY_SIZE: usize = 5 * 1024 * 1024; // 5MB

/// HTTP client for the contents API.
///
/// Cheap to clone: the inner `reqwest::Client` is reference counted.
/// Every request makes exactly one attempt bounded by `timeout`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    timeout: Duration,
}

/// Builds the shared HTTP client with the configured user agent.
pub fn build_http_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .build()
}

impl ApiClient {
    /// `base` must already be validated (see [`crate::util::validate_base_url`]).
    pub fn new(http: reqwest::Client, base: Url, timeout: Duration) -> Self {
        Self {
            http,
            base,
            timeout,
        }
    }

    pub fn from_config(http: reqwest::Client, config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(http, config.base_url()?, config.request_timeout()))
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Base URL with `segments` appended, each percent-encoded as one path segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET `url` and return the raw body of a 2xx response.
    pub(crate) async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, ApiError> {
        tracing::debug!(url = %url, "GET");

        let request = async {
            let response = self
                .http
                .get(url.clone())
                .header(reqwest::header::ACCEPT, "application/json")
                .send()
                .await
                .map_err(ApiError::Network)?;

            if !response.status().is_success() {
                return Err(ApiError::HttpStatus(response.status().as_u16()));
            }

            read_limited_bytes(response, MAX_BODY_SIZE).await
        };

        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| ApiError::Timeout)?
    }

    /// Fetch the detail document for one content id.
    ///
    /// The id is trimmed before use; an id that is empty after trimming is
    /// rejected without issuing a request.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Network`] / [`ApiError::Timeout`] - transport failure
    /// - [`ApiError::HttpStatus`] - non-2xx response (including 404)
    /// - [`ApiError::Parse`] - body does not match the detail schema
    pub async fn fetch_detail(&self, id: &str) -> Result<ContentDetail, ApiError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ApiError::Parse("empty content id".to_string()));
        }

        let bytes = self.get_bytes(self.endpoint(&["api", "contents", id])).await?;
        let detail: ContentDetail = serde_json::from_slice(&bytes)?;
        Ok(detail)
    }
}

#[async_trait]
impl DetailSource for ApiClient {
    async fn fetch_detail(&self, id: &str) -> Result<ContentDetail, ApiError> {
        ApiClient::fetch_detail(self, id).await
    }
}

async fn read_limited_bytes(response: reqwest::Response, limit: usize) -> Result<Vec<u8>, ApiError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len > limit as u64 {
            return Err(ApiError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(ApiError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(ApiError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
