use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::HeaderMap, Client, StatusCode};
use serde_json::Value;

/// Reasons an upstream request produced no usable body.
///
/// None of these carry the request URL; the forecast URL embeds the API key.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Transport(reqwest::Error),

    #[error("request failed with status: {0}")]
    Status(StatusCode),

    #[error("response was not valid JSON: {0}")]
    Decode(reqwest::Error),
}

impl FetchError {
    fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Transport(err.without_url())
        }
    }
}

/// Performs a single JSON GET request.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get_json(&self, url: &str, headers: HeaderMap) -> Result<Value, FetchError>;
}

/// `Fetcher` backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get_json(&self, url: &str, headers: HeaderMap) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(FetchError::from_send)?;

        let status = response.status();
        tracing::debug!(%status, "upstream responded");

        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Decode(e.without_url())
            }
        })
    }
}
