//! HTTP transport and per-page fetching

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::{Result, TransportError};

/// Anything that can GET a URL and decode the body as JSON.
///
/// [`HttpFetcher`] is the production implementation; tests substitute a
/// scripted one.
pub trait Fetch: Send + Sync {
    /// Fetches `url`, failing on network errors, non-success statuses and
    /// bodies that are not JSON.
    fn fetch(
        &self,
        url: &str,
    ) -> impl Future<Output = std::result::Result<Value, TransportError>> + Send;
}

impl<F: Fetch> Fetch for Arc<F> {
    fn fetch(
        &self,
        url: &str,
    ) -> impl Future<Output = std::result::Result<Value, TransportError>> + Send {
        self.as_ref().fetch(url)
    }
}

/// [`Fetch`] over a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self { http })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<Value, TransportError> {
        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Builds page URLs for an endpoint and fetches them one at a time
pub struct PageFetcher<F> {
    fetcher: F,
    base_url: String,
    page_size: usize,
}

impl<F: Fetch> PageFetcher<F> {
    pub fn new(fetcher: F, config: &ClientConfig) -> Self {
        Self {
            fetcher,
            base_url: config.base_url.clone(),
            page_size: config.page_size,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fetch page `page` (1-based) of a list endpoint, returning the body unchanged
    pub async fn fetch_page(&self, endpoint: &Endpoint, page: u32) -> Result<Value> {
        let url = endpoint.page_url(&self.base_url, self.page_size, page);
        debug!(url = %url, page, "Fetching page");
        Ok(self.fetcher.fetch(&url).await?)
    }

    /// Fetch a single-entity or unpaginated endpoint
    pub async fn fetch_one(&self, endpoint: &Endpoint) -> Result<Value> {
        let url = endpoint.url(&self.base_url);
        debug!(url = %url, "Fetching");
        Ok(self.fetcher.fetch(&url).await?)
    }
}
