//! Artifact fetching
//!
//! `HttpFetcher` performs exactly one bounded request against one source.
//! Fallback between sources lives in `SourceResolver`.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::redirect::Policy;
use tracing::debug;
use vscfg_core::types::NetworkConfig;

use crate::error::FetchError;
use crate::source::Source;

/// Accept header sent with every artifact request
pub const ACCEPT_VALUE: &str = "application/json, text/plain, */*";

/// Anything that can produce the content of a named artifact
#[async_trait]
pub trait ArtifactFetcher: Send + Sync {
    /// Fetch `resource` (a path relative to the source base URL) as text
    async fn fetch_artifact(&self, resource: &str) -> Result<String, FetchError>;
}

/// Single-request HTTP fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with the configured user agent and redirect limit
    pub fn new(network: &NetworkConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(&network.user_agent)
            .redirect(Policy::limited(network.max_redirects))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// Fetch `resource` from `source`, bounded by the source's timeout
    ///
    /// Redirects are followed up to the configured hop limit. An empty body
    /// is returned as an empty string.
    pub async fn fetch(&self, source: &Source, resource: &str) -> Result<String, FetchError> {
        let url = source.resolve(resource);
        debug!("GET {} (timeout {}ms)", url, source.timeout.as_millis());

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, ACCEPT_VALUE)
            .timeout(source.timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&url, source.timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(&url, source.timeout, e))
    }
}
