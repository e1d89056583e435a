//! Source definitions and the priority-ordered resolver
//!
//! Sources are tried strictly in configured order. The first success wins
//! and the remaining sources are never contacted. A failing source is
//! logged and skipped. Only when every source has failed does the caller
//! see an error, carrying the last underlying failure.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;
use vscfg_core::types::{RuntimeConfig, SourceConfig};

use crate::error::FetchError;
use crate::fetcher::{ArtifactFetcher, HttpFetcher};

/// A named remote endpoint hosting configuration artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub base_url: Url,
    pub timeout: Duration,
}

impl Source {
    /// Create a source, validating the base URL
    pub fn new(
        name: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let name = name.into();
        let base_url = Url::parse(base_url).map_err(|e| FetchError::InvalidSource {
            name: name.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            name,
            base_url,
            timeout,
        })
    }

    /// Full URL of `resource` under this source
    ///
    /// Exactly one `/` separates the base URL from the resource path, so a
    /// base without a trailing slash keeps its last segment.
    pub fn resolve(&self, resource: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            resource.trim_start_matches('/')
        )
    }
}

impl TryFrom<&SourceConfig> for Source {
    type Error = FetchError;

    fn try_from(config: &SourceConfig) -> Result<Self, Self::Error> {
        Source::new(&config.name, &config.base_url, config.timeout())
    }
}

/// Priority-ordered source resolver
pub struct SourceResolver {
    sources: Vec<Source>,
    fetcher: HttpFetcher,
}

impl SourceResolver {
    /// Create a resolver over `sources` in the given order
    pub fn new(sources: Vec<Source>, fetcher: HttpFetcher) -> Result<Self, FetchError> {
        if sources.is_empty() {
            return Err(FetchError::NoSources);
        }
        Ok(Self { sources, fetcher })
    }

    /// Create a resolver from the runtime configuration
    pub fn from_config(config: &RuntimeConfig) -> Result<Self, FetchError> {
        let sources = config
            .sources
            .iter()
            .map(Source::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let fetcher = HttpFetcher::new(&config.network)?;
        Self::new(sources, fetcher)
    }

    /// Restrict the resolver to a single named source (no fallback)
    pub fn only(self, name: &str) -> Result<Self, FetchError> {
        let available = self.source_names().join(", ");
        let source = self
            .sources
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| FetchError::UnknownSource {
                name: name.to_string(),
                available,
            })?;

        debug!("Restricting fetches to source '{}'", source.name);
        Ok(Self {
            sources: vec![source],
            fetcher: self.fetcher,
        })
    }

    /// Sources in priority order
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Names of the sources in priority order
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name.as_str()).collect()
    }

    /// Fetch `resource`, trying each source in order
    ///
    /// Returns the content together with the name of the source that served it.
    pub async fn fetch_with_source(&self, resource: &str) -> Result<(String, &str), FetchError> {
        let mut last_error = None;

        for source in &self.sources {
            debug!("Fetching '{}' from source '{}'", resource, source.name);

            match self.fetcher.fetch(source, resource).await {
                Ok(content) => {
                    info!("Fetched '{}' from {}", resource, source.name);
                    return Ok((content, source.name.as_str()));
                }
                Err(e) => {
                    warn!("Source '{}' failed for '{}': {}", source.name, resource, e);
                    last_error = Some(e);
                }
            }
        }

        Err(FetchError::Exhausted {
            resource: resource.to_string(),
            attempted: self.sources.len(),
            last_error: Box::new(last_error.unwrap_or(FetchError::NoSources)),
        })
    }
}

#[async_trait]
impl ArtifactFetcher for SourceResolver {
    async fn fetch_artifact(&self, resource: &str) -> Result<String, FetchError> {
        self.fetch_with_source(resource)
            .await
            .map(|(content, _)| content)
    }
}
