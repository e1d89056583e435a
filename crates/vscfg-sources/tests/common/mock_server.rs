//! wiremock helpers for source testing

use std::time::Duration;
use vscfg_core::types::NetworkConfig;
use vscfg_sources::{HttpFetcher, Source, SourceResolver};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::constants::*;

/// Serve `body` with 200 at `/{resource}`
pub async fn mock_artifact(server: &MockServer, resource: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", resource)))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Serve `body` and require exactly `hits` requests before the server drops
pub async fn mock_artifact_expecting(server: &MockServer, resource: &str, body: &str, hits: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", resource)))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(hits)
        .mount(server)
        .await;
}

/// Answer `/{resource}` with the given status
pub async fn mock_status(server: &MockServer, resource: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", resource)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Answer `/{resource}` only after `delay`
pub async fn mock_stalled(server: &MockServer, resource: &str, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", resource)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(SETTINGS_BODY)
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

/// Redirect `/{from}` to `location`
pub async fn mock_redirect(server: &MockServer, from: &str, location: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", from)))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", location))
        .mount(server)
        .await;
}

/// A source rooted at the mock server
pub fn source_for(name: &str, server: &MockServer, timeout_ms: u64) -> Source {
    Source::new(name, &server.uri(), Duration::from_millis(timeout_ms)).unwrap()
}

/// Network settings used by the tests
pub fn test_network() -> NetworkConfig {
    NetworkConfig {
        user_agent: TEST_USER_AGENT.to_string(),
        max_redirects: 5,
    }
}

/// Build a resolver over the given sources with test network settings
pub fn resolver_over(sources: Vec<Source>) -> SourceResolver {
    let fetcher = HttpFetcher::new(&test_network()).unwrap();
    SourceResolver::new(sources, fetcher).unwrap()
}
