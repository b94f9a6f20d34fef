//! Shared helpers for running the intake against a mock GitHub server.

use pr_activity::{PersonalAccessToken, PullRequestLocator, ReqwestGateway};
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// API prefix the locator derives for non-github.com hosts.
pub const API_PREFIX: &str = "/api/v3/repos/octo/repo";

/// Builds a locator and gateway pointed at the mock server.
///
/// # Panics
///
/// Panics if the mock server URL does not yield a valid locator.
pub fn client_for(server: &MockServer) -> (PullRequestLocator, ReqwestGateway) {
    let locator = PullRequestLocator::parse(&format!("{}/octo/repo/pull/7", server.uri()))
        .unwrap_or_else(|error| panic!("mock server URL should parse: {error}"));
    let token = PersonalAccessToken::new("test-token")
        .unwrap_or_else(|error| panic!("token should be valid: {error}"));
    let gateway = ReqwestGateway::for_token(&token, &locator)
        .unwrap_or_else(|error| panic!("gateway should build: {error}"));
    (locator, gateway)
}

/// Serves `body` as JSON for `GET {API_PREFIX}{suffix}`.
pub async fn mount_json(server: &MockServer, suffix: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("{API_PREFIX}{suffix}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serves an empty array for every paginated source of pull request 7
/// except those listed in `except`.
pub async fn mount_empty_sources(server: &MockServer, except: &[&str]) {
    for suffix in [
        "/pulls/7/commits",
        "/issues/7/comments",
        "/pulls/7/reviews",
        "/pulls/7/comments",
        "/issues/7/timeline",
    ] {
        if !except.contains(&suffix) {
            mount_json(server, suffix, Value::Array(Vec::new())).await;
        }
    }
}
