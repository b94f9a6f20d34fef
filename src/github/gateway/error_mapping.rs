//! Error mapping helpers for the reqwest GitHub gateway.

use http::StatusCode;

use crate::github::error::IntakeError;
use crate::github::rate_limit::RateLimitInfo;

/// Maps a reqwest failure onto [`IntakeError::Network`].
pub(super) fn map_reqwest_error(url: &str, error: &reqwest::Error) -> IntakeError {
    let detail = if error.is_timeout() {
        "request timed out"
    } else if error.is_connect() {
        "connection failed"
    } else if error.is_body() || error.is_decode() {
        "reading response body failed"
    } else {
        "request failed"
    };

    IntakeError::Network {
        message: format!("GET {url}: {detail}: {error}"),
    }
}

/// Builds the structured error for a non-200 response.
pub(super) fn map_http_error(
    url: &str,
    status: StatusCode,
    body: String,
    rate_limit: Option<RateLimitInfo>,
) -> IntakeError {
    IntakeError::GitHubApi {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or("Unknown").to_owned(),
        body,
        url: url.to_owned(),
        rate_limit,
    }
}

/// Extracts GitHub's `message` field from a JSON error body.
pub(super) fn extract_github_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}
