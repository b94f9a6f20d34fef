//! Reqwest implementation of [`GitHubGateway`].

use std::time::Instant;

use async_trait::async_trait;
use http::StatusCode;
use http::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::github::error::IntakeError;
use crate::github::locator::{PersonalAccessToken, PullRequestLocator};
use crate::github::rate_limit::RateLimitInfo;

use super::error_mapping::{extract_github_message, map_http_error, map_reqwest_error};
use super::http_utils::{
    MAX_ERROR_BODY_BYTES, MAX_RESPONSE_BYTES, next_page, read_body_excerpt, read_body_within,
};
use super::{ApiResponse, GitHubGateway};

const ACCEPT_VALUE: &str = "application/vnd.github.v3+json";
const API_VERSION_HEADER: &str = "x-github-api-version";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT_VALUE: &str = concat!("pr-activity/", env!("CARGO_PKG_VERSION"));

/// Gateway issuing bearer-authenticated requests through `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    client: reqwest::Client,
    api_base: Url,
    token: PersonalAccessToken,
}

impl ReqwestGateway {
    /// Creates a gateway for the given token and API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Network`] when the HTTP client cannot be
    /// constructed.
    pub fn new(token: &PersonalAccessToken, api_base: Url) -> Result<Self, IntakeError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
        headers.insert(API_VERSION_HEADER, HeaderValue::from_static(API_VERSION));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|error| IntakeError::Network {
                message: format!("build client failed: {error}"),
            })?;

        Ok(Self {
            client,
            api_base,
            token: token.clone(),
        })
    }

    /// Creates a gateway targeting the API host of the pull request.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Network`] when the HTTP client cannot be
    /// constructed.
    pub fn for_token(
        token: &PersonalAccessToken,
        locator: &PullRequestLocator,
    ) -> Result<Self, IntakeError> {
        Self::new(token, locator.api_base().clone())
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.api_base.as_str().trim_end_matches('/'))
    }

    async fn execute(&self, url: &str) -> Result<ApiResponse, IntakeError> {
        tracing::info!(method = "GET", url, "GitHub API request starting");
        let started = Instant::now();

        let result = self
            .client
            .get(url)
            .bearer_auth(self.token.value())
            .send()
            .await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let mut response = match result {
            Ok(response) => response,
            Err(error) => {
                tracing::error!(url, elapsed_ms, %error, "GitHub API request failed");
                return Err(map_reqwest_error(url, &error));
            }
        };

        let status = response.status();
        tracing::info!(url, %status, elapsed_ms, "GitHub API response received");

        if status != StatusCode::OK {
            let rate_limit = RateLimitInfo::from_headers(response.headers());
            let body = read_body_excerpt(&mut response, MAX_ERROR_BODY_BYTES).await;
            tracing::error!(
                url,
                %status,
                github_message = %extract_github_message(&body).unwrap_or_default(),
                rate_limit_remaining = rate_limit.map(|info| info.remaining()),
                "GitHub API error"
            );
            return Err(map_http_error(url, status, body, rate_limit));
        }

        let next = next_page(&response);
        let body = read_body_within(&mut response, url, MAX_RESPONSE_BYTES).await?;

        Ok(ApiResponse::new(url, body).with_next_page(next))
    }
}

#[async_trait]
impl GitHubGateway for ReqwestGateway {
    async fn get(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse, IntakeError> {
        if cancel.is_cancelled() {
            return Err(IntakeError::Cancelled);
        }

        let url = self.url_for(path);
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(IntakeError::Cancelled),
            result = self.execute(&url) => result,
        }
    }
}
