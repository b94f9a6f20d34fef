//! Gateway for issuing authenticated GET requests to the GitHub REST API.
//!
//! The [`GitHubGateway`] trait is the single seam between the activity
//! fetchers and the network. [`ReqwestGateway`] implements it over HTTP; tests
//! substitute the generated `MockGitHubGateway`.

mod client;
mod error_mapping;
mod http_utils;

pub use client::ReqwestGateway;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::github::error::IntakeError;

/// A successful (200 OK) API response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiResponse {
    /// URL or path the body was fetched from, used in decode errors.
    pub url: String,
    /// Raw JSON body, bounded by the gateway's size cap.
    pub body: Vec<u8>,
    /// Page number advertised by the `Link: rel="next"` header, if any.
    pub next_page: Option<u32>,
}

impl ApiResponse {
    /// Creates a response for a single, final page.
    #[must_use]
    pub fn new(url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
            next_page: None,
        }
    }

    /// Sets the advertised next page.
    #[must_use]
    pub const fn with_next_page(mut self, next_page: Option<u32>) -> Self {
        self.next_page = next_page;
        self
    }

    /// Decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Decode`] when the body is not valid JSON for
    /// `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, IntakeError> {
        serde_json::from_slice(&self.body).map_err(|error| IntakeError::Decode {
            url: self.url.clone(),
            message: error.to_string(),
        })
    }
}

/// Transport that can fetch a GitHub API path.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitHubGateway: Send + Sync {
    /// Issues `GET {api_base}{path}`; `path` may carry a query string.
    ///
    /// Implementations must abort promptly once `cancel` fires, and must not
    /// start a request when it has already fired.
    async fn get(&self, path: &str, cancel: &CancellationToken)
    -> Result<ApiResponse, IntakeError>;
}
