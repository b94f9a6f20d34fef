//! Error types exposed by the GitHub activity intake layer.

use thiserror::Error;

use super::rate_limit::RateLimitInfo;

/// Errors surfaced while parsing input, communicating with GitHub, or
/// decoding its responses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntakeError {
    /// The configuration did not include a pull request URL.
    #[error("pull request URL is required")]
    MissingPullRequestUrl,

    /// The provided URL could not be parsed.
    #[error("pull request URL is invalid: {0}")]
    InvalidUrl(String),

    /// The pull request path is incomplete.
    #[error("pull request URL must match /owner/repo/pull/<number>")]
    MissingPathSegments,

    /// The pull request number is not a valid integer.
    #[error("pull request number must be a positive integer")]
    InvalidPullRequestNumber,

    /// The authentication token was missing.
    #[error("personal access token is required")]
    MissingToken,

    /// GitHub answered with a status other than 200 OK.
    #[error("github API error: {status} {status_text}")]
    GitHubApi {
        /// Numeric HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status.
        status_text: String,
        /// Leading excerpt of the response body.
        body: String,
        /// Fully qualified URL that was requested.
        url: String,
        /// Rate limit headers, when the response carried them.
        rate_limit: Option<RateLimitInfo>,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A response body was not the JSON shape the endpoint promises.
    #[error("malformed response from {url}: {message}")]
    Decode {
        /// URL or path whose body failed to decode.
        url: String,
        /// Decoder error detail.
        message: String,
    },

    /// A response body exceeded the configured size cap.
    #[error("response from {url} exceeds {limit} bytes")]
    ResponseTooLarge {
        /// URL whose response was rejected.
        url: String,
        /// Maximum number of bytes accepted.
        limit: usize,
    },

    /// The caller cancelled the operation before it completed.
    #[error("operation cancelled")]
    Cancelled,

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// A failure annotated with the operation that was running.
    #[error("{operation}: {source}")]
    Operation {
        /// Short description of the operation, e.g. `fetching commits`.
        operation: &'static str,
        /// The underlying failure.
        source: Box<IntakeError>,
    },
}

impl IntakeError {
    /// Wraps this error with the name of the operation that produced it.
    #[must_use]
    pub fn during(self, operation: &'static str) -> Self {
        Self::Operation {
            operation,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, looking through operation wrappers.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Operation { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Returns true when the failure was caused by cancellation.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self.root_cause(), Self::Cancelled)
    }

    /// Returns true when GitHub rejected the request because the rate limit
    /// is exhausted.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.exhausted_rate_limit().is_some()
    }

    /// Returns the quota headers of a rate-limit rejection.
    ///
    /// `None` unless the root cause is a 403 or 429 whose quota is exhausted.
    #[must_use]
    pub fn exhausted_rate_limit(&self) -> Option<RateLimitInfo> {
        match self.root_cause() {
            Self::GitHubApi {
                status, rate_limit, ..
            } if matches!(*status, 403 | 429) => rate_limit.filter(RateLimitInfo::is_exhausted),
            _ => None,
        }
    }
}
