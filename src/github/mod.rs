//! GitHub pull request activity intake.
//!
//! This module parses pull request URLs, talks to the GitHub REST API through
//! the [`GitHubGateway`] seam, walks `Link`-paginated collections, and fetches
//! each activity source of a pull request. Errors are mapped into
//! [`IntakeError`] variants so callers can report precise failures without
//! depending on HTTP client internals.

pub mod error;
pub mod gateway;
pub mod intake;
pub mod locator;
pub mod models;
pub mod pagination;
pub mod rate_limit;
pub mod sources;

pub use error::IntakeError;
pub use gateway::{ApiResponse, GitHubGateway, ReqwestGateway};
pub use intake::{ActivityIntake, PullRequestActivity};
pub use locator::{
    PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositoryName, RepositoryOwner,
};
pub use models::PullRequestDetails;
pub use pagination::{MAX_PER_PAGE, next_page_from_link, paginate};
pub use rate_limit::RateLimitInfo;
pub use sources::ActivitySources;

#[cfg(test)]
pub use gateway::MockGitHubGateway;
