//! High-level activity intake facade used by the CLI.

use tokio_util::sync::CancellationToken;

use super::error::IntakeError;
use super::gateway::GitHubGateway;
use super::locator::PullRequestLocator;
use super::models::PullRequestDetails;
use super::sources::ActivitySources;
use crate::activity::Event;

/// Everything loaded for one pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestActivity {
    /// The pull request record the events belong to.
    pub pull_request: PullRequestDetails,
    /// All events, ordered by timestamp.
    pub events: Vec<Event>,
}

/// Aggregates every activity source of a pull request using a gateway.
pub struct ActivityIntake<'client, Gateway>
where
    Gateway: GitHubGateway + ?Sized,
{
    client: &'client Gateway,
    include_checks: bool,
}

impl<'client, Gateway> ActivityIntake<'client, Gateway>
where
    Gateway: GitHubGateway + ?Sized,
{
    /// Create a new intake facade using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self {
            client,
            include_checks: true,
        }
    }

    /// Leave commit statuses and check runs out of the load.
    #[must_use]
    pub const fn without_checks(mut self) -> Self {
        self.include_checks = false;
        self
    }

    /// Load the pull request and all of its activity.
    ///
    /// Sources are fetched concurrently. Events with equal timestamps keep
    /// source order: commits, comments, reviews, review comments, timeline,
    /// statuses, then check runs.
    ///
    /// # Errors
    ///
    /// Returns the first source failure, wrapped with the name of the fetch
    /// that produced it. No partial result is returned.
    pub async fn load(
        &self,
        locator: &PullRequestLocator,
        cancel: &CancellationToken,
    ) -> Result<PullRequestActivity, IntakeError> {
        let sources = ActivitySources::new(self.client, locator);
        let pull_request = sources.pull_request(cancel).await?;
        let sha = if self.include_checks {
            pull_request.head_sha.as_str()
        } else {
            ""
        };

        let (commits, comments, reviews, review_comments, timeline, statuses, checks) =
            tokio::try_join!(
                sources.commits(cancel),
                sources.comments(cancel),
                sources.reviews(cancel),
                sources.review_comments(cancel),
                sources.timeline(cancel),
                sources.status_checks(sha, cancel),
                sources.check_runs(sha, cancel),
            )?;

        let mut events: Vec<Event> = [
            commits,
            comments,
            reviews,
            review_comments,
            timeline,
            statuses,
            checks,
        ]
        .into_iter()
        .flatten()
        .collect();
        events.sort_by_key(|event| event.timestamp);

        tracing::info!(
            owner = locator.owner().as_str(),
            repo = locator.repository().as_str(),
            pr = locator.number().get(),
            events = events.len(),
            "loaded pull request activity"
        );

        Ok(PullRequestActivity {
            pull_request,
            events,
        })
    }
}
