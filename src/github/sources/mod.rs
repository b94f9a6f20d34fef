//! Per-source fetchers that page through one GitHub collection each and
//! return the mapped events in API order.

use tokio_util::sync::CancellationToken;

use super::error::IntakeError;
use super::gateway::GitHubGateway;
use super::locator::PullRequestLocator;
use super::models::{
    ApiCheckRuns, ApiComment, ApiPullRequest, ApiPullRequestCommit, ApiReview, ApiStatus,
    ApiTimelineEvent, PullRequestDetails,
};
use super::pagination::{MAX_PER_PAGE, paginate};
use crate::activity::{Event, WriteAccessClassifier, mappers, timeline};

/// Fetches the activity sources of a single pull request.
pub struct ActivitySources<'client, Gateway>
where
    Gateway: GitHubGateway + ?Sized,
{
    gateway: &'client Gateway,
    locator: &'client PullRequestLocator,
    access: WriteAccessClassifier<'client, Gateway>,
}

impl<'client, Gateway> ActivitySources<'client, Gateway>
where
    Gateway: GitHubGateway + ?Sized,
{
    /// Creates fetchers for the pull request the locator identifies.
    #[must_use]
    pub const fn new(gateway: &'client Gateway, locator: &'client PullRequestLocator) -> Self {
        Self {
            gateway,
            locator,
            access: WriteAccessClassifier::new(gateway, locator),
        }
    }

    /// Loads the pull request record for its head SHA.
    ///
    /// # Errors
    ///
    /// Returns the gateway or decode failure wrapped as `fetching pull request`.
    pub async fn pull_request(
        &self,
        cancel: &CancellationToken,
    ) -> Result<PullRequestDetails, IntakeError> {
        let path = self.locator.pull_request_path();
        let response = self
            .gateway
            .get(&path, cancel)
            .await
            .map_err(|error| error.during("fetching pull request"))?;
        let record: ApiPullRequest = response
            .decode()
            .map_err(|error| error.during("fetching pull request"))?;
        Ok(record.into())
    }

    /// Fetches every commit on the pull request.
    ///
    /// # Errors
    ///
    /// Returns the first fetch or decode failure wrapped as `fetching commits`.
    pub async fn commits(&self, cancel: &CancellationToken) -> Result<Vec<Event>, IntakeError> {
        self.log_start("commits");
        let mut events = Vec::new();
        paginate(
            self.gateway,
            &self.locator.commits_path(),
            cancel,
            async |record: ApiPullRequestCommit| {
                events.push(mappers::commit(&record));
                Ok(())
            },
        )
        .await
        .map_err(|error| error.during("fetching commits"))?;
        self.log_done("commits", events.len());
        Ok(events)
    }

    /// Fetches issue comments, classifying each author's write access.
    ///
    /// # Errors
    ///
    /// Returns the first fetch or decode failure, or cancellation, wrapped as
    /// `fetching comments`.
    pub async fn comments(&self, cancel: &CancellationToken) -> Result<Vec<Event>, IntakeError> {
        self.log_start("comments");
        let mut events = Vec::new();
        paginate(
            self.gateway,
            &self.locator.comments_path(),
            cancel,
            async |record: ApiComment| {
                let mut event = mappers::comment(&record);
                event.write_access = self.comment_access(&record, cancel).await?;
                events.push(event);
                Ok(())
            },
        )
        .await
        .map_err(|error| error.during("fetching comments"))?;
        self.log_done("comments", events.len());
        Ok(events)
    }

    /// Fetches submitted reviews, skipping those without a state.
    ///
    /// # Errors
    ///
    /// Returns the first fetch or decode failure, or cancellation, wrapped as
    /// `fetching reviews`.
    pub async fn reviews(&self, cancel: &CancellationToken) -> Result<Vec<Event>, IntakeError> {
        self.log_start("reviews");
        let mut events = Vec::new();
        paginate(
            self.gateway,
            &self.locator.reviews_path(),
            cancel,
            async |record: ApiReview| {
                let Some(mut event) = mappers::review(&record) else {
                    return Ok(());
                };
                event.write_access = self
                    .write_access(
                        record.user.as_ref().map(|user| user.login.as_str()),
                        record.author_association.as_deref(),
                        cancel,
                    )
                    .await?;
                events.push(event);
                Ok(())
            },
        )
        .await
        .map_err(|error| error.during("fetching reviews"))?;
        self.log_done("reviews", events.len());
        Ok(events)
    }

    /// Fetches line comments on the diff.
    ///
    /// # Errors
    ///
    /// Returns the first fetch or decode failure, or cancellation, wrapped as
    /// `fetching review comments`.
    pub async fn review_comments(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Event>, IntakeError> {
        self.log_start("review comments");
        let mut events = Vec::new();
        paginate(
            self.gateway,
            &self.locator.review_comments_path(),
            cancel,
            async |record: ApiComment| {
                let mut event = mappers::review_comment(&record);
                event.write_access = self.comment_access(&record, cancel).await?;
                events.push(event);
                Ok(())
            },
        )
        .await
        .map_err(|error| error.during("fetching review comments"))?;
        self.log_done("review comments", events.len());
        Ok(events)
    }

    /// Fetches issue timeline entries, dropping incomplete ones.
    ///
    /// # Errors
    ///
    /// Returns the first fetch or decode failure, or cancellation, wrapped as
    /// `fetching timeline events`.
    pub async fn timeline(&self, cancel: &CancellationToken) -> Result<Vec<Event>, IntakeError> {
        self.log_start("timeline events");
        let mut events = Vec::new();
        paginate(
            self.gateway,
            &self.locator.timeline_path(),
            cancel,
            async |record: ApiTimelineEvent| {
                let Some(mut event) = timeline::timeline_event(&record) else {
                    return Ok(());
                };
                if let Some((login, association)) = timeline::access_hint(&record) {
                    event.write_access = Some(
                        self.access
                            .has_write_access(login, association, cancel)
                            .await?,
                    );
                }
                events.push(event);
                Ok(())
            },
        )
        .await
        .map_err(|error| error.during("fetching timeline events"))?;
        self.log_done("timeline events", events.len());
        Ok(events)
    }

    /// Fetches commit statuses for `sha` as a single page.
    ///
    /// An empty SHA returns no events without a request.
    ///
    /// # Errors
    ///
    /// Returns the fetch or decode failure wrapped as `fetching status checks`.
    pub async fn status_checks(
        &self,
        sha: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Event>, IntakeError> {
        if sha.is_empty() {
            tracing::debug!("no head SHA; skipping status checks");
            return Ok(Vec::new());
        }
        tracing::debug!(sha, "fetching status checks");

        let path = format!(
            "{}?per_page={MAX_PER_PAGE}",
            self.locator.statuses_path(sha)
        );
        let statuses: Vec<ApiStatus> = self
            .gateway
            .get(&path, cancel)
            .await
            .and_then(|response| response.decode())
            .map_err(|error| error.during("fetching status checks"))?;

        let events: Vec<Event> = statuses.iter().map(mappers::status_check).collect();
        tracing::debug!(sha, count = events.len(), "fetched status checks");
        Ok(events)
    }

    /// Fetches check runs for `sha` as a single page.
    ///
    /// An empty SHA returns no events without a request.
    ///
    /// # Errors
    ///
    /// Returns the fetch or decode failure wrapped as `fetching check runs`.
    pub async fn check_runs(
        &self,
        sha: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Event>, IntakeError> {
        if sha.is_empty() {
            tracing::debug!("no head SHA; skipping check runs");
            return Ok(Vec::new());
        }
        tracing::debug!(sha, "fetching check runs");

        let path = format!(
            "{}?per_page={MAX_PER_PAGE}",
            self.locator.check_runs_path(sha)
        );
        let envelope: ApiCheckRuns = self
            .gateway
            .get(&path, cancel)
            .await
            .and_then(|response| response.decode())
            .map_err(|error| error.during("fetching check runs"))?;

        let events: Vec<Event> = envelope.check_runs.iter().map(mappers::check_run).collect();
        tracing::debug!(sha, count = events.len(), "fetched check runs");
        Ok(events)
    }

    async fn comment_access(
        &self,
        record: &ApiComment,
        cancel: &CancellationToken,
    ) -> Result<Option<bool>, IntakeError> {
        self.write_access(
            record.user.as_ref().map(|user| user.login.as_str()),
            record.author_association.as_deref(),
            cancel,
        )
        .await
    }

    /// Classifies an actor; records without an actor have no write access
    /// value.
    async fn write_access(
        &self,
        login: Option<&str>,
        association: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Option<bool>, IntakeError> {
        let Some(actor) = login.filter(|value| !value.is_empty()) else {
            return Ok(None);
        };
        self.access
            .has_write_access(actor, association.unwrap_or_default(), cancel)
            .await
            .map(Some)
    }

    fn log_start(&self, source: &str) {
        tracing::debug!(
            owner = self.locator.owner().as_str(),
            repo = self.locator.repository().as_str(),
            pr = self.locator.number().get(),
            "fetching {source}"
        );
    }

    fn log_done(&self, source: &str, count: usize) {
        tracing::debug!(
            owner = self.locator.owner().as_str(),
            repo = self.locator.repository().as_str(),
            pr = self.locator.number().get(),
            count,
            "fetched {source}"
        );
    }
}

#[cfg(test)]
mod tests;
