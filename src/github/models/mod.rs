//! Data models for the GitHub REST payloads the activity intake reads.
//!
//! Types prefixed with `Api` are internal deserialisation targets. Every field
//! the mappers may find missing is optional so that a sparse record decodes
//! and is then skipped or defaulted, rather than failing the whole page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pull request metadata loaded alongside the activity.
///
/// Unset optional fields are omitted when serialised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PullRequestDetails {
    /// Pull request number.
    pub number: u64,
    /// Title of the pull request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// State (e.g. open, closed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Author login if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// When the pull request was opened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the pull request was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// When the pull request was closed, merged or not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    /// Whether the pull request has been merged.
    pub merged: bool,
    /// When the pull request was merged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<DateTime<Utc>>,
    /// Login of the user who merged it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged_by: Option<String>,
    /// Whether the pull request is a draft.
    pub draft: bool,
    /// Mergeability; `None` while GitHub is still computing it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mergeable: Option<bool>,
    /// GitHub's mergeable state, such as `clean`, `dirty` or `blocked`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mergeable_state: Option<String>,
    /// Lines added.
    pub additions: u64,
    /// Lines removed.
    pub deletions: u64,
    /// Number of files changed.
    pub changed_files: u64,
    /// Label names.
    pub labels: Vec<String>,
    /// Logins of the current assignees.
    pub assignees: Vec<String>,
    /// Logins of reviewers whose review is still pending.
    pub requested_reviewers: Vec<String>,
    /// SHA of the head commit; empty when GitHub did not report one.
    pub head_sha: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct ApiUser {
    #[serde(default)]
    pub(crate) login: String,
    #[serde(rename = "type")]
    pub(crate) account_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPullRequest {
    pub(crate) number: u64,
    pub(crate) title: Option<String>,
    pub(crate) state: Option<String>,
    pub(crate) user: Option<ApiUser>,
    pub(crate) head: Option<ApiCommitRef>,
    pub(crate) created_at: Option<DateTime<Utc>>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
    pub(crate) closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(crate) merged: bool,
    pub(crate) merged_at: Option<DateTime<Utc>>,
    pub(crate) merged_by: Option<ApiUser>,
    #[serde(default)]
    pub(crate) draft: bool,
    pub(crate) mergeable: Option<bool>,
    pub(crate) mergeable_state: Option<String>,
    #[serde(default)]
    pub(crate) additions: u64,
    #[serde(default)]
    pub(crate) deletions: u64,
    #[serde(default)]
    pub(crate) changed_files: u64,
    #[serde(default)]
    pub(crate) labels: Vec<ApiLabel>,
    #[serde(default)]
    pub(crate) assignees: Vec<ApiUser>,
    #[serde(default)]
    pub(crate) requested_reviewers: Vec<ApiUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCommitRef {
    #[serde(default)]
    pub(crate) sha: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPullRequestCommit {
    pub(crate) author: Option<ApiUser>,
    #[serde(default)]
    pub(crate) commit: ApiCommitDetail,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiCommitDetail {
    pub(crate) author: Option<ApiGitSignature>,
    pub(crate) message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiGitSignature {
    pub(crate) date: Option<DateTime<Utc>>,
}

/// Issue comment or review-line comment; both carry the same fields.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiComment {
    pub(crate) user: Option<ApiUser>,
    pub(crate) created_at: Option<DateTime<Utc>>,
    pub(crate) body: Option<String>,
    pub(crate) author_association: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiReview {
    pub(crate) user: Option<ApiUser>,
    pub(crate) submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(crate) state: String,
    pub(crate) body: Option<String>,
    pub(crate) author_association: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiTimelineEvent {
    #[serde(default)]
    pub(crate) event: String,
    pub(crate) actor: Option<ApiUser>,
    pub(crate) created_at: Option<DateTime<Utc>>,
    pub(crate) author_association: Option<String>,
    pub(crate) assignee: Option<ApiUser>,
    pub(crate) label: Option<ApiLabel>,
    pub(crate) milestone: Option<ApiMilestone>,
    pub(crate) requested_reviewer: Option<ApiUser>,
    pub(crate) requested_team: Option<ApiTeam>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiLabel {
    #[serde(default)]
    pub(crate) name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiMilestone {
    #[serde(default)]
    pub(crate) title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiTeam {
    #[serde(default)]
    pub(crate) name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiStatus {
    #[serde(default)]
    pub(crate) context: String,
    pub(crate) creator: Option<ApiUser>,
    pub(crate) created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(crate) state: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCheckRun {
    #[serde(default)]
    pub(crate) name: String,
    pub(crate) app: Option<ApiApp>,
    pub(crate) started_at: Option<DateTime<Utc>>,
    pub(crate) completed_at: Option<DateTime<Utc>>,
    pub(crate) conclusion: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiApp {
    pub(crate) owner: Option<ApiUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCheckRuns {
    #[serde(default)]
    pub(crate) check_runs: Vec<ApiCheckRun>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPermission {
    #[serde(default)]
    pub(crate) permission: String,
}

fn logins(users: Vec<ApiUser>) -> Vec<String> {
    users
        .into_iter()
        .map(|user| user.login)
        .filter(|login| !login.is_empty())
        .collect()
}

impl From<ApiPullRequest> for PullRequestDetails {
    fn from(value: ApiPullRequest) -> Self {
        Self {
            number: value.number,
            title: value.title,
            state: value.state,
            author: value.user.map(|user| user.login),
            created_at: value.created_at,
            updated_at: value.updated_at,
            closed_at: value.closed_at,
            merged: value.merged,
            merged_at: value.merged_at,
            merged_by: value
                .merged_by
                .map(|user| user.login)
                .filter(|login| !login.is_empty()),
            draft: value.draft,
            mergeable: value.mergeable,
            mergeable_state: value.mergeable_state.filter(|state| !state.is_empty()),
            additions: value.additions,
            deletions: value.deletions,
            changed_files: value.changed_files,
            labels: value
                .labels
                .into_iter()
                .map(|label| label.name)
                .filter(|name| !name.is_empty())
                .collect(),
            assignees: logins(value.assignees),
            requested_reviewers: logins(value.requested_reviewers),
            head_sha: value.head.map(|head| head.sha).unwrap_or_default(),
        }
    }
}
