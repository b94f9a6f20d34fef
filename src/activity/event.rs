//! The canonical activity event record.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::actor::Actor;

/// What kind of activity an [`Event`] records.
///
/// Timeline events keep GitHub's own discriminant (for example `labeled` or
/// `review_requested`), which is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A commit on the pull request branch.
    Commit,
    /// An issue comment on the pull request conversation.
    Comment,
    /// A submitted review.
    Review,
    /// A comment attached to a line of the diff.
    ReviewComment,
    /// A commit status reported against the head commit.
    StatusCheck,
    /// A check run reported against the head commit.
    CheckRun,
    /// A timeline entry, named by its discriminant tag.
    Timeline(String),
}

impl EventKind {
    /// Returns the wire name of the kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Commit => "commit",
            Self::Comment => "comment",
            Self::Review => "review",
            Self::ReviewComment => "review_comment",
            Self::StatusCheck => "status_check",
            Self::CheckRun => "check_run",
            Self::Timeline(tag) => tag,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl Serialize for EventKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One normalised piece of pull request activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
    /// Login of the acting user, or `unknown`.
    pub actor: String,
    /// Whether the actor is an automated identity.
    pub bot: bool,
    /// Assignee, label, milestone, or requested reviewer or team.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Bot classification of the target when the target is a user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_is_bot: Option<bool>,
    /// Truncated free text associated with the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Whether the body reads as a question.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<bool>,
    /// Review state, status state, or check conclusion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    /// Whether the actor had write access to the repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_access: Option<bool>,
}

impl Event {
    /// Creates an event with every optional field unset.
    #[must_use]
    pub fn new(kind: EventKind, timestamp: DateTime<Utc>, actor: Actor) -> Self {
        Self {
            kind,
            timestamp,
            actor: actor.login,
            bot: actor.bot,
            target: None,
            target_is_bot: None,
            body: None,
            question: None,
            outcome: None,
            write_access: None,
        }
    }
}
