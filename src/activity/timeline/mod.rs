//! Classification of polymorphic issue timeline records.
//!
//! GitHub's timeline endpoint returns one record shape for every lifecycle
//! occurrence, distinguished by the `event` tag. [`TimelineItem`] turns that
//! tag into a variant carrying only the fields the variant needs, and each
//! variant decides for itself whether it has enough data to become an event.

use super::actor::{is_bot, known_user, resolve_actor};
use super::event::{Event, EventKind};
use crate::github::models::{ApiTimelineEvent, ApiUser};

/// Body recorded for `mentioned` events.
pub const MENTIONED_NOTE: &str = "User was mentioned";

/// A timeline record classified by its discriminant tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TimelineItem<'record> {
    /// `assigned` or `unassigned`.
    Assignment {
        tag: &'record str,
        assignee: Option<&'record ApiUser>,
    },
    /// `labeled` or `unlabeled`.
    Labeling {
        tag: &'record str,
        label: &'record str,
    },
    /// `milestoned` or `demilestoned`.
    Milestoning {
        tag: &'record str,
        title: &'record str,
    },
    /// `review_requested` or `review_request_removed`.
    ReviewRequest {
        tag: &'record str,
        reviewer: Option<&'record ApiUser>,
        team: &'record str,
    },
    /// `mentioned`.
    Mention,
    /// Any other non-empty tag, passed through unchanged.
    Other { tag: &'record str },
}

/// The subject of a timeline event.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Target {
    name: String,
    is_bot: Option<bool>,
}

impl Target {
    fn user(user: &ApiUser) -> Self {
        Self {
            name: user.login.clone(),
            is_bot: Some(is_bot(user.account_type.as_deref())),
        }
    }

    fn named(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            is_bot: None,
        }
    }
}

impl<'record> TimelineItem<'record> {
    /// Classifies a record by tag; records without a tag yield `None`.
    pub(crate) fn classify(record: &'record ApiTimelineEvent) -> Option<Self> {
        let tag = record.event.as_str();
        let item = match tag {
            "" => return None,
            "assigned" | "unassigned" => Self::Assignment {
                tag,
                assignee: known_user(record.assignee.as_ref()),
            },
            "labeled" | "unlabeled" => Self::Labeling {
                tag,
                label: record.label.as_ref().map_or("", |label| label.name.as_str()),
            },
            "milestoned" | "demilestoned" => Self::Milestoning {
                tag,
                title: record
                    .milestone
                    .as_ref()
                    .map_or("", |milestone| milestone.title.as_str()),
            },
            "review_requested" | "review_request_removed" => Self::ReviewRequest {
                tag,
                reviewer: known_user(record.requested_reviewer.as_ref()),
                team: record
                    .requested_team
                    .as_ref()
                    .map_or("", |team| team.name.as_str()),
            },
            "mentioned" => Self::Mention,
            _ => Self::Other { tag },
        };
        Some(item)
    }

    /// The discriminant tag this item was classified from.
    pub(crate) const fn tag(&self) -> &'record str {
        match *self {
            Self::Assignment { tag, .. }
            | Self::Labeling { tag, .. }
            | Self::Milestoning { tag, .. }
            | Self::ReviewRequest { tag, .. }
            | Self::Other { tag } => tag,
            Self::Mention => "mentioned",
        }
    }

    /// Whether the variant carries the data it needs to become an event.
    pub(crate) const fn is_valid(&self) -> bool {
        match *self {
            Self::Assignment { assignee, .. } => assignee.is_some(),
            Self::Labeling { label, .. } => !label.is_empty(),
            Self::Milestoning { title, .. } => !title.is_empty(),
            Self::ReviewRequest { reviewer, team, .. } => reviewer.is_some() || !team.is_empty(),
            Self::Mention | Self::Other { .. } => true,
        }
    }

    fn target(&self) -> Option<Target> {
        match *self {
            Self::Assignment { assignee, .. } => assignee.map(Target::user),
            Self::Labeling { label, .. } => Some(Target::named(label)),
            Self::Milestoning { title, .. } => Some(Target::named(title)),
            Self::ReviewRequest { reviewer, team, .. } => reviewer
                .map(Target::user)
                .or_else(|| (!team.is_empty()).then(|| Target::named(team))),
            Self::Mention | Self::Other { .. } => None,
        }
    }
}

/// Maps a timeline record to an event, or `None` when the record is dropped.
///
/// Write access is left unset; see [`access_hint`].
pub(crate) fn timeline_event(record: &ApiTimelineEvent) -> Option<Event> {
    let Some(item) = TimelineItem::classify(record) else {
        tracing::trace!("dropping timeline record without an event tag");
        return None;
    };
    if !item.is_valid() {
        tracing::trace!(tag = item.tag(), "dropping incomplete timeline record");
        return None;
    }

    let mut event = Event::new(
        EventKind::Timeline(item.tag().to_owned()),
        record.created_at.unwrap_or_default(),
        resolve_actor(record.actor.as_ref()),
    );
    if let Some(target) = item.target() {
        event.target = Some(target.name);
        event.target_is_bot = target.is_bot;
    }
    if matches!(item, TimelineItem::Mention) {
        event.body = Some(MENTIONED_NOTE.to_owned());
    }
    Some(event)
}

/// Returns the actor login and association to classify, when the record has
/// both an actor and a non-empty association.
pub(crate) fn access_hint(record: &ApiTimelineEvent) -> Option<(&str, &str)> {
    let actor = known_user(record.actor.as_ref())?;
    let association = record
        .author_association
        .as_deref()
        .filter(|value| !value.is_empty())?;
    Some((actor.login.as_str(), association))
}
