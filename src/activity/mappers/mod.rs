//! Per-endpoint mappers from GitHub payloads to [`Event`]s.
//!
//! Each mapper is a pure function of one source record. Write access is not
//! resolved here; callers consult the classifier for the records that carry
//! an author-association hint.

use chrono::{DateTime, Utc};

use super::actor::{app_owner_actor, resolve_actor};
use super::event::{Event, EventKind};
use super::text::{bounded_body, contains_question, non_empty};
use crate::github::models::{ApiCheckRun, ApiComment, ApiPullRequestCommit, ApiReview, ApiStatus};

fn timestamp_or_epoch(timestamp: Option<DateTime<Utc>>) -> DateTime<Utc> {
    timestamp.unwrap_or_default()
}

/// Sets the body and, for conversational text, the question flag.
///
/// Question detection sees only the truncated body.
fn with_text(mut event: Event, text: Option<&str>) -> Event {
    event.body = bounded_body(text);
    event.question = event.body.as_deref().map(contains_question);
    event
}

pub(crate) fn commit(record: &ApiPullRequestCommit) -> Event {
    let timestamp = record
        .commit
        .author
        .as_ref()
        .and_then(|signature| signature.date);
    let mut event = Event::new(
        EventKind::Commit,
        timestamp_or_epoch(timestamp),
        resolve_actor(record.author.as_ref()),
    );
    event.body = bounded_body(record.commit.message.as_deref());
    event
}

fn conversation(kind: EventKind, record: &ApiComment) -> Event {
    let event = Event::new(
        kind,
        timestamp_or_epoch(record.created_at),
        resolve_actor(record.user.as_ref()),
    );
    with_text(event, record.body.as_deref())
}

pub(crate) fn comment(record: &ApiComment) -> Event {
    conversation(EventKind::Comment, record)
}

pub(crate) fn review_comment(record: &ApiComment) -> Event {
    conversation(EventKind::ReviewComment, record)
}

/// Maps a review; reviews without a state are skipped.
pub(crate) fn review(record: &ApiReview) -> Option<Event> {
    if record.state.is_empty() {
        return None;
    }

    let mut event = with_text(
        Event::new(
            EventKind::Review,
            timestamp_or_epoch(record.submitted_at),
            resolve_actor(record.user.as_ref()),
        ),
        record.body.as_deref(),
    );
    event.outcome = Some(record.state.clone());
    Some(event)
}

pub(crate) fn status_check(record: &ApiStatus) -> Event {
    let mut event = Event::new(
        EventKind::StatusCheck,
        timestamp_or_epoch(record.created_at),
        resolve_actor(record.creator.as_ref()),
    );
    event.body = bounded_body(Some(&record.context));
    event.outcome = non_empty(Some(&record.state));
    event
}

/// Maps a check run, timed by completion when it has finished.
pub(crate) fn check_run(record: &ApiCheckRun) -> Event {
    let mut event = Event::new(
        EventKind::CheckRun,
        timestamp_or_epoch(record.completed_at.or(record.started_at)),
        app_owner_actor(record.app.as_ref()),
    );
    event.body = bounded_body(Some(&record.name));
    event.outcome = non_empty(record.conclusion.as_deref());
    event
}
