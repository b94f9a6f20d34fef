//! Normalisation of pull request activity into one event shape.
//!
//! Every GitHub source (commits, comments, reviews, review comments, timeline
//! entries, commit statuses, and check runs) has its own payload. The mappers
//! here turn each record into zero or one [`Event`], sharing actor
//! resolution, text truncation, question detection, and write-access
//! classification.

mod access;
mod actor;
mod event;
pub(crate) mod mappers;
mod text;
pub(crate) mod timeline;

pub use access::{AssociationDecision, Permission, WriteAccessClassifier, decide_from_association};
pub use actor::{Actor, UNKNOWN_ACTOR, is_bot};
pub use event::{Event, EventKind};
pub use text::{MAX_BODY_CHARS, contains_question, truncate};
pub use timeline::MENTIONED_NOTE;
