//! Structured event export.
//!
//! Events are written as JSON Lines, one object per event, in the order the
//! caller supplies them. The activity intake already orders events by time.
//! The pull request's own metadata can lead the stream as a line tagged
//! `"kind": "pull_request"`.

mod jsonl;

pub use jsonl::{PULL_REQUEST_KIND, write_jsonl, write_pull_request};
