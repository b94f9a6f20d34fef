//! JSONL (JSON Lines) formatter for activity events.
//!
//! Generates machine-readable output with one JSON object per line,
//! suitable for streaming into analysis pipelines.

use std::io::Write;

use serde::Serialize;

use crate::activity::Event;
use crate::github::{IntakeError, PullRequestDetails};

/// Kind tag of the pull request metadata line.
pub const PULL_REQUEST_KIND: &str = "pull_request";

#[derive(Serialize)]
struct PullRequestLine<'details> {
    kind: &'static str,
    #[serde(flatten)]
    details: &'details PullRequestDetails,
}

/// Writes the pull request metadata as one JSONL line tagged
/// `"kind": "pull_request"`.
///
/// The writer is not flushed; callers follow up with [`write_jsonl`].
///
/// # Errors
///
/// Returns [`IntakeError::Io`] if serialization or writing fails.
pub fn write_pull_request<W: Write>(
    writer: &mut W,
    details: &PullRequestDetails,
) -> Result<(), IntakeError> {
    write_line(
        writer,
        &PullRequestLine {
            kind: PULL_REQUEST_KIND,
            details,
        },
    )
}

/// Writes events in JSONL format to the given writer.
///
/// Each event is serialized as a single JSON object on its own line. Unset
/// optional fields are omitted from the output.
///
/// # Errors
///
/// Returns [`IntakeError::Io`] if writing to the output fails, or if
/// JSON serialization fails.
pub fn write_jsonl<W: Write>(writer: &mut W, events: &[Event]) -> Result<(), IntakeError> {
    for event in events {
        write_line(writer, event)?;
    }
    writer.flush().map_err(|e| io_error(&e))
}

fn write_line<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<(), IntakeError> {
    serde_json::to_writer(&mut *writer, value).map_err(|e| IntakeError::Io {
        message: format!("JSON serialization failed: {e}"),
    })?;
    writeln!(writer).map_err(|e| io_error(&e))
}

/// Converts an I/O error to an [`IntakeError::Io`].
fn io_error(error: &std::io::Error) -> IntakeError {
    IntakeError::Io {
        message: error.to_string(),
    }
}
