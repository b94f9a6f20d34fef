//! Free-text helpers applied to event bodies.

/// Maximum number of characters kept in an event body.
pub const MAX_BODY_CHARS: usize = 256;

/// Shortens `text` to at most `max_chars` Unicode scalar values.
///
/// Text already within the bound is returned unchanged and no ellipsis is
/// appended, so truncating twice gives the same result as truncating once.
///
/// # Example
///
/// ```
/// use pr_activity::activity::truncate;
///
/// assert_eq!(truncate("héllo wörld", 5), "héllo");
/// assert_eq!(truncate("short", 256), "short");
/// ```
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .and_then(|(boundary, _)| text.get(..boundary))
        .unwrap_or(text)
}

/// Returns true when `text` contains a question mark, ASCII or full-width.
#[must_use]
pub fn contains_question(text: &str) -> bool {
    text.contains(['?', '？'])
}

/// Bounds an optional body for an event, treating empty text as absent.
pub(crate) fn bounded_body(text: Option<&str>) -> Option<String> {
    text.filter(|body| !body.is_empty())
        .map(|body| truncate(body, MAX_BODY_CHARS).to_owned())
}

/// Keeps a non-empty string, mapping empty to `None`.
pub(crate) fn non_empty(text: Option<&str>) -> Option<String> {
    text.filter(|value| !value.is_empty()).map(ToOwned::to_owned)
}
