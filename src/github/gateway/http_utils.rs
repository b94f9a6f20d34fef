//! Shared HTTP utilities for the reqwest gateway.

use http::header::{HeaderValue, LINK};
use reqwest::Response;

use crate::github::error::IntakeError;
use crate::github::pagination::next_page_from_link;

use super::error_mapping::map_reqwest_error;

/// Maximum accepted size of a successful response body.
pub(super) const MAX_RESPONSE_BYTES: usize = 10 * 1024 * 1024;

/// Maximum number of error body bytes kept for diagnostics.
pub(super) const MAX_ERROR_BODY_BYTES: usize = 1024;

pub(super) fn header_to_string(header_value: Option<&HeaderValue>) -> Option<String> {
    header_value
        .and_then(|raw| raw.to_str().ok())
        .map(ToOwned::to_owned)
}

/// Reads the advertised next page from the response's `Link` header.
pub(super) fn next_page(response: &Response) -> Option<u32> {
    header_to_string(response.headers().get(LINK)).and_then(|link| next_page_from_link(&link))
}

/// Reads the whole body, failing once it grows past `limit` bytes.
pub(super) async fn read_body_within(
    response: &mut Response,
    url: &str,
    limit: usize,
) -> Result<Vec<u8>, IntakeError> {
    let too_large = || IntakeError::ResponseTooLarge {
        url: url.to_owned(),
        limit,
    };

    if response
        .content_length()
        .is_some_and(|length| usize::try_from(length).map_or(true, |size| size > limit))
    {
        return Err(too_large());
    }

    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|error| map_reqwest_error(url, &error))?
    {
        if body.len().saturating_add(chunk.len()) > limit {
            return Err(too_large());
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Reads at most `limit` bytes of the body as lossy UTF-8, discarding the
/// rest and any transport failure.
pub(super) async fn read_body_excerpt(response: &mut Response, limit: usize) -> String {
    let mut excerpt = Vec::new();
    while excerpt.len() < limit {
        let Ok(Some(chunk)) = response.chunk().await else {
            break;
        };
        let room = limit.saturating_sub(excerpt.len());
        excerpt.extend(chunk.iter().take(room));
    }
    String::from_utf8_lossy(&excerpt).into_owned()
}
