//! Link-header pagination for GitHub collection endpoints.
//!
//! GitHub advertises the next page of a collection through the `Link`
//! response header. [`paginate`] walks those pages one at a time, handing
//! every decoded item to a caller-supplied callback before the next page is
//! requested.

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::error::IntakeError;
use super::gateway::GitHubGateway;

/// Largest page size GitHub accepts for list endpoints.
pub const MAX_PER_PAGE: u8 = 100;

/// Builds the request path for one page of a collection.
pub(crate) fn page_path(path: &str, page: u32) -> String {
    format!("{path}?page={page}&per_page={MAX_PER_PAGE}")
}

/// Extracts the next page number from a `Link` header value.
///
/// The header is a comma separated list of `<url>; rel="..."` entries. The
/// `page` query parameter of the `rel="next"` entry is returned. A missing
/// entry, an unparsable URL, or `page=0` all mean there is no further page.
///
/// # Example
///
/// ```
/// use pr_activity::github::next_page_from_link;
///
/// let header = "<https://api.github.com/repositories/1/pulls?page=3>; rel=\"next\", \
///               <https://api.github.com/repositories/1/pulls?page=9>; rel=\"last\"";
/// assert_eq!(next_page_from_link(header), Some(3));
/// assert_eq!(next_page_from_link(""), None);
/// ```
#[must_use]
pub fn next_page_from_link(header: &str) -> Option<u32> {
    let target = header
        .split(',')
        .filter_map(|entry| entry.trim().split_once(';'))
        .find(|(_, params)| params.split(';').any(|param| param.trim() == "rel=\"next\""))
        .map(|(target, _)| target.trim().trim_start_matches('<').trim_end_matches('>'))?;

    let url = Url::parse(target).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse::<u32>().ok())
        .filter(|page| *page != 0)
}

/// Fetches every page of a JSON array endpoint, passing each item to
/// `process` in page order.
///
/// Pages are requested strictly one after another, starting at page 1 with
/// [`MAX_PER_PAGE`] items per page. A next link that does not point past the
/// current page ends the walk. The first error, whether from the
/// gateway, from decoding, or from `process`, stops the walk and is returned
/// unchanged. Returns the number of pages fetched.
///
/// # Errors
///
/// Returns [`IntakeError::Cancelled`] when `cancel` fires before a page is
/// requested, any error reported by the gateway, [`IntakeError::Decode`] when
/// a page is not a JSON array of `T`, or the first error returned by
/// `process`.
pub async fn paginate<Gateway, T, F>(
    gateway: &Gateway,
    path: &str,
    cancel: &CancellationToken,
    mut process: F,
) -> Result<u32, IntakeError>
where
    Gateway: GitHubGateway + ?Sized,
    T: DeserializeOwned,
    F: AsyncFnMut(T) -> Result<(), IntakeError>,
{
    let mut page = 1_u32;
    let mut fetched = 0_u32;

    loop {
        if cancel.is_cancelled() {
            return Err(IntakeError::Cancelled);
        }

        let response = gateway.get(&page_path(path, page), cancel).await?;
        fetched = fetched.saturating_add(1);

        let items: Vec<T> = response.decode()?;
        tracing::trace!(path, page, items = items.len(), "decoded page");

        for item in items {
            process(item).await?;
        }

        match response.next_page {
            Some(next) if next > page => page = next,
            Some(next) => {
                tracing::warn!(path, page, next, "next page does not advance; stopping");
                break;
            }
            None => break,
        }
    }

    Ok(fetched)
}
