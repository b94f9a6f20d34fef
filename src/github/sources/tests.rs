//! Tests for the per-source fetchers against a mocked gateway.

use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use super::ActivitySources;
use crate::activity::EventKind;
use crate::github::error::IntakeError;
use crate::github::gateway::{ApiResponse, MockGitHubGateway};
use crate::github::locator::PullRequestLocator;

const REPO: &str = "/repos/octo/repo";

#[fixture]
fn locator() -> PullRequestLocator {
    PullRequestLocator::parse("https://github.com/octo/repo/pull/5").expect("locator parses")
}

fn respond(gateway: &mut MockGitHubGateway, expected_path: String, body: &Value) {
    let payload = body.to_string();
    gateway
        .expect_get()
        .withf(move |path, _| path == expected_path)
        .times(1)
        .returning(move |path, _| Ok(ApiResponse::new(path, payload.clone())));
}

fn respond_paged(
    gateway: &mut MockGitHubGateway,
    expected_path: String,
    body: &Value,
    next: Option<u32>,
) {
    let payload = body.to_string();
    gateway
        .expect_get()
        .withf(move |path, _| path == expected_path)
        .times(1)
        .returning(move |path, _| {
            Ok(ApiResponse::new(path, payload.clone()).with_next_page(next))
        });
}

#[rstest]
#[tokio::test]
async fn pull_request_reads_head_sha(locator: PullRequestLocator) {
    let mut gateway = MockGitHubGateway::new();
    respond(
        &mut gateway,
        format!("{REPO}/pulls/5"),
        &json!({ "number": 5, "state": "open", "head": { "sha": "abc123" } }),
    );
    let sources = ActivitySources::new(&gateway, &locator);

    let head = sources
        .pull_request(&CancellationToken::new())
        .await
        .expect("pull request should load");

    assert_eq!(head.number, 5);
    assert_eq!(head.head_sha, "abc123");
}

#[rstest]
#[tokio::test]
async fn commits_are_collected_across_pages(locator: PullRequestLocator) {
    let mut gateway = MockGitHubGateway::new();
    respond_paged(
        &mut gateway,
        format!("{REPO}/pulls/5/commits?page=1&per_page=100"),
        &json!([{ "author": { "login": "alice" }, "commit": { "message": "one" } }]),
        Some(2),
    );
    respond_paged(
        &mut gateway,
        format!("{REPO}/pulls/5/commits?page=2&per_page=100"),
        &json!([{ "author": null, "commit": { "message": "two" } }]),
        None,
    );
    let sources = ActivitySources::new(&gateway, &locator);

    let events = sources
        .commits(&CancellationToken::new())
        .await
        .expect("commits should load");

    let bodies: Vec<_> = events.iter().filter_map(|event| event.body.as_deref()).collect();
    assert_eq!(bodies, vec!["one", "two"]);
    assert_eq!(events.get(1).map(|event| event.actor.as_str()), Some("unknown"));
}

#[rstest]
#[tokio::test]
async fn fetch_failures_name_the_operation(locator: PullRequestLocator) {
    let mut gateway = MockGitHubGateway::new();
    gateway.expect_get().times(1).returning(|_, _| {
        Err(IntakeError::Network {
            message: "connection reset".to_owned(),
        })
    });
    let sources = ActivitySources::new(&gateway, &locator);

    let error = sources
        .reviews(&CancellationToken::new())
        .await
        .expect_err("review fetch should fail");

    assert_eq!(
        error.to_string(),
        "fetching reviews: network error talking to GitHub: connection reset"
    );
    assert!(matches!(error.root_cause(), IntakeError::Network { .. }));
}

#[rstest]
#[tokio::test]
async fn reviews_skip_empty_states_and_resolve_access(locator: PullRequestLocator) {
    let mut gateway = MockGitHubGateway::new();
    respond(
        &mut gateway,
        format!("{REPO}/pulls/5/reviews?page=1&per_page=100"),
        &json!([
            { "user": { "login": "alice" }, "state": "", "author_association": "NONE" },
            {
                "user": { "login": "bob" },
                "state": "CHANGES_REQUESTED",
                "body": "Can you add a test?",
                "submitted_at": "2024-03-01T10:00:00Z",
                "author_association": "MEMBER"
            }
        ]),
    );
    let sources = ActivitySources::new(&gateway, &locator);

    let events = sources
        .reviews(&CancellationToken::new())
        .await
        .expect("reviews should load");

    assert_eq!(events.len(), 1, "empty-state review must be skipped");
    let review = events.first().expect("one review");
    assert_eq!(review.kind, EventKind::Review);
    assert_eq!(review.outcome.as_deref(), Some("CHANGES_REQUESTED"));
    assert_eq!(review.question, Some(true));
    assert_eq!(review.write_access, Some(true));
}

#[rstest]
#[tokio::test]
async fn comments_without_user_have_no_access_value(locator: PullRequestLocator) {
    let mut gateway = MockGitHubGateway::new();
    respond(
        &mut gateway,
        format!("{REPO}/pulls/5/comments?page=1&per_page=100"),
        &json!([{ "user": null, "body": "orphaned", "author_association": "NONE" }]),
    );
    let sources = ActivitySources::new(&gateway, &locator);

    let events = sources
        .review_comments(&CancellationToken::new())
        .await
        .expect("review comments should load");

    let comment = events.first().expect("one review comment");
    assert_eq!(comment.kind, EventKind::ReviewComment);
    assert_eq!(comment.actor, "unknown");
    assert_eq!(comment.write_access, None);
}

#[rstest]
#[tokio::test]
async fn timeline_resolves_access_only_with_association(locator: PullRequestLocator) {
    let mut gateway = MockGitHubGateway::new();
    respond(
        &mut gateway,
        format!("{REPO}/issues/5/timeline?page=1&per_page=100"),
        &json!([
            {
                "event": "labeled",
                "actor": { "login": "alice" },
                "label": { "name": "bug" },
                "author_association": "CONTRIBUTOR"
            },
            { "event": "assigned", "actor": { "login": "alice" }, "assignee": null },
            { "event": "closed", "actor": { "login": "carol" } }
        ]),
    );
    respond(
        &mut gateway,
        format!("{REPO}/collaborators/alice/permission"),
        &json!({ "permission": "maintain" }),
    );
    let sources = ActivitySources::new(&gateway, &locator);

    let events = sources
        .timeline(&CancellationToken::new())
        .await
        .expect("timeline should load");

    let kinds: Vec<_> = events.iter().map(|event| event.kind.as_str()).collect();
    assert_eq!(kinds, vec!["labeled", "closed"]);
    assert_eq!(events.first().and_then(|event| event.write_access), Some(true));
    assert_eq!(events.get(1).and_then(|event| event.write_access), None);
}

#[rstest]
#[tokio::test]
async fn empty_sha_skips_status_and_check_requests(locator: PullRequestLocator) {
    let gateway = MockGitHubGateway::new();
    let sources = ActivitySources::new(&gateway, &locator);
    let cancel = CancellationToken::new();

    let statuses = sources
        .status_checks("", &cancel)
        .await
        .expect("empty SHA should not fail");
    let checks = sources
        .check_runs("", &cancel)
        .await
        .expect("empty SHA should not fail");

    assert!(statuses.is_empty());
    assert!(checks.is_empty());
}

#[rstest]
#[tokio::test]
async fn status_checks_use_a_single_bounded_page(locator: PullRequestLocator) {
    let mut gateway = MockGitHubGateway::new();
    respond(
        &mut gateway,
        format!("{REPO}/statuses/abc?per_page=100"),
        &json!([
            { "context": "ci/build", "state": "pending", "creator": { "login": "ci" } },
            { "context": "ci/build", "state": "success", "creator": { "login": "ci" } }
        ]),
    );
    let sources = ActivitySources::new(&gateway, &locator);

    let events = sources
        .status_checks("abc", &CancellationToken::new())
        .await
        .expect("statuses should load");

    let outcomes: Vec<_> = events
        .iter()
        .filter_map(|event| event.outcome.as_deref())
        .collect();
    assert_eq!(outcomes, vec!["pending", "success"]);
}

#[rstest]
#[tokio::test]
async fn check_runs_are_unwrapped_from_the_envelope(locator: PullRequestLocator) {
    let mut gateway = MockGitHubGateway::new();
    respond(
        &mut gateway,
        format!("{REPO}/commits/abc/check-runs?per_page=100"),
        &json!({
            "total_count": 1,
            "check_runs": [{
                "name": "clippy",
                "app": { "owner": { "login": "github", "type": "Organization" } },
                "started_at": "2024-03-01T10:00:00Z",
                "conclusion": "success"
            }]
        }),
    );
    let sources = ActivitySources::new(&gateway, &locator);

    let events = sources
        .check_runs("abc", &CancellationToken::new())
        .await
        .expect("check runs should load");

    let check = events.first().expect("one check run");
    assert_eq!(check.kind, EventKind::CheckRun);
    assert!(check.bot);
    assert_eq!(check.write_access, None);
}

#[rstest]
#[tokio::test]
async fn malformed_check_runs_fail_with_context(locator: PullRequestLocator) {
    let mut gateway = MockGitHubGateway::new();
    respond(
        &mut gateway,
        format!("{REPO}/commits/abc/check-runs?per_page=100"),
        &json!([]),
    );
    let sources = ActivitySources::new(&gateway, &locator);

    let error = sources
        .check_runs("abc", &CancellationToken::new())
        .await
        .expect_err("array body should not decode as envelope");

    assert!(
        matches!(
            &error,
            IntakeError::Operation { operation: "fetching check runs", source }
                if matches!(**source, IntakeError::Decode { .. })
        ),
        "got {error:?}"
    );
}
