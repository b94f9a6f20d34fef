//! End-to-end tests for loading pull request activity over HTTP.

mod support;

use pr_activity::export::write_jsonl;
use pr_activity::{ActivityIntake, IntakeError};
use serde_json::{Value, json};
use support::{API_PREFIX, client_for, mount_empty_sources, mount_json};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn owner_and_outside_comments_get_distinct_write_access() {
    let server = MockServer::start().await;
    let (locator, gateway) = client_for(&server);

    mount_json(&server, "/pulls/7", json!({ "number": 7, "head": { "sha": "" } })).await;
    mount_json(
        &server,
        "/issues/7/comments",
        json!([
            {
                "user": { "login": "maintainer", "type": "User" },
                "created_at": "2024-03-01T09:00:00Z",
                "body": "Thanks, merging soon",
                "author_association": "OWNER"
            },
            {
                "user": { "login": "visitor", "type": "User" },
                "created_at": "2024-03-01T10:00:00Z",
                "body": "Is this released yet?",
                "author_association": "NONE"
            }
        ]),
    )
    .await;
    mount_empty_sources(&server, &["/issues/7/comments"]).await;

    Mock::given(method("GET"))
        .and(path(format!("{API_PREFIX}/collaborators/visitor/permission")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "permission": "read" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!(
            "{API_PREFIX}/collaborators/maintainer/permission"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "permission": "admin" })))
        .expect(0)
        .mount(&server)
        .await;

    let activity = ActivityIntake::new(&gateway)
        .load(&locator, &CancellationToken::new())
        .await
        .expect("load should succeed");

    let access: Vec<_> = activity
        .events
        .iter()
        .map(|event| (event.actor.as_str(), event.write_access))
        .collect();
    assert_eq!(
        access,
        vec![("maintainer", Some(true)), ("visitor", Some(false))]
    );
    assert_eq!(
        activity.events.get(1).and_then(|event| event.question),
        Some(true)
    );
}

#[tokio::test]
async fn commits_follow_link_headers_across_pages() {
    let server = MockServer::start().await;
    let (locator, gateway) = client_for(&server);
    let commits_path = format!("{API_PREFIX}/pulls/7/commits");

    mount_json(&server, "/pulls/7", json!({ "number": 7, "head": { "sha": "" } })).await;
    mount_empty_sources(&server, &["/pulls/7/commits"]).await;

    let next = format!("{}{commits_path}?page=2&per_page=100", server.uri());
    Mock::given(method("GET"))
        .and(path(commits_path.as_str()))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{
                    "author": { "login": "alice" },
                    "commit": { "author": { "date": "2024-03-01T09:00:00Z" }, "message": "first" }
                }]))
                .insert_header("Link", format!("<{next}>; rel=\"next\"")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(commits_path.as_str()))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "author": { "login": "bob" },
            "commit": { "author": { "date": "2024-03-01T10:00:00Z" }, "message": "second" }
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let activity = ActivityIntake::new(&gateway)
        .load(&locator, &CancellationToken::new())
        .await
        .expect("load should succeed");

    let bodies: Vec<_> = activity
        .events
        .iter()
        .filter_map(|event| event.body.as_deref())
        .collect();
    assert_eq!(bodies, vec!["first", "second"]);
}

#[tokio::test]
async fn checks_are_loaded_for_the_head_commit() {
    let server = MockServer::start().await;
    let (locator, gateway) = client_for(&server);

    mount_json(&server, "/pulls/7", json!({ "number": 7, "head": { "sha": "cafe" } })).await;
    mount_empty_sources(&server, &[]).await;
    mount_json(
        &server,
        "/statuses/cafe",
        json!([{ "context": "ci/build", "state": "success", "created_at": "2024-03-01T11:00:00Z" }]),
    )
    .await;
    mount_json(
        &server,
        "/commits/cafe/check-runs",
        json!({ "check_runs": [{
            "name": "clippy",
            "app": { "owner": { "login": "github", "type": "User" } },
            "started_at": "2024-03-01T11:30:00Z",
            "completed_at": "2024-03-01T12:00:00Z",
            "conclusion": "neutral"
        }] }),
    )
    .await;

    let activity = ActivityIntake::new(&gateway)
        .load(&locator, &CancellationToken::new())
        .await
        .expect("load should succeed");

    let mut output = Vec::new();
    write_jsonl(&mut output, &activity.events).expect("events should export");
    let lines: Vec<Value> = String::from_utf8(output)
        .expect("valid UTF-8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is JSON"))
        .collect();

    assert_eq!(
        lines,
        vec![
            json!({
                "kind": "status_check",
                "timestamp": "2024-03-01T11:00:00Z",
                "actor": "unknown",
                "bot": false,
                "body": "ci/build",
                "outcome": "success"
            }),
            json!({
                "kind": "check_run",
                "timestamp": "2024-03-01T12:00:00Z",
                "actor": "github",
                "bot": true,
                "body": "clippy",
                "outcome": "neutral"
            }),
        ]
    );
}

#[tokio::test]
async fn source_failure_aborts_the_load_with_context() {
    let server = MockServer::start().await;
    let (locator, gateway) = client_for(&server);

    mount_json(&server, "/pulls/7", json!({ "number": 7, "head": { "sha": "" } })).await;
    mount_empty_sources(&server, &["/pulls/7/reviews"]).await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PREFIX}/pulls/7/reviews")))
        .respond_with(ResponseTemplate::new(500).set_body_string("{\"message\":\"boom\"}"))
        .mount(&server)
        .await;

    let error = ActivityIntake::new(&gateway)
        .load(&locator, &CancellationToken::new())
        .await
        .expect_err("load should fail");

    assert_eq!(
        error.to_string(),
        "fetching reviews: github API error: 500 Internal Server Error"
    );
    assert!(matches!(
        error.root_cause(),
        IntakeError::GitHubApi { status: 500, .. }
    ));
}

#[tokio::test]
async fn missing_pull_request_is_reported() {
    let server = MockServer::start().await;
    let (locator, gateway) = client_for(&server);

    let error = ActivityIntake::new(&gateway)
        .load(&locator, &CancellationToken::new())
        .await
        .expect_err("unmatched request should fail");

    assert!(
        error.to_string().starts_with("fetching pull request: github API error: 404"),
        "got {error}"
    );
}
