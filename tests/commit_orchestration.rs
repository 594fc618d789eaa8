//! Integration tests for the multi-file commit sequence.
//!
//! The five-step staging sequence is exercised against a scripted HTTP
//! server so the consistency guarantees can be observed at the wire level:
//! which calls were made, with which bodies, and which calls were never
//! made.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hubcap::config::Config;
use hubcap::github::{FileChange, GitHubClient, GitHubError, RepoRef};

fn client_for(server: &MockServer) -> GitHubClient {
    GitHubClient::new(&Config {
        token: Some("test-token".to_string()),
        api_base: server.uri(),
    })
}

fn repo() -> RepoRef {
    RepoRef::parse("octo/widgets").unwrap()
}

fn changes() -> Vec<FileChange> {
    vec![
        FileChange {
            path: "a.md".to_string(),
            content: "A".to_string(),
        },
        FileChange {
            path: "b.md".to_string(),
            content: "B".to_string(),
        },
    ]
}

/// Mount the happy-path mocks for steps 1 and 2: branch head c1, tree t1.
async fn mount_head_resolution(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/branches/main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "main",
            "commit": {"sha": "c1"}
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/git/commits/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sha": "c1",
            "tree": {"sha": "t1"}
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn two_file_commit_runs_the_five_step_sequence() {
    let server = MockServer::start().await;
    mount_head_resolution(&server).await;

    // Step 3: the tree request must be a delta on t1 carrying both paths
    // as regular-file blobs.
    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/git/trees"))
        .and(body_partial_json(json!({
            "base_tree": "t1",
            "tree": [
                {"path": "a.md", "mode": "100644", "type": "blob", "content": "A"},
                {"path": "b.md", "mode": "100644", "type": "blob", "content": "B"}
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"sha": "t2"})))
        .expect(1)
        .mount(&server)
        .await;

    // Step 4: the commit must be parented on exactly the head from step 1.
    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/git/commits"))
        .and(body_partial_json(json!({
            "message": "M",
            "tree": "t2",
            "parents": ["c1"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "sha": "c2",
            "tree": {"sha": "t2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Step 5: fast-forward only.
    Mock::given(method("PATCH"))
        .and(path("/repos/octo/widgets/git/refs/heads/main"))
        .and(body_partial_json(json!({"sha": "c2", "force": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ref": "refs/heads/main",
            "object": {"sha": "c2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .commit_files(&repo(), "main", &changes(), "M")
        .await
        .unwrap();

    // The new commit's parent is the head observed at the start.
    assert_eq!(outcome.commit_sha, "c2");
    assert_eq!(outcome.parent_sha, "c1");
    assert_eq!(outcome.tree_sha, "t2");
}

#[tokio::test]
async fn branch_not_found_aborts_before_any_write() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/branches/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Branch not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    // No write endpoint may be touched.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .commit_files(&repo(), "missing", &changes(), "M")
        .await
        .unwrap_err();

    assert!(matches!(err, GitHubError::Api { status: 404, .. }));
}

#[tokio::test]
async fn tree_failure_leaves_the_branch_untouched() {
    let server = MockServer::start().await;
    mount_head_resolution(&server).await;

    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/git/trees"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"message": "Invalid tree entry"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    // Neither the commit creation nor the ref update may run.
    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/git/commits"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .commit_files(&repo(), "main", &changes(), "M")
        .await
        .unwrap_err();

    assert!(matches!(err, GitHubError::Api { status: 422, .. }));
}

#[tokio::test]
async fn commit_failure_leaves_the_branch_untouched() {
    let server = MockServer::start().await;
    mount_head_resolution(&server).await;

    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/git/trees"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"sha": "t2"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/git/commits"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "Server error"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .commit_files(&repo(), "main", &changes(), "M")
        .await
        .unwrap_err();

    assert!(matches!(err, GitHubError::Api { status: 500, .. }));
}

#[tokio::test]
async fn lost_race_is_surfaced_and_never_retried() {
    let server = MockServer::start().await;
    mount_head_resolution(&server).await;

    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/git/trees"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"sha": "t2"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/git/commits"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "sha": "c2",
            "tree": {"sha": "t2"}
        })))
        .mount(&server)
        .await;

    // The branch moved to someone else's commit; the update is rejected.
    // expect(1) proves no client-side retry happens.
    Mock::given(method("PATCH"))
        .and(path("/repos/octo/widgets/git/refs/heads/main"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Update is not a fast forward"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .commit_files(&repo(), "main", &changes(), "M")
        .await
        .unwrap_err();

    match err {
        GitHubError::RaceLost { branch, message } => {
            assert_eq!(branch, "main");
            assert!(message.contains("fast forward"));
        }
        other => panic!("expected RaceLost, got {:?}", other),
    }
}

#[tokio::test]
async fn ref_update_conflict_status_also_maps_to_race() {
    let server = MockServer::start().await;
    mount_head_resolution(&server).await;

    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/git/trees"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"sha": "t2"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/git/commits"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "sha": "c2",
            "tree": {"sha": "t2"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/repos/octo/widgets/git/refs/heads/main"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"message": "Conflict"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .commit_files(&repo(), "main", &changes(), "M")
        .await
        .unwrap_err();
    assert!(matches!(err, GitHubError::RaceLost { .. }));
}

#[tokio::test]
async fn ref_update_permission_failure_stays_a_plain_api_error() {
    let server = MockServer::start().await;
    mount_head_resolution(&server).await;

    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/git/trees"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"sha": "t2"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/git/commits"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "sha": "c2",
            "tree": {"sha": "t2"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/repos/octo/widgets/git/refs/heads/main"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"message": "Must have push access"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .commit_files(&repo(), "main", &changes(), "M")
        .await
        .unwrap_err();
    assert!(matches!(err, GitHubError::Api { status: 403, .. }));
}

#[tokio::test]
async fn single_file_put_sends_base64_and_optional_sha() {
    let server = MockServer::start().await;

    // "hello" in base64 is aGVsbG8=
    Mock::given(method("PUT"))
        .and(path("/repos/octo/widgets/contents/docs/note.md"))
        .and(body_partial_json(json!({
            "message": "Add note",
            "branch": "main",
            "content": "aGVsbG8="
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "content": {"path": "docs/note.md", "html_url": "https://example.test/note"},
            "commit": {"sha": "abc1234def"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .put_file(
            &repo(),
            "docs/note.md",
            &hubcap::github::PutFileRequest {
                message: "Add note".to_string(),
                content: "hello".to_string(),
                branch: "main".to_string(),
                sha: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(result.commit.sha, "abc1234def");

    // Updating an existing file forwards the prior blob sha so the remote
    // can reject writes over a concurrent edit.
    Mock::given(method("PUT"))
        .and(path("/repos/octo/widgets/contents/docs/update.md"))
        .and(body_partial_json(json!({"sha": "oldsha123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": {"path": "docs/update.md"},
            "commit": {"sha": "newsha456"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .put_file(
            &repo(),
            "docs/update.md",
            &hubcap::github::PutFileRequest {
                message: "Update".to_string(),
                content: "hello".to_string(),
                branch: "main".to_string(),
                sha: Some("oldsha123".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(result.commit.sha, "newsha456");
}
