//! Deletion state machine behavior against a mock API

use std::time::Duration;

use chrono::{TimeZone, Utc};
use scythe_core::{Outcome, ResourceKind, ResourceRef, RunConfig};
use scythe_reap::{ApiClient, delete_resource};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_config(server: &MockServer) -> RunConfig {
    let mut config = RunConfig::new(server.uri(), "test-token");
    config.poll.interval = Duration::from_millis(10);
    config.poll.deadline = Duration::from_millis(50);
    config
}

fn resource(kind: ResourceKind, path: &str) -> ResourceRef {
    ResourceRef {
        kind,
        path: path.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
        marked_for_deletion_on: None,
    }
}

fn marked_record(full_path: &str) -> serde_json::Value {
    serde_json::json!({
        "full_path": full_path,
        "created_at": "2024-01-02T00:00:00Z",
        "marked_for_deletion_on": "2024-02-01",
    })
}

#[tokio::test]
async fn two_phase_resource_ends_marked_for_deletion() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/projects/stale-project"))
        .respond_with(ResponseTemplate::new(202).set_body_string("{\"message\":\"202 Accepted\"}"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects/stale-project"))
        .respond_with(ResponseTemplate::new(200).set_body_json(marked_record("stale-project")))
        .mount(&server)
        .await;

    let config = fast_config(&server);
    let client = ApiClient::new(server.uri(), "test-token");
    let outcome = delete_resource(&client, &resource(ResourceKind::Project, "stale-project"), &config)
        .await
        .unwrap();

    assert!(matches!(outcome, Outcome::MarkedForDeletion(ref r) if r.path == "stale-project"));
}

#[tokio::test]
async fn repeating_the_delete_hits_the_idempotency_shortcut() {
    let server = MockServer::start().await;

    // Second run against an already soft-deleted resource: the remote
    // rejects the delete with an error status but names the state in the
    // body.
    Mock::given(method("DELETE"))
        .and(path("/groups/stale-group"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string("{\"message\":\"Group has been already marked for deletion\"}"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/groups/stale-group"))
        .respond_with(ResponseTemplate::new(200).set_body_json(marked_record("stale-group")))
        .mount(&server)
        .await;

    let config = fast_config(&server);
    let client = ApiClient::new(server.uri(), "test-token");
    let target = resource(ResourceKind::Group, "stale-group");

    // Same terminal tag on both invocations, never a false failure.
    for _ in 0..2 {
        let outcome = delete_resource(&client, &target, &config).await.unwrap();
        assert!(matches!(outcome, Outcome::MarkedForDeletion(_)));
    }
}

#[tokio::test]
async fn single_phase_resource_gone_is_permanently_deleted() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/users/stale-user"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/stale-user"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{\"message\":\"404 Not Found\"}"))
        .mount(&server)
        .await;

    let config = fast_config(&server);
    let client = ApiClient::new(server.uri(), "test-token");
    let outcome = delete_resource(&client, &resource(ResourceKind::User, "stale-user"), &config)
        .await
        .unwrap();

    assert!(matches!(outcome, Outcome::PermanentlyDeleted(_)));
}

#[tokio::test]
async fn single_phase_resource_still_present_times_out_as_failed() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/users/sticky-user"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    // Never converges: the user stays fetchable past the poll deadline.
    Mock::given(method("GET"))
        .and(path("/users/sticky-user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "web_url": "https://example.com/sticky-user",
            "created_at": "2024-01-02T00:00:00Z",
        })))
        .mount(&server)
        .await;

    let config = fast_config(&server);
    let client = ApiClient::new(server.uri(), "test-token");
    let outcome = delete_resource(&client, &resource(ResourceKind::User, "sticky-user"), &config)
        .await
        .unwrap();

    match outcome {
        Outcome::Failed(r, detail) => {
            assert_eq!(r.path, "sticky-user");
            assert_eq!(detail.status, Some(200));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_delete_fails_without_polling() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/projects/locked-project"))
        .respond_with(ResponseTemplate::new(500).set_body_string("{\"message\":\"500 Internal Server Error\"}"))
        .mount(&server)
        .await;
    // No convergence probe may be issued for a rejected delete.
    Mock::given(method("GET"))
        .and(path("/projects/locked-project"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = fast_config(&server);
    let client = ApiClient::new(server.uri(), "test-token");
    let outcome = delete_resource(&client, &resource(ResourceKind::Project, "locked-project"), &config)
        .await
        .unwrap();

    match outcome {
        Outcome::Failed(_, detail) => {
            assert_eq!(detail.status, Some(500));
            assert!(detail.body.contains("Internal Server Error"));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn stale_fetch_404_on_delete_is_reported_as_failed() {
    let server = MockServer::start().await;

    // The resource vanished between discovery and the delete call. The 404
    // body does not carry the idempotency phrase, so this is a failure by
    // policy, not a success.
    Mock::given(method("DELETE"))
        .and(path("/projects/vanished"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{\"message\":\"404 Project Not Found\"}"))
        .mount(&server)
        .await;

    let config = fast_config(&server);
    let client = ApiClient::new(server.uri(), "test-token");
    let outcome = delete_resource(&client, &resource(ResourceKind::Project, "vanished"), &config)
        .await
        .unwrap();

    match outcome {
        Outcome::Failed(_, detail) => assert_eq!(detail.status, Some(404)),
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn hard_delete_targets_the_refreshed_path() {
    let server = MockServer::start().await;

    // Soft delete against the discovered path.
    Mock::given(method("DELETE"))
        .and(path("/projects/legacy-project"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;
    // Re-GET shows the soft delete renamed the project.
    Mock::given(method("GET"))
        .and(path("/projects/legacy-project"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(marked_record("legacy-project-deleted-42")),
        )
        .mount(&server)
        .await;
    // The permanent delete must hit the renamed path with the marker.
    Mock::given(method("DELETE"))
        .and(path("/projects/legacy-project-deleted-42"))
        .and(query_param("permanently_remove", "true"))
        .and(query_param("full_path", "legacy-project-deleted-42"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects/legacy-project-deleted-42"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut config = fast_config(&server);
    config.permanently_delete = true;
    let client = ApiClient::new(server.uri(), "test-token");
    let outcome = delete_resource(&client, &resource(ResourceKind::Project, "legacy-project"), &config)
        .await
        .unwrap();

    assert!(
        matches!(outcome, Outcome::PermanentlyDeleted(ref r) if r.path == "legacy-project-deleted-42")
    );
}

#[tokio::test]
async fn failed_refetch_before_hard_delete_is_failed() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/groups/flaky-group"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/groups/flaky-group"))
        .respond_with(ResponseTemplate::new(503).set_body_string("{\"message\":\"503 Service Unavailable\"}"))
        .mount(&server)
        .await;

    let mut config = fast_config(&server);
    config.permanently_delete = true;
    let client = ApiClient::new(server.uri(), "test-token");
    let outcome = delete_resource(&client, &resource(ResourceKind::Group, "flaky-group"), &config)
        .await
        .unwrap();

    match outcome {
        Outcome::Failed(_, detail) => assert_eq!(detail.status, Some(503)),
        other => panic!("expected Failed, got {other:?}"),
    }
}
