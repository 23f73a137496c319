#![allow(clippy::unwrap_used)]
// Apply/remove against a mocked CVP, checking what gets staged and committed.

use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use cvpctl_core::{CommitOutcome, Controller, ControllerConfig, CoreError, DeviceTarget};

const DEVICE_KEY: &str = "00:1c:73:00:00:02";

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Controller) {
    let server = MockServer::start().await;
    let config = ControllerConfig::new(Url::parse(&server.uri()).unwrap());
    let controller = Controller::new(config).unwrap();
    (server, controller)
}

fn target() -> DeviceTarget {
    DeviceTarget::new("10.0.0.2", "leaf1.lab", DEVICE_KEY)
}

async fn mount_device_configlets(server: &MockServer, configlets: Value) {
    Mock::given(method("GET"))
        .and(path("/web/provisioning/getConfigletsByNetElementId.do"))
        .and(query_param("netElementId", DEVICE_KEY))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "configletList": configlets })),
        )
        .mount(server)
        .await;
}

async fn mount_configlet(server: &MockServer, name: &str, key: &str) {
    Mock::given(method("GET"))
        .and(path("/web/configlet/getConfigletByName.do"))
        .and(query_param("name", name))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": name,
            "key": key,
            "config": format!("! {name}")
        })))
        .mount(server)
        .await;
}

async fn mount_stage(server: &MockServer, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/web/provisioning/addTempAction.do"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "success" })))
        .expect(expected)
        .mount(server)
        .await;
}

async fn mount_save(server: &MockServer, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/web/provisioning/v2/saveTopology.do"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "success" })))
        .expect(expected)
        .mount(server)
        .await;
}

/// The single action posted to `addTempAction.do`.
async fn staged_action(server: &MockServer) -> Value {
    let requests: Vec<Request> = server.received_requests().await.unwrap();
    let staged = requests
        .iter()
        .find(|r| r.url.path() == "/web/provisioning/addTempAction.do")
        .expect("no staging request");
    let body: Value = serde_json::from_slice(&staged.body).unwrap();
    body["data"][0].clone()
}

// ── Apply ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_apply_keeps_current_and_appends_requested() {
    let (server, controller) = setup().await;

    mount_device_configlets(
        &server,
        json!([{ "name": "A", "key": "1" }, { "name": "B", "key": "2" }]),
    )
    .await;
    mount_configlet(&server, "B", "2").await;
    mount_configlet(&server, "C", "3").await;
    mount_stage(&server, 1).await;
    mount_save(&server, 0).await;

    let outcome = controller
        .apply_configlets_to_device(&target(), &["B", "C"], false)
        .await
        .unwrap();

    assert_eq!(outcome, CommitOutcome::Staged);
    let action = staged_action(&server).await;
    assert_eq!(action["configletList"], json!(["1", "2", "3"]));
    assert_eq!(action["configletNamesList"], json!(["A", "B", "C"]));
    assert_eq!(action["ignoreConfigletList"], json!([]));
    assert_eq!(action["action"], "associate");
    assert_eq!(action["toId"], DEVICE_KEY);
}

#[tokio::test]
async fn test_apply_with_save_commits() {
    let (server, controller) = setup().await;

    mount_device_configlets(&server, json!([])).await;
    mount_configlet(&server, "A", "1").await;
    mount_stage(&server, 1).await;
    mount_save(&server, 1).await;

    let outcome = controller
        .apply_configlets_to_device(&target(), &["A"], true)
        .await
        .unwrap();

    assert_eq!(outcome, CommitOutcome::Committed);
}

#[tokio::test]
async fn test_apply_already_assigned_is_unchanged() {
    let (server, controller) = setup().await;

    mount_device_configlets(&server, json!([{ "name": "A", "key": "1" }])).await;
    mount_configlet(&server, "A", "1").await;
    mount_stage(&server, 1).await;

    controller
        .apply_configlets_to_device(&target(), &["A"], false)
        .await
        .unwrap();

    let action = staged_action(&server).await;
    assert_eq!(action["configletList"], json!(["1"]));
}

#[tokio::test]
async fn test_apply_unknown_name_stages_nothing() {
    let (server, controller) = setup().await;

    mount_device_configlets(&server, json!([])).await;
    mount_configlet(&server, "A", "1").await;
    // A lookup with no key means the configlet does not exist.
    Mock::given(method("GET"))
        .and(path("/web/configlet/getConfigletByName.do"))
        .and(query_param("name", "missing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "missing" })))
        .mount(&server)
        .await;
    mount_stage(&server, 0).await;
    mount_save(&server, 0).await;

    let result = controller
        .apply_configlets_to_device(&target(), &["A", "missing"], true)
        .await;

    let err = result.unwrap_err();
    assert!(err.is_not_found(), "expected NotFound, got: {err:?}");
}

#[tokio::test]
async fn test_apply_rejected_lookup_surfaces_remote_code() {
    let (server, controller) = setup().await;

    mount_device_configlets(&server, json!([])).await;
    Mock::given(method("GET"))
        .and(path("/web/configlet/getConfigletByName.do"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errorCode": "INVALID",
            "errorMessage": "bad key"
        })))
        .mount(&server)
        .await;
    mount_stage(&server, 0).await;

    let err = controller
        .apply_configlets_to_device(&target(), &["A"], false)
        .await
        .unwrap_err();

    match err {
        CoreError::RemoteRejected { ref code, ref message } => {
            assert_eq!(code, "INVALID");
            assert_eq!(message, "bad key");
        }
        other => panic!("expected RemoteRejected, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_commit_failure_is_partial_commit() {
    let (server, controller) = setup().await;

    mount_device_configlets(&server, json!([])).await;
    mount_configlet(&server, "A", "1").await;
    mount_stage(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/web/provisioning/v2/saveTopology.do"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errorCode": "132801",
            "errorMessage": "save failed"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = controller
        .apply_configlets_to_device(&target(), &["A"], true)
        .await
        .unwrap_err();

    assert!(err.is_partial_commit(), "expected PartialCommit, got: {err:?}");
    assert_eq!(err.remote_code(), Some("132801"));
}

// ── Remove ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_remove_lists_remaining_and_excluded() {
    let (server, controller) = setup().await;

    mount_device_configlets(
        &server,
        json!([{ "name": "A", "key": "1" }, { "name": "B", "key": "2" }]),
    )
    .await;
    mount_configlet(&server, "A", "1").await;
    mount_stage(&server, 1).await;
    mount_save(&server, 1).await;

    let outcome = controller
        .remove_configlets_from_device(&target(), &["A"], true)
        .await
        .unwrap();

    assert_eq!(outcome, CommitOutcome::Committed);
    let action = staged_action(&server).await;
    assert_eq!(action["configletList"], json!(["2"]));
    assert_eq!(action["configletNamesList"], json!(["B"]));
    assert_eq!(action["ignoreConfigletList"], json!(["1"]));
    assert_eq!(action["ignoreConfigletNamesList"], json!(["A"]));
    assert_eq!(action["info"], "Configlet Remove from device: leaf1.lab");
}

#[tokio::test]
async fn test_remove_unassigned_configlet_keeps_everything() {
    let (server, controller) = setup().await;

    mount_device_configlets(&server, json!([{ "name": "A", "key": "1" }])).await;
    mount_configlet(&server, "Z", "9").await;
    mount_stage(&server, 1).await;

    controller
        .remove_configlets_from_device(&target(), &["Z"], false)
        .await
        .unwrap();

    let action = staged_action(&server).await;
    assert_eq!(action["configletList"], json!(["1"]));
    assert_eq!(action["ignoreConfigletList"], json!([]));
}
