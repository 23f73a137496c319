#![allow(clippy::unwrap_used)]
// Integration tests for `CvpClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cvpctl_api::{AssignmentAction, Configlet, CvpClient, Error, ReconcileBody};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CvpClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = CvpClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/web/login/authenticate.do"))
        .and(body_json(json!({ "userId": "cvpadmin", "password": "cvpadmin1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sessionId": "abc" })))
        .expect(1)
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "cvpadmin1".to_string().into();
    client.login("cvpadmin", &secret).await.unwrap();
}

#[tokio::test]
async fn test_login_rejected_in_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/web/login/authenticate.do"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errorCode": "112498",
            "errorMessage": "Unauthorized User"
        })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "wrong".to_string().into();
    let result = client.login("cvpadmin", &secret).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_session_expired() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.get_configlets_by_device("aa:bb:cc:dd:ee:ff").await;
    assert!(result.unwrap_err().is_auth_expired());
}

// ── Configlets ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_configlet_by_name() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/web/configlet/getConfigletByName.do"))
        .and(query_param("name", "Test1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "key": "configlet_1",
            "name": "Test1",
            "config": "username TEST nopassword",
            "reconciled": false,
            "user": "cvpadmin"
        })))
        .mount(&server)
        .await;

    let configlet = client.get_configlet_by_name("Test1").await.unwrap();

    assert_eq!(configlet.key, "configlet_1");
    assert_eq!(configlet.name, "Test1");
    assert_eq!(configlet.config, "username TEST nopassword");
}

#[tokio::test]
async fn test_get_configlet_by_name_without_key_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/web/configlet/getConfigletByName.do"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = client.get_configlet_by_name("Missing").await.unwrap_err();
    assert!(err.is_not_found(), "expected NotFound, got: {err:?}");
}

#[tokio::test]
async fn test_remote_error_code_is_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/web/configlet/getConfigletByName.do"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errorCode": "INVALID",
            "errorMessage": "bad key"
        })))
        .mount(&server)
        .await;

    let err = client.get_configlet_by_name("Test1").await.unwrap_err();
    match err {
        Error::Rejected { code, message } => {
            assert_eq!(code, "INVALID");
            assert_eq!(message, "bad key");
        }
        other => panic!("expected Rejected, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_configlets_by_device_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/web/provisioning/getConfigletsByNetElementId.do"))
        .and(query_param("netElementId", "aa:bb:cc:dd:ee:ff"))
        .and(query_param("startIndex", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 0,
            "configletList": []
        })))
        .mount(&server)
        .await;

    let configlets = client
        .get_configlets_by_device("aa:bb:cc:dd:ee:ff")
        .await
        .unwrap();
    assert!(configlets.is_empty());
}

#[tokio::test]
async fn test_delete_configlet_strips_config() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/web/configlet/deleteConfiglet.do"))
        .and(body_json(json!([{ "name": "Test1", "key": "configlet_1" }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    let configlet = Configlet {
        name: "Test1".into(),
        key: "configlet_1".into(),
        config: "username TEST nopassword".into(),
    };
    client.delete_configlet(&configlet).await.unwrap();
}

#[tokio::test]
async fn test_validate_and_compare_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/web/provisioning/v2/validateAndCompareConfiglets.do"))
        .and(body_json(json!({
            "netElementId": "aa:bb:cc:dd:ee:ff",
            "configIdList": ["1", "2"],
            "pageType": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reconciledConfig": {} })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .validate_and_compare("aa:bb:cc:dd:ee:ff", vec!["1".into(), "2".into()])
        .await
        .unwrap();
}

// ── Inventory ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_device_by_fqdn() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/web/inventory/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "key": "00:00:00:00:00:01",
                "hostname": "spine1",
                "fqdn": "spine1.lab",
                "ipAddress": "10.0.0.1",
                "systemMacAddress": "00:00:00:00:00:01"
            },
            {
                "key": "00:00:00:00:00:02",
                "hostname": "leaf1",
                "fqdn": "leaf1.lab",
                "ipAddress": "10.0.0.2",
                "systemMacAddress": "00:00:00:00:00:02",
                "modelName": "DCS-7050TX-64"
            }
        ])))
        .mount(&server)
        .await;

    let device = client.get_device("leaf1.lab").await.unwrap();
    assert_eq!(device.key, "00:00:00:00:00:02");
    assert_eq!(device.ip_address, "10.0.0.2");
    assert_eq!(device.model_name.as_deref(), Some("DCS-7050TX-64"));

    let missing = client.get_device("leaf9").await.unwrap_err();
    assert!(missing.is_not_found());
}

#[tokio::test]
async fn test_get_inventory_config() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/web/inventory/device/config"))
        .and(query_param("netElementId", "00:00:00:00:00:02"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "output": "hostname leaf1\n" })),
        )
        .mount(&server)
        .await;

    let config = client
        .get_inventory_config("00:00:00:00:00:02")
        .await
        .unwrap();
    assert_eq!(config, "hostname leaf1\n");
}

// ── Provisioning ────────────────────────────────────────────────────

#[tokio::test]
async fn test_add_temp_action_wraps_in_data() {
    let (server, client) = setup().await;

    let action = AssignmentAction {
        action: "associate".into(),
        to_id: "00:00:00:00:00:02".into(),
        configlet_list: vec!["1".into()],
        configlet_names_list: vec!["A".into()],
        ..AssignmentAction::default()
    };
    let expected = json!({ "data": [serde_json::to_value(&action).unwrap()] });

    Mock::given(method("POST"))
        .and(path("/web/provisioning/addTempAction.do"))
        .and(query_param("format", "topology"))
        .and(query_param("nodeId", "root"))
        .and(body_json(expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    client.add_temp_action(&action).await.unwrap();
}

#[tokio::test]
async fn test_save_topology_http_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/web/provisioning/v2/saveTopology.do"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let err = client
        .save_topology(&AssignmentAction::default())
        .await
        .unwrap_err();
    assert!(
        matches!(err, Error::Http { status: 500, .. }),
        "expected Http 500, got: {err:?}"
    );
}

#[tokio::test]
async fn test_save_topology_error_envelope_on_http_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/web/provisioning/v2/saveTopology.do"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "errorCode": "INVALID",
            "errorMessage": "bad key"
        })))
        .mount(&server)
        .await;

    let err = client
        .save_topology(&AssignmentAction::default())
        .await
        .unwrap_err();
    assert_eq!(err.remote_code(), Some("INVALID"));
    match err {
        Error::Rejected { code, message } => {
            assert_eq!(code, "INVALID");
            assert_eq!(message, "bad key");
        }
        other => panic!("expected Rejected, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_update_reconcile_configlet() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/web/provisioning/updateReconcileConfiglet.do"))
        .and(query_param("netElementId", "00:00:00:00:00:02"))
        .and(body_json(json!({
            "name": "RECONCILE_leaf1.lab",
            "config": "hostname leaf1\n",
            "reconciled": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .update_reconcile_configlet(
            "00:00:00:00:00:02",
            &ReconcileBody {
                name: "RECONCILE_leaf1.lab".into(),
                config: "hostname leaf1\n".into(),
                reconciled: false,
            },
        )
        .await
        .unwrap();
}
