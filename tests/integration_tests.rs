//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: YAML manifest → plan/apply → HTTP
//! requests → persisted state

use monitor_provider::engine::{Action, Engine};
use monitor_provider::manifest::{load_manifest_from_str, Manifest};
use monitor_provider::schema::Attributes;
use monitor_provider::state::StateManager;
use monitor_provider::{reconciler_for, Error, Presence, ResourceData};
use serde_json::{json, Value};
use std::path::Path;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "integration-key";

fn manifest_for(server: &MockServer) -> Manifest {
    load_manifest_from_str(&format!(
        r#"
provider:
  base_url: {uri}
  api_key: {API_KEY}
  timeout_secs: 5

resources:
  - kind: group
    name: prod
    attributes:
      name: prod
  - kind: url_check
    name: svc-health
    attributes:
      name: svc-health
      url: https://svc.example.com/health
      frequency: 60
      host_id: 5
      group_id: 2
"#,
        uri = server.uri()
    ))
    .unwrap()
}

fn engine_for(manifest: &Manifest, state_path: &Path) -> Engine {
    let client = manifest.provider.build_client().unwrap();
    Engine::new(client, StateManager::from_file(state_path).unwrap())
}

fn svc_health_record() -> Value {
    json!({
        "id": 17,
        "check_type": "url",
        "name": "svc-health",
        "frequency": 60,
        "enabled": true,
        "host_id": 5,
        "group_id": 2,
        "result_retention_days": 366,
        "tags": [],
        "url": "https://svc.example.com/health",
        "timeout": 30,
        "expected_status": 200
    })
}

async fn mount_remote(server: &MockServer) {
    Mock::given(method("PUT"))
        .and(path("/groups/add"))
        .and(header("Authorization", API_KEY))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 2})))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/groups/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2,
            "name": "prod",
            "description": ""
        })))
        .mount(server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/checks/add/url"))
        .and(body_partial_json(json!({
            "check_type": "url",
            "name": "svc-health",
            "frequency": 60,
            "host_id": 5,
            "group_id": 2
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 17})))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/checks/17"))
        .respond_with(ResponseTemplate::new(200).set_body_json(svc_health_record()))
        .mount(server)
        .await;
}

// ============================================================================
// Manifest Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_apply_then_plan_is_clean() {
    let mock_server = MockServer::start().await;
    mount_remote(&mock_server).await;

    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("monitor.state.json");
    let manifest = manifest_for(&mock_server);

    let stats = engine_for(&manifest, &state_path)
        .apply(&manifest)
        .await
        .unwrap();
    assert_eq!(stats.created, 2);

    // A fresh engine sees the persisted state and has nothing to do
    let engine = engine_for(&manifest, &state_path);
    let entry = engine.state().get("svc-health").await.unwrap();
    assert_eq!(entry.id, "17");
    assert_eq!(entry.attributes.get_i64("result_retention_days"), Some(366));

    let plan = engine.plan(&manifest).await.unwrap();
    assert!(!plan.has_changes(), "unexpected plan: {}", plan.summary());
}

#[tokio::test]
async fn test_drift_is_recreated() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/groups/2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/checks/17"))
        .respond_with(ResponseTemplate::new(200).set_body_json(svc_health_record()))
        .mount(&mock_server)
        .await;

    let mut check_attributes = svc_health_record();
    check_attributes
        .as_object_mut()
        .unwrap()
        .retain(|key, _| key != "id" && key != "check_type");

    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("monitor.state.json");
    std::fs::write(
        &state_path,
        serde_json::to_string(&json!({
            "resources": {
                "prod": {"kind": "group", "id": "2", "attributes": {"name": "prod", "description": ""}},
                "svc-health": {"kind": "url_check", "id": "17", "attributes": check_attributes}
            }
        }))
        .unwrap(),
    )
    .unwrap();

    let manifest = manifest_for(&mock_server);
    let plan = engine_for(&manifest, &state_path)
        .plan(&manifest)
        .await
        .unwrap();

    assert_eq!(plan.change("prod").unwrap().action, Action::Create);
    assert_eq!(plan.change("svc-health").unwrap().action, Action::NoOp);
}

#[tokio::test]
async fn test_destroy_empties_state() {
    let mock_server = MockServer::start().await;
    mount_remote(&mock_server).await;
    Mock::given(method("DELETE"))
        .and(path("/checks/remove/17"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true}"#))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/groups/remove/2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("monitor.state.json");
    let manifest = manifest_for(&mock_server);

    engine_for(&manifest, &state_path)
        .apply(&manifest)
        .await
        .unwrap();
    let deleted = engine_for(&manifest, &state_path).destroy().await.unwrap();
    assert_eq!(deleted, 2);

    let reloaded = StateManager::from_file(&state_path).unwrap();
    assert!(reloaded.addresses().await.is_empty());
}

#[tokio::test]
async fn test_short_form_declarations_converge() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/checks/add/web_journey"))
        .and(body_partial_json(json!({
            "check_type": "web_journey",
            "steps": [{"name": "open", "page_checks": []}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 30})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/checks/30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 30,
            "check_type": "web_journey",
            "name": "login",
            "frequency": 300,
            "enabled": true,
            "result_retention_days": 366,
            "tags": [],
            "browser": "chrome",
            "steps": [{
                "name": "open",
                "actions": [{"action_type": "navigate", "url": "https://app.example.com"}],
                "page_checks": []
            }]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/maintenance/add"))
        .and(body_partial_json(json!({
            "start": "2026-03-01T00:00:00Z",
            "end": "2026-03-01T04:00:00Z",
            "timezone": "UTC"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 40})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/maintenance/40"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 40,
            "name": "upgrade",
            "start": "2026-03-01T00:00:00Z",
            "end": "2026-03-01T04:00:00Z",
            "timezone": "UTC",
            "check_ids": [30],
            "host_ids": [],
            "suppressions": [{"alert_type": "down"}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let manifest = load_manifest_from_str(&format!(
        r#"
provider:
  base_url: {uri}
  api_key: {API_KEY}

resources:
  - kind: web_journey_check
    name: login
    attributes:
      name: login
      steps:
        - name: open
          actions:
            - type: navigate
              navigate:
                url: https://app.example.com
  - kind: maintenance
    name: upgrade
    attributes:
      name: upgrade
      start: "2026-03-01T02:00:00+02:00"
      end: "2026-03-01T06:00:00+02:00"
      check_ids: [30]
      suppressions:
        - alert_type: down
"#,
        uri = mock_server.uri()
    ))
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("monitor.state.json");

    let stats = engine_for(&manifest, &state_path)
        .apply(&manifest)
        .await
        .unwrap();
    assert_eq!(stats.created, 2);

    let engine = engine_for(&manifest, &state_path);
    let plan = engine.plan(&manifest).await.unwrap();
    assert!(!plan.has_changes(), "unexpected plan: {}", plan.summary());

    let stats = engine.apply(&manifest).await.unwrap();
    assert_eq!((stats.updated, stats.unchanged), (0, 2));
}

// ============================================================================
// Reconciler Scenario Tests
// ============================================================================

#[tokio::test]
async fn test_delete_rejection_keeps_identifier() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/checks/remove/17"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":false}"#))
        .mount(&mock_server)
        .await;

    let client = manifest_for(&mock_server).provider.build_client().unwrap();
    let reconciler = reconciler_for("url_check", &client).unwrap();
    let mut data = ResourceData::with_id("17");

    let err = reconciler.delete(&mut data).await.unwrap_err();
    assert!(err.to_string().contains(r#"{"success":false}"#));
    assert_eq!(data.presence(), Presence::Present);
}

#[tokio::test]
async fn test_ambiguous_host_search() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hosts/list"))
        .and(query_param("page", "0"))
        .and(query_param("search", "prod"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "prod-a", "address": "10.0.0.1"},
            {"id": 2, "name": "prod-b", "address": "10.0.0.2"}
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = manifest_for(&mock_server).provider.build_client().unwrap();
    let reconciler = reconciler_for("host", &client).unwrap();

    let err = reconciler.search_one("prod").await.unwrap_err();
    assert!(matches!(err, Error::AmbiguousSearch { count: 2, .. }));
}

#[tokio::test]
async fn test_transport_failure_is_not_retried() {
    let manifest = load_manifest_from_str(
        "provider:\n  base_url: http://127.0.0.1:1\n  api_key: k\n  timeout_secs: 2\n",
    )
    .unwrap();
    let client = manifest.provider.build_client().unwrap();
    let reconciler = reconciler_for("group", &client).unwrap();

    let mut data = ResourceData::with_id("3");
    let err = reconciler.read(&mut data).await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(data.id(), "3");
}
