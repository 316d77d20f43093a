//! Tests for StateManager

use super::*;
use serde_json::json;
use tempfile::tempdir;

fn stored(kind: &str, id: &str, name: &str) -> StoredResource {
    StoredResource {
        kind: kind.to_string(),
        id: id.to_string(),
        attributes: json!({ "name": name }).as_object().cloned().unwrap(),
    }
}

// ============================================================================
// Construction Tests
// ============================================================================

#[test]
fn test_state_manager_in_memory() {
    let manager = StateManager::in_memory();
    assert!(manager.is_in_memory());
}

#[test]
fn test_state_manager_without_auto_save() {
    let manager = StateManager::without_auto_save("/tmp/monitor.state.json");
    assert!(!manager.is_in_memory());
    assert_eq!(
        manager.path().to_str().unwrap(),
        "/tmp/monitor.state.json"
    );
}

#[test]
fn test_from_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let manager = StateManager::from_file(dir.path().join("absent.json")).unwrap();
    assert!(!manager.is_in_memory());
}

// ============================================================================
// Entry Tests
// ============================================================================

#[tokio::test]
async fn test_put_get_remove() {
    let manager = StateManager::in_memory();
    assert!(manager.get("web").await.is_none());

    manager.put("web", stored("host", "4", "web")).await.unwrap();
    assert_eq!(manager.get("web").await.unwrap().id, "4");

    let removed = manager.remove("web").await.unwrap();
    assert_eq!(removed.unwrap().kind, "host");
    assert!(manager.get("web").await.is_none());
    assert!(manager.remove("web").await.unwrap().is_none());
}

#[tokio::test]
async fn test_addresses() {
    let manager = StateManager::in_memory();
    manager.put("b", stored("group", "2", "b")).await.unwrap();
    manager.put("a", stored("host", "1", "a")).await.unwrap();

    assert_eq!(manager.addresses().await, vec!["a", "b"]);
    assert_eq!(manager.state().await.resources.len(), 2);
}

// ============================================================================
// Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_auto_save_on_put() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("monitor.state.json");

    let manager = StateManager::from_file(&path).unwrap();
    manager.put("web", stored("host", "4", "web")).await.unwrap();

    let reloaded = StateManager::from_file(&path).unwrap();
    assert_eq!(reloaded.get("web").await, Some(stored("host", "4", "web")));
    assert!(!dir.path().join("monitor.state.tmp").exists());
}

#[tokio::test]
async fn test_auto_save_on_remove() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("monitor.state.json");

    let manager = StateManager::from_file(&path).unwrap();
    manager.put("web", stored("host", "4", "web")).await.unwrap();
    manager.put("db", stored("host", "5", "db")).await.unwrap();
    manager.remove("web").await.unwrap();

    let reloaded = StateManager::from_file(&path).unwrap();
    assert_eq!(reloaded.addresses().await, vec!["db"]);
}

#[tokio::test]
async fn test_explicit_save_without_auto_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("manual.json");

    let manager = StateManager::without_auto_save(&path);
    manager.put("web", stored("host", "4", "web")).await.unwrap();
    assert!(!path.exists());

    manager.save().await.unwrap();
    let reloaded = StateManager::from_file(&path).unwrap();
    assert!(reloaded.get("web").await.is_some());
}

#[tokio::test]
async fn test_save_in_memory_noop() {
    let manager = StateManager::in_memory();
    manager.put("web", stored("host", "4", "web")).await.unwrap();
    manager.save().await.unwrap();
}

#[tokio::test]
async fn test_state_file_shape() {
    let manager = StateManager::in_memory();
    manager.put("web", stored("host", "4", "web")).await.unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&manager.to_json_pretty().await.unwrap()).unwrap();
    assert_eq!(
        value,
        json!({
            "resources": {
                "web": {"kind": "host", "id": "4", "attributes": {"name": "web"}}
            }
        })
    );
}

// ============================================================================
// Clone Tests
// ============================================================================

#[tokio::test]
async fn test_clone_shares_state() {
    let manager = StateManager::in_memory();
    let cloned = manager.clone();

    manager.put("web", stored("host", "4", "web")).await.unwrap();
    assert!(cloned.get("web").await.is_some());
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn test_load_invalid_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("invalid.json");
    std::fs::write(&path, "{ invalid json }").unwrap();

    let err = StateManager::from_file(&path).unwrap_err();
    assert!(matches!(err, crate::error::Error::State { .. }));
}
