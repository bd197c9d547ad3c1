//! Session persistence tests

mod common;

use common::snake_user;
use crowdax::auth::User;
use crowdax::SessionStore;
use serde_json::Value;
use std::fs;

fn user() -> User {
    serde_json::from_value(snake_user()).unwrap()
}

#[tokio::test]
async fn test_session_file_uses_fixed_storage_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let store = SessionStore::open(path.clone()).unwrap();

    store
        .store_login("tok".to_string(), Some("refresh".to_string()), user())
        .await
        .unwrap();

    let persisted: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(persisted["authToken"], "tok");
    assert_eq!(persisted["refreshToken"], "refresh");
    assert_eq!(persisted["user"]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_session_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let store = SessionStore::open(path.clone()).unwrap();
        store
            .store_login("tok".to_string(), Some("refresh".to_string()), user())
            .await
            .unwrap();
    }

    let reopened = SessionStore::open(path).unwrap();
    assert!(reopened.is_authenticated().await);
    assert_eq!(reopened.token().await.as_deref(), Some("tok"));
    assert_eq!(reopened.refresh_token().await.as_deref(), Some("refresh"));
    assert_eq!(reopened.user().await.unwrap().first_name, "Ada");
}

#[tokio::test]
async fn test_clear_leaves_no_keys_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let store = SessionStore::open(path.clone()).unwrap();

    store
        .store_login("tok".to_string(), Some("refresh".to_string()), user())
        .await
        .unwrap();
    store.clear().await.unwrap();

    let persisted: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let object = persisted.as_object().unwrap();
    assert!(object.is_empty());
}

#[tokio::test]
async fn test_missing_session_file_starts_anonymous() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::open(dir.path().join("absent.json")).unwrap();
    assert!(!store.is_authenticated().await);
    assert!(store.user().await.is_none());
}

#[tokio::test]
async fn test_parent_directories_are_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deep").join("session.json");
    let store = SessionStore::open(path.clone()).unwrap();

    store.store_token("tok".to_string()).await.unwrap();
    assert!(path.exists());
}

#[tokio::test]
async fn test_token_update_keeps_user() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let store = SessionStore::open(path).unwrap();

    store
        .store_login("tok-old".to_string(), Some("refresh".to_string()), user())
        .await
        .unwrap();
    store.store_token("tok-new".to_string()).await.unwrap();

    assert_eq!(store.token().await.as_deref(), Some("tok-new"));
    assert_eq!(store.refresh_token().await.as_deref(), Some("refresh"));
    assert!(store.user().await.is_some());
}

#[tokio::test]
async fn test_concurrent_writers_serialize() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let store = SessionStore::open(path.clone()).unwrap();

    let mut handles = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.store_token(format!("tok-{i}")).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // Whatever write won, memory and disk agree and the file is intact
    let token = store.token().await.unwrap();
    assert!(token.starts_with("tok-"));
    let persisted: Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(persisted["authToken"], token);
}
