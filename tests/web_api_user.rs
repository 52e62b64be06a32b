//! Web API User Tests
//!
//! Integration tests for user endpoints.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{create_test_server, provider_token, register};

#[tokio::test]
async fn test_users_require_authentication() {
    let (server, _db) = create_test_server().await;

    let response = server.get("/api/users").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = server.post("/api/users/ensure").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_user() {
    let (server, _db) = create_test_server().await;
    let alice = provider_token("sub-alice", Some("alice@provider.example"), Some("Alice"));

    let response = server
        .post("/api/users")
        .add_header(AUTHORIZATION, format!("Bearer {alice}"))
        .json(&json!({
            "username": "alice",
            "domain": "x",
            "display_name": "Alice",
            "bio": "Hello there",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["data"]["address"], "alice@x");
    assert_eq!(body["data"]["display_name"], "Alice");
    assert_eq!(body["data"]["bio"], "Hello there");
    assert_eq!(body["data"]["email"], "alice@provider.example");
}

#[tokio::test]
async fn test_create_user_duplicate_address_conflict() {
    let (server, _db) = create_test_server().await;

    let alice = provider_token("sub-alice", Some("alice@provider.example"), None);
    register(&server, &alice, "alice", "x").await;

    let intruder = provider_token("sub-intruder", Some("other@provider.example"), None);
    let response = server
        .post("/api/users")
        .add_header(AUTHORIZATION, format!("Bearer {intruder}"))
        .json(&json!({"username": "alice", "domain": "x"}))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_user_twice_conflict() {
    let (server, _db) = create_test_server().await;

    let alice = provider_token("sub-alice", Some("alice@provider.example"), None);
    register(&server, &alice, "alice", "x").await;

    let response = server
        .post("/api/users")
        .add_header(AUTHORIZATION, format!("Bearer {alice}"))
        .json(&json!({"username": "alice2", "domain": "x"}))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_user_without_email_unprocessable() {
    let (server, _db) = create_test_server().await;

    let bare = provider_token("sub-bare", None, None);
    let response = server
        .post("/api/users")
        .add_header(AUTHORIZATION, format!("Bearer {bare}"))
        .json(&json!({"username": "bare", "domain": "x"}))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_ensure_user_provisions_and_is_idempotent() {
    let (server, _db) = create_test_server().await;
    let alice = provider_token("sub-alice", Some("alice@provider.example"), Some("Alice"));

    let response = server
        .post("/api/users/ensure")
        .add_header(AUTHORIZATION, format!("Bearer {alice}"))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["address"], "alice@mail.local");
    assert_eq!(body["data"]["display_name"], "Alice");
    let first_id = body["data"]["id"].as_i64().unwrap();

    // Second call resolves to the same user
    let response = server
        .post("/api/users/ensure")
        .add_header(AUTHORIZATION, format!("Bearer {alice}"))
        .await;
    assert_eq!(response.json::<Value>()["data"]["id"].as_i64().unwrap(), first_id);
}

#[tokio::test]
async fn test_ensure_user_probes_taken_usernames() {
    let (server, _db) = create_test_server().await;

    let squatter = provider_token("sub-squatter", Some("other@provider.example"), None);
    register(&server, &squatter, "alice", "mail.local").await;

    let alice = provider_token("sub-alice", Some("alice@provider.example"), None);
    let response = server
        .post("/api/users/ensure")
        .add_header(AUTHORIZATION, format!("Bearer {alice}"))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["address"], "alice1@mail.local");
}

#[tokio::test]
async fn test_ensure_user_without_email_unprocessable() {
    let (server, _db) = create_test_server().await;

    let bare = provider_token("sub-bare", None, None);
    let response = server
        .post("/api/users/ensure")
        .add_header(AUTHORIZATION, format!("Bearer {bare}"))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_me_before_and_after_registration() {
    let (server, _db) = create_test_server().await;
    let alice = provider_token("sub-alice", Some("alice@provider.example"), None);

    let response = server
        .get("/api/users/me")
        .add_header(AUTHORIZATION, format!("Bearer {alice}"))
        .await;
    response.assert_status_ok();
    assert!(response.json::<Value>()["data"].is_null());

    register(&server, &alice, "alice", "x").await;

    let response = server
        .get("/api/users/me")
        .add_header(AUTHORIZATION, format!("Bearer {alice}"))
        .await;
    assert_eq!(response.json::<Value>()["data"]["address"], "alice@x");
}

#[tokio::test]
async fn test_list_and_search_users() {
    let (server, _db) = create_test_server().await;

    for (subject, name, domain) in [("s1", "bob", "y"), ("s2", "carol", "z"), ("s3", "rob", "w")] {
        let token = provider_token(subject, Some(&format!("{name}@provider.example")), None);
        register(&server, &token, name, domain).await;
    }

    let viewer = provider_token("s1", Some("bob@provider.example"), None);

    let response = server
        .get("/api/users")
        .add_header(AUTHORIZATION, format!("Bearer {viewer}"))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"].as_array().unwrap().len(), 3);

    // "ob" matches both bob and rob as a substring; carol does not
    let response = server
        .get("/api/users?q=ob")
        .add_header(AUTHORIZATION, format!("Bearer {viewer}"))
        .await;
    let body: Value = response.json();
    let mut names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    names.sort_unstable();
    assert_eq!(names, ["bob", "rob"]);
}

#[tokio::test]
async fn test_get_user_by_address() {
    let (server, _db) = create_test_server().await;

    let alice = provider_token("sub-alice", Some("alice@provider.example"), None);
    register(&server, &alice, "alice", "x").await;

    let response = server
        .get("/api/users/alice/x")
        .add_header(AUTHORIZATION, format!("Bearer {alice}"))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["address"], "alice@x");

    // Unowned address resolves to null
    let response = server
        .get("/api/users/ghost/x")
        .add_header(AUTHORIZATION, format!("Bearer {alice}"))
        .await;
    response.assert_status_ok();
    assert!(response.json::<Value>()["data"].is_null());
}
