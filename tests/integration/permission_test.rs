//! Integration tests for owner-only pet mutation.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{TestApp, pet_body};

const MISSING: &str = "/api/pets/0192a0c4-7c1e-7cc0-8000-000000000000";

async fn pet_owned_by_alice(app: &TestApp) -> (String, String, String) {
    let alice = app.register_and_login("alice").await;
    let bob = app.register_and_login("bob").await;
    let id = app.create_pet(&alice, pet_body("Rex")).await;
    (alice, bob, format!("/api/pets/{id}"))
}

#[tokio::test]
async fn test_non_owner_cannot_modify() {
    let app = TestApp::new();
    let (_, bob, path) = pet_owned_by_alice(&app).await;

    let patch = app
        .request("PATCH", &path, Some(json!({"name": "Stolen"})), Some(&bob))
        .await;
    assert_eq!(patch.status, StatusCode::FORBIDDEN);
    assert_eq!(patch.body["error"], "FORBIDDEN");
    assert_eq!(
        patch.body["message"],
        "You do not have permission to perform this action."
    );

    let put = app
        .request("PUT", &path, Some(pet_body("Stolen")), Some(&bob))
        .await;
    assert_eq!(put.status, StatusCode::FORBIDDEN);

    let delete = app.request("DELETE", &path, None, Some(&bob)).await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    let unchanged = app.request("GET", &path, None, None).await;
    assert_eq!(unchanged.body["name"], "Rex");
}

#[tokio::test]
async fn test_owner_can_modify() {
    let app = TestApp::new();
    let (alice, _, path) = pet_owned_by_alice(&app).await;

    let patch = app
        .request("PATCH", &path, Some(json!({"name": "Rexford"})), Some(&alice))
        .await;
    assert_eq!(patch.status, StatusCode::OK);
    assert_eq!(patch.body["name"], "Rexford");
    assert_eq!(patch.body["owner"]["username"], "alice");

    let delete = app.request("DELETE", &path, None, Some(&alice)).await;
    assert_eq!(delete.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_owner_cannot_be_reassigned() {
    let app = TestApp::new();
    let (alice, bob, path) = pet_owned_by_alice(&app).await;

    let bob_id = app
        .request("GET", "/api/auth/user", None, Some(&bob))
        .await
        .body["id"]
        .clone();

    let patch = app
        .request(
            "PATCH",
            &path,
            Some(json!({"owner": {"id": bob_id}, "owner_id": bob_id})),
            Some(&alice),
        )
        .await;
    assert_eq!(patch.status, StatusCode::OK);
    assert_eq!(patch.body["owner"]["username"], "alice");
}

#[tokio::test]
async fn test_permission_is_checked_before_body() {
    let app = TestApp::new();
    let (alice, bob, path) = pet_owned_by_alice(&app).await;
    let invalid = json!({"age": -1, "type": "DRAGON"});

    let response = app
        .request("PATCH", &path, Some(invalid.clone()), Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .send("PUT", &path, Some(b"{broken".to_vec()), &[(
            "authorization",
            format!("Bearer {bob}"),
        )])
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("PATCH", &path, Some(invalid), Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["age"].is_array());
    assert!(response.body["details"]["type"].is_array());
}

#[tokio::test]
async fn test_missing_pet_is_not_found_before_forbidden() {
    let app = TestApp::new();
    let bob = app.register_and_login("bob").await;

    let response = app
        .request("PATCH", MISSING, Some(json!({"age": -1})), Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("DELETE", MISSING, None, Some(&bob)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_anonymous_mutation_is_unauthenticated() {
    let app = TestApp::new();
    let (_, _, path) = pet_owned_by_alice(&app).await;

    for (method, target) in [
        ("PATCH", path.as_str()),
        ("PUT", path.as_str()),
        ("DELETE", path.as_str()),
        ("PATCH", MISSING),
    ] {
        let response = app
            .request(method, target, Some(json!({"name": "x"})), None)
            .await;
        assert_eq!(
            response.status,
            StatusCode::UNAUTHORIZED,
            "{method} {target}"
        );
    }
}

#[tokio::test]
async fn test_logged_out_owner_cannot_modify() {
    let app = TestApp::new();
    let (alice, _, path) = pet_owned_by_alice(&app).await;

    app.request("POST", "/api/auth/logout", None, Some(&alice))
        .await;

    let response = app
        .request("PATCH", &path, Some(json!({"name": "x"})), Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
