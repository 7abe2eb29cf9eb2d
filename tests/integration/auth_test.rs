//! Integration tests for registration, login, logout and the profile.

mod helpers;

use axum::http::StatusCode;

use helpers::{STRONG_PASSWORD, TestApp};

#[tokio::test]
async fn test_register_returns_public_profile() {
    let app = TestApp::new();

    let response = app.register("alice").await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["username"], "alice");
    assert_eq!(response.body["email"], "alice@example.com");
    assert!(response.body["id"].is_string());
    assert!(response.body.get("password").is_none());
    assert!(response.body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username_is_rejected() {
    let app = TestApp::new();
    app.register("alice").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "ALICE",
                "email": "other@example.com",
                "password": STRONG_PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert_eq!(
        response.body["details"]["username"][0],
        "A user with that username already exists."
    );
}

#[tokio::test]
async fn test_register_duplicate_non_ascii_username_is_rejected() {
    let app = TestApp::new();
    let body = |username: &str, email: &str| {
        serde_json::json!({
            "username": username,
            "email": email,
            "password": STRONG_PASSWORD,
            "password2": STRONG_PASSWORD,
        })
    };

    let first = app
        .request("POST", "/api/auth/register", Some(body("Émile", "a@example.com")), None)
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .request("POST", "/api/auth/register", Some(body("émile", "b@example.com")), None)
        .await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        second.body["details"]["username"][0],
        "A user with that username already exists."
    );
}

#[tokio::test]
async fn test_register_reports_password_problems() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "bob",
                "email": "bob@example.com",
                "password": "1234567",
                "password2": "7654321",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let details = &response.body["details"];
    assert_eq!(details["password2"][0], "Password fields didn't match.");
    let problems: Vec<&str> = details["password"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert!(problems.contains(&"This password is entirely numeric."));
    assert!(problems.iter().any(|p| p.starts_with("This password is too short.")));
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({"username": "carol"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["details"]["email"][0], "This field is required.");
    assert_eq!(response.body["details"]["password"][0], "This field is required.");
}

#[tokio::test]
async fn test_malformed_json_is_validation_error() {
    let app = TestApp::new();

    let response = app
        .send(
            "POST",
            "/api/auth/register",
            Some(b"{not json".to_vec()),
            &[],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body["details"]["non_field_errors"].is_array());
}

#[tokio::test]
async fn test_login_sets_cookie_and_returns_token() {
    let app = TestApp::new();
    app.register("alice").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "alice",
                "password": STRONG_PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["token"].is_string());
    assert!(response.body["expires_at"].is_string());
    assert_eq!(response.body["user"]["username"], "alice");

    let cookie = response.set_cookie().expect("session cookie");
    assert!(cookie.starts_with(&format!("{}=", app.config.auth.cookie_name)));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = TestApp::new();
    app.register("alice").await;

    for (username, password) in [("alice", "wrong-password"), ("nobody", STRONG_PASSWORD)] {
        let response = app
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({"username": username, "password": password})),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.body["details"]["non_field_errors"][0],
            "Unable to log in with provided credentials."
        );
    }
}

#[tokio::test]
async fn test_profile_requires_authentication() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/auth/user", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHENTICATED");
    assert_eq!(
        response.headers.get("www-authenticate").unwrap(),
        "Bearer"
    );
}

#[tokio::test]
async fn test_profile_via_bearer_and_cookie() {
    let app = TestApp::new();
    let token = app.register_and_login("alice").await;

    let response = app
        .request("GET", "/api/auth/user", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "alice");

    let cookie = format!("{}={}", app.config.auth.cookie_name, token);
    let response = app
        .send("GET", "/api/auth/user", None, &[("cookie", cookie)])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "alice");
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/auth/user", None, Some("not-a-jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_invalidates_token() {
    let app = TestApp::new();
    let token = app.register_and_login("alice").await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["detail"], "Successfully logged out.");

    let response = app
        .request("GET", "/api/auth/user", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_session_succeeds() {
    let app = TestApp::new();

    let response = app.request("POST", "/api/auth/logout", None, None).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("POST", "/api/auth/logout", None, Some("stale"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_keeps_other_sessions() {
    let app = TestApp::new();
    let first = app.register_and_login("alice").await;
    let second = app.login("alice", STRONG_PASSWORD).await;

    app.request("POST", "/api/auth/logout", None, Some(&first))
        .await;

    let response = app
        .request("GET", "/api/auth/user", None, Some(&second))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_patch_and_put_profile() {
    let app = TestApp::new();
    let token = app.register_and_login("alice").await;

    let response = app
        .request(
            "PATCH",
            "/api/auth/user",
            Some(serde_json::json!({"email": "alice@pets.example"})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "alice");
    assert_eq!(response.body["email"], "alice@pets.example");

    let response = app
        .request(
            "PUT",
            "/api/auth/user",
            Some(serde_json::json!({"email": "a@pets.example"})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["details"]["username"][0], "This field is required.");

    let response = app
        .request(
            "PUT",
            "/api/auth/user",
            Some(serde_json::json!({"username": "alicia", "email": "a@pets.example"})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "alicia");
}

#[tokio::test]
async fn test_profile_rename_to_taken_username() {
    let app = TestApp::new();
    app.register("bob").await;
    let token = app.register_and_login("alice").await;

    let response = app
        .request(
            "PATCH",
            "/api/auth/user",
            Some(serde_json::json!({"username": "bob"})),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["details"]["username"][0],
        "A user with that username already exists."
    );
}

#[tokio::test]
async fn test_trailing_slash_is_accepted() {
    let app = TestApp::new();
    let token = app.register_and_login("alice").await;

    let response = app
        .request("GET", "/api/auth/user/", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert!(response.body["version"].is_string());
}
