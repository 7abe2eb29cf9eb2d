//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

use petadopt_api::{AppState, build_service};
use petadopt_core::config::{AppConfig, DatabaseProvider};
use petadopt_database::StoreManager;

/// A password that satisfies the default policy.
pub const STRONG_PASSWORD: &str = "Qz7!vLm2#pTr9x";

/// Test application context
pub struct TestApp {
    /// The full service, trailing-slash normalization included
    pub service: NormalizePath<Router>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over a fresh in-memory store
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Create a test application after adjusting the default config
    pub fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let mut config = AppConfig::default();
        config.database.provider = DatabaseProvider::Memory;
        config.logging.format = "pretty".to_string();
        adjust(&mut config);
        config.validate().expect("test config must be valid");

        let state = AppState::new(config.clone(), StoreManager::memory());
        Self {
            service: build_service(state),
            config,
        }
    }

    /// Register a user with [`STRONG_PASSWORD`]
    pub async fn register(&self, username: &str) -> TestResponse {
        let body = serde_json::json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": STRONG_PASSWORD,
            "password2": STRONG_PASSWORD,
        });
        self.request("POST", "/api/auth/register", Some(body), None)
            .await
    }

    /// Login and return the access token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/login", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Register a user and log them in
    pub async fn register_and_login(&self, username: &str) -> String {
        let response = self.register(username).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Register failed: {:?}",
            response.body
        );
        self.login(username, STRONG_PASSWORD).await
    }

    /// Create a pet as the token's user and return its ID
    pub async fn create_pet(&self, token: &str, body: Value) -> String {
        let response = self.request("POST", "/api/pets", Some(body), Some(token)).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create pet failed: {:?}",
            response.body
        );
        response.body["id"]
            .as_str()
            .expect("No id in pet response")
            .to_string()
    }

    /// Make an HTTP request with an optional bearer token
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut headers = Vec::new();
        if let Some(token) = token {
            headers.push((header::AUTHORIZATION.as_str(), format!("Bearer {token}")));
        }
        let body = body.map(|b| serde_json::to_vec(&b).expect("Failed to serialize body"));
        self.send(method, path, body, &headers).await
    }

    /// Make an HTTP request with a raw body and arbitrary headers
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<Vec<u8>>,
        headers: &[(&str, String)],
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        for (name, value) in headers {
            req = req.header(*name, value.as_str());
        }

        let req = req
            .body(Body::from(body.unwrap_or_default()))
            .expect("Failed to build request");

        let response = self
            .service
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// A pet body with every required field.
pub fn pet_body(name: &str) -> Value {
    serde_json::json!({
        "name": name,
        "type": "DOG",
        "age": 3,
        "gender": "MALE",
        "size": "MEDIUM",
        "description": "friendly",
    })
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `Set-Cookie` header, if any
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
    }

    /// Names from a JSON array of pets, in order
    pub fn names(&self) -> Vec<String> {
        self.body
            .as_array()
            .expect("expected a JSON array")
            .iter()
            .map(|p| p["name"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}
